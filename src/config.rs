//!
//! Run configurations
//!
//! Built from command line options, or loaded from a JSON file:
//!
//! ```text
//! {
//!   "input_path": "data/biogrid-heat-shock15.net",
//!   "output_path": "out/distance.txt.gz",
//!   "apsp": { "sweep": "Parallel", "progress": true }
//! }
//! ```
//!
use crate::apsp::{ApspOptions, Sweep};
use crate::error::{Error, Result};
use crate::io::read_string;
use derive_new::new;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

///
/// network file -> shortest distance matrix file
///
#[derive(new, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[new(default)]
    #[serde(default)]
    pub apsp: ApspOptions,
}

///
/// coordinate file (+ labels from the network file) -> depth TSV
///
#[derive(new, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthConfig {
    pub coords_path: PathBuf,
    /// labels are `1..=n` when not given
    pub network_path: Option<PathBuf>,
    pub output_path: PathBuf,
    #[new(value = "Sweep::Parallel")]
    #[serde(default = "default_sweep")]
    pub sweep: Sweep,
    /// number of the most central nodes to report in the log
    #[new(value = "10")]
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_sweep() -> Sweep {
    Sweep::Parallel
}

fn default_top() -> usize {
    10
}

///
/// parse a JSON config, reporting syntax errors as `Error::Parse`
///
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| {
        let content = s
            .lines()
            .nth(e.line().saturating_sub(1))
            .unwrap_or("")
            .to_owned();
        Error::Parse {
            line: e.line(),
            content,
            reason: e.to_string(),
        }
    })
}

///
/// load a JSON config file with `from_json_str`
///
pub fn from_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let s = read_string(path)?;
    from_json_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_config_json() {
        let c: DistanceConfig = from_json_str(
            r#"{
                "input_path": "a.net",
                "output_path": "d.txt",
                "apsp": { "sweep": "Serial", "progress": true }
            }"#,
        )
        .unwrap();
        assert_eq!(c.input_path, PathBuf::from("a.net"));
        assert_eq!(c.apsp.sweep, Sweep::Serial);
        assert!(c.apsp.progress);

        // apsp is optional
        let c: DistanceConfig =
            from_json_str(r#"{"input_path": "a.net", "output_path": "d.txt"}"#).unwrap();
        assert_eq!(c, DistanceConfig::new("a.net".into(), "d.txt".into()));
    }
    #[test]
    fn depth_config_defaults() {
        let c: DepthConfig =
            from_json_str(r#"{"coords_path": "c.txt", "network_path": null, "output_path": "o.tsv"}"#)
                .unwrap();
        assert_eq!(c, DepthConfig::new("c.txt".into(), None, "o.tsv".into()));
        assert_eq!(c.sweep, Sweep::Parallel);
        assert_eq!(c.top, 10);
    }
    #[test]
    fn syntax_error_is_parse_error() {
        let e = from_json_str::<DistanceConfig>("{\n\"input_path\": 1,\n}").unwrap_err();
        match e {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            e => panic!("unexpected error {:?}", e),
        }
    }
    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let c = DistanceConfig::new("in.net".into(), "out.txt".into());
        std::fs::write(&path, serde_json::to_string_pretty(&c).unwrap()).unwrap();
        let c2: DistanceConfig = from_json_file(&path).unwrap();
        assert_eq!(c, c2);

        let e = from_json_file::<DistanceConfig, _>(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(e, Error::Io(_)));
    }
}
