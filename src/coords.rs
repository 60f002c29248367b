//!
//! Embedded coordinates of nodes
//!
//! # Text format
//!
//! One row per node (in the label order of the network), `p` columns
//! separated by whitespace. Lines starting with `#` and blank lines are
//! ignored.
//!
//! ```text
//! -1.25e-01 3.0e-01
//! 2.5e-01 -1.0e-02
//! ```
//!
use crate::error::{Error, Result, ValidationError};
use crate::io::{numbered_lines, open_reader, FileWriter};
use itertools::Itertools;
use ndarray::prelude::*;
use std::path::Path;
use std::str::FromStr;

///
/// `n_points x n_dims` matrix; row `i` is the point of node `i`
///
#[derive(Clone, Debug, PartialEq)]
pub struct Coords {
    points: Array2<f64>,
}

impl Coords {
    pub fn new(points: Array2<f64>) -> Self {
        Coords { points }
    }
    pub fn n_points(&self) -> usize {
        self.points.nrows()
    }
    pub fn n_dims(&self) -> usize {
        self.points.ncols()
    }
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }
    ///
    /// Fail with `ValidationError::ShapeMismatch` unless there is exactly
    /// one point per label.
    ///
    pub fn check_n_points(&self, n_labels: usize) -> Result<()> {
        if self.n_points() != n_labels {
            return Err(ValidationError::ShapeMismatch {
                what: "number of points".to_owned(),
                expected: n_labels,
                found: self.n_points(),
            }
            .into());
        }
        Ok(())
    }
}

///
/// Text format
///
impl Coords {
    pub fn to_writer<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        for row in self.points.rows() {
            writeln!(writer, "{}", row.iter().format(" "))?;
        }
        writer.flush()
    }
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = FileWriter::create(path)?;
        self.to_writer(&mut writer)?;
        writer.finish()?;
        Ok(())
    }
    ///
    /// parse the text format. All rows must have the same number of columns.
    ///
    pub fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self> {
        let mut values: Vec<f64> = Vec::new();
        let mut n_rows = 0;
        let mut n_cols: Option<usize> = None;
        for line in numbered_lines(reader) {
            let (i, text) = line?;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut n = 0;
            for token in trimmed.split_whitespace() {
                let x: f64 = token.parse().map_err(|_| {
                    Error::parse(i, text.as_str(), format!("`{}` is not a number", token))
                })?;
                if !x.is_finite() {
                    return Err(Error::parse(
                        i,
                        text.as_str(),
                        format!("coordinate `{}` is not finite", token),
                    ));
                }
                values.push(x);
                n += 1;
            }
            match n_cols {
                None => n_cols = Some(n),
                Some(expected) if expected != n => {
                    return Err(ValidationError::ShapeMismatch {
                        what: format!("number of columns at line {}", i),
                        expected,
                        found: n,
                    }
                    .into())
                }
                _ => {}
            }
            n_rows += 1;
        }
        let n_cols = n_cols.unwrap_or(0);
        let points = Array2::from_shape_fn((n_rows, n_cols), |(i, j)| values[i * n_cols + j]);
        Ok(Coords { points })
    }
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = open_reader(path)?;
        Self::from_reader(reader)
    }
}

impl FromStr for Coords {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}
