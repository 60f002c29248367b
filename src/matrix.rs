//!
//! Dense N x N distance matrix
//!
//! # Text format
//!
//! One row per line, entries separated by whitespace, `inf` for "no path".
//! Lines starting with `#` and blank lines are ignored when reading.
//!
//! ```text
//! 0 1 2 inf
//! 1 0 1 inf
//! 2 1 0 inf
//! inf inf inf 0
//! ```
//!
use crate::dist::Dist;
use crate::error::{Error, Result, ValidationError};
use crate::io::{numbered_lines, open_reader, FileWriter};
use itertools::Itertools;
use ndarray::prelude::*;
use std::path::Path;
use std::str::FromStr;

///
/// `m[(i, j)]` = length of the path (or direct edge) from node `i` to node `j`
///
#[derive(Clone, Debug, PartialEq)]
pub struct DistMatrix {
    inner: Array2<Dist>,
}

impl DistMatrix {
    ///
    /// N nodes with no edges: zero diagonal, infinite elsewhere
    ///
    pub fn disconnected(n_nodes: usize) -> Self {
        let inner = Array2::from_shape_fn((n_nodes, n_nodes), |(i, j)| {
            if i == j {
                Dist::ZERO
            } else {
                Dist::INFINITY
            }
        });
        DistMatrix { inner }
    }
    ///
    /// Wrap a 2D array. Rejects non-square shapes.
    ///
    /// The diagonal is not checked here; see `validate`.
    ///
    pub fn from_array(inner: Array2<Dist>) -> Result<Self> {
        let (n_rows, n_cols) = inner.dim();
        if n_rows != n_cols {
            return Err(ValidationError::NotSquare {
                n_rows,
                row: 0,
                n_cols,
            }
            .into());
        }
        Ok(DistMatrix { inner })
    }
    ///
    /// Build from rows of raw values (`f64::INFINITY` for "no edge").
    ///
    /// Rejects ragged/non-square rows and NaN entries.
    ///
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(ValidationError::NotSquare {
                    n_rows: n,
                    row: i,
                    n_cols: row.len(),
                }
                .into());
            }
            for (j, &x) in row.iter().enumerate() {
                let d = Dist::try_new(x).ok_or(ValidationError::NotANumber { i, j })?;
                values.push(d);
            }
        }
        let inner = Array2::from_shape_fn((n, n), |(i, j)| values[i * n + j]);
        Ok(DistMatrix { inner })
    }
    ///
    /// the number of nodes N
    ///
    pub fn n_nodes(&self) -> usize {
        self.inner.nrows()
    }
    pub fn is_empty(&self) -> bool {
        self.n_nodes() == 0
    }
    pub fn get(&self, i: usize, j: usize) -> Dist {
        self.inner[[i, j]]
    }
    pub fn set(&mut self, i: usize, j: usize, d: Dist) {
        self.inner[[i, j]] = d;
    }
    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<Dist> {
        &mut self.inner
    }
    ///
    /// iterate over `(i, j, d)` for all entries in row-major order
    ///
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, Dist)> + '_ {
        self.inner.indexed_iter().map(|((i, j), &d)| (i, j, d))
    }
    ///
    /// `m[i][j] == m[j][i]` for all pairs?
    ///
    pub fn is_symmetric(&self) -> bool {
        let n = self.n_nodes();
        (0..n).all(|i| (i + 1..n).all(|j| self.get(i, j) == self.get(j, i)))
    }
    ///
    /// Check the invariants required by the shortest path engine:
    ///
    /// 1. square
    /// 2. all diagonal entries are exactly zero
    ///
    /// Violations are reported, never fixed.
    ///
    pub fn validate(&self) -> Result<()> {
        let (n_rows, n_cols) = self.inner.dim();
        if n_rows != n_cols {
            return Err(ValidationError::NotSquare {
                n_rows,
                row: 0,
                n_cols,
            }
            .into());
        }
        for i in 0..n_rows {
            let d = self.get(i, i);
            if !d.is_zero() {
                return Err(ValidationError::NonZeroDiagonal {
                    index: i,
                    value: d.to_value(),
                }
                .into());
            }
        }
        Ok(())
    }
    ///
    /// Summary statistics over the off-diagonal entries
    ///
    pub fn stats(&self) -> DistStats {
        let mut n_reachable_pairs = 0;
        let mut n_disconnected_pairs = 0;
        let mut diameter: Option<f64> = None;
        let mut total = 0.0;
        for (i, j, d) in self.entries() {
            if i == j {
                continue;
            }
            if d.is_infinite() {
                n_disconnected_pairs += 1;
            } else {
                n_reachable_pairs += 1;
                total += d.to_value();
                diameter = Some(diameter.map_or(d.to_value(), |m| m.max(d.to_value())));
            }
        }
        let mean = if n_reachable_pairs > 0 {
            Some(total / n_reachable_pairs as f64)
        } else {
            None
        };
        DistStats {
            n_nodes: self.n_nodes(),
            n_reachable_pairs,
            n_disconnected_pairs,
            diameter,
            mean,
        }
    }
}

impl std::ops::Index<(usize, usize)> for DistMatrix {
    type Output = Dist;
    fn index(&self, (i, j): (usize, usize)) -> &Dist {
        &self.inner[[i, j]]
    }
}

///
/// Text format
///
impl DistMatrix {
    ///
    /// write the matrix in the text format
    ///
    pub fn to_writer<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        for row in self.inner.rows() {
            writeln!(writer, "{}", row.iter().format(" "))?;
        }
        writer.flush()
    }
    ///
    /// create a text file with `to_writer`
    ///
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = FileWriter::create(path)?;
        self.to_writer(&mut writer)?;
        writer.finish()?;
        Ok(())
    }
    ///
    /// parse the text format
    ///
    pub fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self> {
        let mut rows: Vec<Vec<Dist>> = Vec::new();
        for line in numbered_lines(reader) {
            let (i, text) = line?;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let row = trimmed
                .split_whitespace()
                .map(|token| {
                    let d = token.parse::<Dist>().map_err(|e| {
                        Error::parse(i, text.as_str(), format!("invalid distance `{}`: {}", token, e))
                    })?;
                    if d.to_value() == f64::NEG_INFINITY {
                        return Err(Error::parse(
                            i,
                            text.as_str(),
                            format!("`{}` is not a valid distance", token),
                        ));
                    }
                    Ok(d)
                })
                .collect::<Result<Vec<Dist>>>()?;
            rows.push(row);
        }

        let n = rows.len();
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != n) {
            return Err(ValidationError::NotSquare {
                n_rows: n,
                row,
                n_cols: r.len(),
            }
            .into());
        }
        let inner = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
        Ok(DistMatrix { inner })
    }
    ///
    /// parse a text file with `from_reader`
    ///
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = open_reader(path)?;
        Self::from_reader(reader)
    }
}

impl std::fmt::Display for DistMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.inner.rows() {
            writeln!(f, "{}", row.iter().format(" "))?;
        }
        Ok(())
    }
}

impl FromStr for DistMatrix {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

///
/// Summary of a distance matrix, counted over ordered pairs `(i, j)` with `i != j`
///
#[derive(Clone, Debug, PartialEq)]
pub struct DistStats {
    pub n_nodes: usize,
    pub n_reachable_pairs: usize,
    pub n_disconnected_pairs: usize,
    /// max finite distance
    pub diameter: Option<f64>,
    /// mean finite distance
    pub mean: Option<f64>,
}

impl std::fmt::Display for DistStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "n_nodes={} n_reachable_pairs={} n_disconnected_pairs={}",
            self.n_nodes, self.n_reachable_pairs, self.n_disconnected_pairs
        )?;
        if let Some(diameter) = self.diameter {
            write!(f, " diameter={}", diameter)?;
        }
        if let Some(mean) = self.mean {
            write!(f, " mean={:.4}", mean)?;
        }
        Ok(())
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Dist;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn disconnected_matrix() {
        let m = DistMatrix::disconnected(3);
        assert_eq!(m.n_nodes(), 3);
        for (i, j, d) in m.entries() {
            if i == j {
                assert_eq!(d, Dist::ZERO);
            } else {
                assert!(d.is_infinite());
            }
        }
        assert!(m.validate().is_ok());
        assert!(m.is_symmetric());

        let m = DistMatrix::disconnected(0);
        assert!(m.is_empty());
        assert!(m.validate().is_ok());
    }
    #[test]
    fn from_rows_rejects_ragged() {
        let e = DistMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        match e {
            Error::Validation(ValidationError::NotSquare { n_rows, row, n_cols }) => {
                assert_eq!((n_rows, row, n_cols), (2, 1, 1));
            }
            e => panic!("unexpected error {:?}", e),
        }
        let e = DistMatrix::from_rows(&[vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0]]).unwrap_err();
        assert!(e.is_validation());
    }
    #[test]
    fn from_rows_rejects_nan() {
        let e = DistMatrix::from_rows(&[vec![0.0, f64::NAN], vec![1.0, 0.0]]).unwrap_err();
        match e {
            Error::Validation(ValidationError::NotANumber { i, j }) => assert_eq!((i, j), (0, 1)),
            e => panic!("unexpected error {:?}", e),
        }
    }
    #[test]
    fn from_array_rejects_non_square() {
        let a = Array2::from_elem((2, 3), Dist::ZERO);
        assert!(DistMatrix::from_array(a).unwrap_err().is_validation());
    }
    #[test]
    fn validate_diagonal() {
        let m = DistMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.5]]).unwrap();
        match m.validate().unwrap_err() {
            Error::Validation(ValidationError::NonZeroDiagonal { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 0.5);
            }
            e => panic!("unexpected error {:?}", e),
        }
    }
    #[test]
    fn symmetry() {
        let m = DistMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
        assert!(!m.is_symmetric());
        let m = DistMatrix::from_rows(&[vec![0.0, INF], vec![INF, 0.0]]).unwrap();
        assert!(m.is_symmetric());
    }
    #[test]
    fn text_format() {
        let m = DistMatrix::from_rows(&[
            vec![0.0, 1.5, INF],
            vec![1.5, 0.0, 2.0],
            vec![INF, 2.0, 0.0],
        ])
        .unwrap();
        let s = m.to_string();
        assert_eq!(s, "0 1.5 inf\n1.5 0 2\ninf 2 0\n");

        let mut buf = Vec::new();
        m.to_writer(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), s);

        let m2: DistMatrix = "# comment\n0 1.5 inf\n\n1.5 0 2\ninf 2 0\n".parse().unwrap();
        assert_eq!(m, m2);

        // numpy savetxt style
        let m3: DistMatrix =
            "0.000000000000000000e+00 1.500000000000000000e+00 inf\n1.5 0 2\ninf 2 0\n"
                .parse()
                .unwrap();
        assert_eq!(m, m3);
    }
    #[test]
    fn text_format_errors() {
        let e = "0 1\n1 zero\n".parse::<DistMatrix>().unwrap_err();
        match e {
            Error::Parse { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "1 zero");
            }
            e => panic!("unexpected error {:?}", e),
        }
        let e = "0 1\n1 0 2\n".parse::<DistMatrix>().unwrap_err();
        assert!(e.is_validation());
        let e = "0 nan\n1 0\n".parse::<DistMatrix>().unwrap_err();
        assert!(e.is_parse());
    }
    #[test]
    fn negative_infinity_is_rejected() {
        match "0 -inf\n1 0\n".parse::<DistMatrix>().unwrap_err() {
            Error::Parse { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("-inf"));
            }
            e => panic!("unexpected error {:?}", e),
        }
        // +inf is "no path"
        let m: DistMatrix = "0 inf\n1 0\n".parse().unwrap();
        assert!(m[(0, 1)].is_infinite());
    }
    #[test]
    fn invalid_utf8_is_parse_error() {
        let e = DistMatrix::from_reader(&b"0 1\n1 \xff\n"[..]).unwrap_err();
        match e {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            e => panic!("unexpected error {:?}", e),
        }
    }
    #[test]
    fn empty_text() {
        let m: DistMatrix = "".parse().unwrap();
        assert!(m.is_empty());
        assert_eq!(m.to_string(), "");
    }
    #[test]
    fn stats() {
        let m = DistMatrix::from_rows(&[
            vec![0.0, 1.0, INF],
            vec![1.0, 0.0, INF],
            vec![INF, INF, 0.0],
        ])
        .unwrap();
        let s = m.stats();
        assert_eq!(s.n_nodes, 3);
        assert_eq!(s.n_reachable_pairs, 2);
        assert_eq!(s.n_disconnected_pairs, 4);
        assert_eq!(s.diameter, Some(1.0));
        assert_eq!(s.mean, Some(1.0));
        println!("{}", s);

        let s = DistMatrix::disconnected(1).stats();
        assert_eq!(s.diameter, None);
        assert_eq!(s.mean, None);
    }
}
