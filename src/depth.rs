//!
//! Projection depth of embedded nodes
//!
//! A network centrality: a node is central when its embedded point lies deep
//! inside the cloud of all points.
//!
//! For a point `x` among points `X` (`n x p`):
//!
//! ```text
//! S    = cov(X)                  (n - 1 normalization)
//! Z    = X - x                   (row-wise)
//! Y    = Z S^-1 Z^T              (n x n)
//! m_r  = min(#{j | Y[r][j] >= 0}, #{j | Y[r][j] <= 0})
//! D(x) = min_r m_r / n
//! ```
//!
//! Row `r` of `Y` projects every point onto the direction `S^-1 z_r`, so
//! `m_r` is the size of the smaller half-space through `x`. `Y` is never
//! materialized; each row is computed on the fly.
//!
use crate::apsp::Sweep;
use crate::coords::Coords;
use crate::error::{Result, ValidationError};
use crate::io::FileWriter;
use log::info;
use nalgebra::{Cholesky, DMatrix};
use ndarray::prelude::*;
use rayon::prelude::*;
use std::path::Path;

///
/// Sample covariance matrix of the rows (`p x p`)
///
pub fn covariance(points: &Array2<f64>) -> Array2<f64> {
    let (n, p) = points.dim();
    if n < 2 {
        return Array2::zeros((p, p));
    }
    let mean = points.sum_axis(Axis(0)) / n as f64;
    let centered = points - &mean;
    centered.t().dot(&centered) / (n as f64 - 1.0)
}

///
/// Inverse of a covariance matrix through its Cholesky factorization.
/// `None` unless the matrix is square and symmetric positive definite.
///
fn inverse_covariance(s: &Array2<f64>) -> Option<Array2<f64>> {
    let (p, q) = s.dim();
    if p != q {
        return None;
    }
    let m = DMatrix::from_fn(p, p, |i, j| s[[i, j]]);
    let inv = Cholesky::new(m)?.inverse();
    Some(Array2::from_shape_fn((p, p), |(i, j)| inv[(i, j)]))
}

fn check_points(coords: &Coords) -> Result<Array2<f64>> {
    let n = coords.n_points();
    if n < 2 {
        return Err(ValidationError::TooFewPoints {
            required: 2,
            found: n,
        }
        .into());
    }
    let sinv = inverse_covariance(&covariance(coords.points()))
        .ok_or(ValidationError::SingularCovariance)?;
    Ok(sinv)
}

///
/// depth of `x` given the inverse covariance `sinv` of `points`
///
fn depth_with(x: ArrayView1<'_, f64>, points: &Array2<f64>, sinv: &Array2<f64>) -> f64 {
    let n = points.nrows();
    let z = points - &x;
    let w = z.dot(sinv);
    let mut d = n;
    for r in 0..n {
        let y = z.dot(&w.row(r));
        let n_pos = y.iter().filter(|&&v| v >= 0.0).count();
        let n_neg = y.iter().filter(|&&v| v <= 0.0).count();
        d = d.min(n_pos.min(n_neg));
    }
    d as f64 / n as f64
}

///
/// Projection depth of an arbitrary point `x` with respect to `coords`
///
/// Requires at least 2 points with a non-singular covariance.
///
pub fn projection_depth_of(x: ArrayView1<'_, f64>, coords: &Coords) -> Result<f64> {
    if x.len() != coords.n_dims() {
        return Err(ValidationError::ShapeMismatch {
            what: "dimension of the point".to_owned(),
            expected: coords.n_dims(),
            found: x.len(),
        }
        .into());
    }
    let sinv = check_points(coords)?;
    Ok(depth_with(x, coords.points(), &sinv))
}

///
/// Projection depth of every point of `coords`, in order
///
pub fn projection_depths(coords: &Coords, sweep: Sweep) -> Result<Vec<f64>> {
    let sinv = check_points(coords)?;
    let points = coords.points();
    let depths = match sweep {
        Sweep::Serial => (0..coords.n_points())
            .map(|i| depth_with(points.row(i), points, &sinv))
            .collect(),
        Sweep::Parallel => (0..coords.n_points())
            .into_par_iter()
            .map(|i| depth_with(points.row(i), points, &sinv))
            .collect(),
    };
    Ok(depths)
}

///
/// Depth of each node, paired with its label
///
#[derive(Clone, Debug, PartialEq)]
pub struct DepthTable {
    labels: Vec<String>,
    depths: Vec<f64>,
}

impl DepthTable {
    pub fn new(labels: Vec<String>, depths: Vec<f64>) -> Result<Self> {
        if labels.len() != depths.len() {
            return Err(ValidationError::ShapeMismatch {
                what: "number of depths".to_owned(),
                expected: labels.len(),
                found: depths.len(),
            }
            .into());
        }
        Ok(DepthTable { labels, depths })
    }
    ///
    /// compute the depth of every point, one point per label
    ///
    pub fn from_coords(labels: Vec<String>, coords: &Coords, sweep: Sweep) -> Result<Self> {
        coords.check_n_points(labels.len())?;
        let depths = projection_depths(coords, sweep)?;
        info!("depth: computed for {} points", depths.len());
        DepthTable::new(labels, depths)
    }
    pub fn len(&self) -> usize {
        self.labels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }
    ///
    /// node indices from the most central (deepest) to the least.
    /// Ties keep the label order.
    ///
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.depths[b].total_cmp(&self.depths[a]));
        order
    }
    ///
    /// `(label, depth)` of the `k` deepest nodes
    ///
    pub fn top(&self, k: usize) -> Vec<(&str, f64)> {
        self.ranking()
            .into_iter()
            .take(k)
            .map(|i| (self.labels[i].as_str(), self.depths[i]))
            .collect()
    }
    ///
    /// TSV `label<TAB>depth` in label order
    ///
    pub fn to_writer<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        for (label, depth) in self.labels.iter().zip(self.depths.iter()) {
            writeln!(writer, "{}\t{}", label, depth)?;
        }
        writer.flush()
    }
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = FileWriter::create(path)?;
        self.to_writer(&mut writer)?;
        writer.finish()?;
        Ok(())
    }
}

//
// tests
//
