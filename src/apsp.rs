//!
//! All-pairs shortest paths on a dense distance matrix (Floyd-Warshall)
//!
//! ```text
//! for k in 0..n:
//!     D[i][j] = min(D[i][j], D[i][k] + D[k][j])  for all (i, j)
//! ```
//!
//! Rounds over `k` run strictly in sequence. Within a round every row is
//! relaxed against a snapshot of row `k` taken at the start of the round,
//! so rows can be swept in any order, and in parallel. The parallel sweep
//! returns only after all rows are written, which is the barrier between
//! round `k` and round `k + 1`.
//!
//! Weights are assumed to be non-negative. Under that assumption row `k`
//! and column `k` are fixed points of round `k`, and the in-place update
//! needs no second matrix.
//!
use crate::dist::Dist;
use crate::error::Result;
use crate::matrix::DistMatrix;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use ndarray::parallel::prelude::*;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

///
/// How to sweep each round
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sweep {
    /// rows in order on the current thread
    Serial,
    /// rows distributed over the rayon thread pool
    Parallel,
}

///
/// Options of the shortest path engine
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApspOptions {
    pub sweep: Sweep,
    /// show a progress bar over rounds on stderr
    pub progress: bool,
}

impl Default for ApspOptions {
    fn default() -> Self {
        ApspOptions {
            sweep: Sweep::Parallel,
            progress: false,
        }
    }
}

impl ApspOptions {
    pub fn serial() -> Self {
        ApspOptions {
            sweep: Sweep::Serial,
            ..Default::default()
        }
    }
    pub fn parallel() -> Self {
        ApspOptions {
            sweep: Sweep::Parallel,
            ..Default::default()
        }
    }
}

///
/// Shortest distances between all pairs, as a fresh matrix.
///
/// The input must have a zero diagonal; it is validated before the
/// computation and rejected with `Error::Validation` otherwise.
///
pub fn shortest_paths(matrix: &DistMatrix) -> Result<DistMatrix> {
    shortest_paths_with(matrix, &ApspOptions::default())
}

///
/// `shortest_paths` with explicit options
///
pub fn shortest_paths_with(matrix: &DistMatrix, options: &ApspOptions) -> Result<DistMatrix> {
    let mut result = matrix.clone();
    shortest_paths_in_place_with(&mut result, options)?;
    Ok(result)
}

///
/// Overwrite `matrix` with the shortest distances.
///
/// On a validation error the matrix is left untouched.
///
pub fn shortest_paths_in_place(matrix: &mut DistMatrix) -> Result<()> {
    shortest_paths_in_place_with(matrix, &ApspOptions::default())
}

///
/// `shortest_paths_in_place` with explicit options
///
pub fn shortest_paths_in_place_with(matrix: &mut DistMatrix, options: &ApspOptions) -> Result<()> {
    matrix.validate()?;
    let n = matrix.n_nodes();
    info!("apsp: n_nodes={} sweep={:?}", n, options.sweep);

    let bar = if options.progress {
        let bar = ProgressBar::new(n as u64);
        if let Ok(style) =
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} rounds (eta {eta})")
        {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let d = matrix.as_array_mut();
    let mut row_k: Vec<Dist> = Vec::with_capacity(n);
    for k in 0..n {
        row_k.clear();
        row_k.extend(d.row(k).iter().copied());
        match options.sweep {
            Sweep::Serial => {
                for row_i in d.axis_iter_mut(Axis(0)) {
                    relax_row(row_i, k, &row_k);
                }
            }
            Sweep::Parallel => {
                d.axis_iter_mut(Axis(0))
                    .into_par_iter()
                    .for_each(|row_i| relax_row(row_i, k, &row_k));
            }
        }
        bar.inc(1);
        if k % 1000 == 999 {
            debug!("apsp: round {}/{} done", k + 1, n);
        }
    }
    bar.finish_and_clear();
    Ok(())
}

///
/// One row of round `k`
///
/// ```text
/// D[i][j] = min(D[i][j], D[i][k] + D[k][j])  for all j
/// ```
///
#[inline]
fn relax_row(mut row_i: ArrayViewMut1<'_, Dist>, k: usize, row_k: &[Dist]) {
    let d_ik = row_i[k];
    if d_ik.is_infinite() {
        // no path i -> k, so nothing goes through k
        return;
    }
    for (d_ij, &d_kj) in row_i.iter_mut().zip(row_k.iter()) {
        let via_k = d_ik + d_kj;
        if via_k < *d_ij {
            *d_ij = via_k;
        }
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::network::mocks::{mock_complete4, mock_path, mock_random, mock_two_components};

    const INF: f64 = f64::INFINITY;

    #[test]
    fn path_graph() {
        let net = mock_path(3, 1.0);
        let r = shortest_paths(net.adjacency()).unwrap();
        assert_eq!(r[(0, 2)], Dist::new(2.0));
        assert_eq!(r[(2, 0)], Dist::new(2.0));
        assert_eq!(r[(0, 1)], Dist::new(1.0));
        assert_eq!(r[(1, 1)], Dist::ZERO);
    }
    #[test]
    fn empty_and_single() {
        let r = shortest_paths(&DistMatrix::disconnected(0)).unwrap();
        assert!(r.is_empty());

        let m = DistMatrix::disconnected(1);
        let r = shortest_paths(&m).unwrap();
        assert_eq!(r, m);
        assert_eq!(r[(0, 0)], Dist::ZERO);
    }
    #[test]
    fn non_zero_diagonal_is_rejected() {
        let mut m = DistMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let before = m.clone();
        match shortest_paths_in_place(&mut m).unwrap_err() {
            Error::Validation(ValidationError::NonZeroDiagonal { index, .. }) => {
                assert_eq!(index, 1)
            }
            e => panic!("unexpected error {:?}", e),
        }
        // never silently fixed
        assert_eq!(m, before);
    }
    #[test]
    fn two_components() {
        let net = mock_two_components();
        let r = shortest_paths(net.adjacency()).unwrap();
        assert!(r[(0, 2)].is_infinite());
        assert!(r[(1, 3)].is_infinite());
        assert!(r[(3, 0)].is_infinite());
        assert_eq!(r[(0, 1)], Dist::new(1.0));
        assert_eq!(r[(2, 3)], Dist::new(2.0));
    }
    #[test]
    fn complete_graph_is_unchanged() {
        let net = mock_complete4();
        let r = shortest_paths(net.adjacency()).unwrap();
        assert_eq!(&r, net.adjacency());
    }
    #[test]
    fn directed_input() {
        // 0 -> 1 -> 2 -> 0 with a shortcut 0 -> 2 that is longer
        let m = DistMatrix::from_rows(&[
            vec![0.0, 1.0, 5.0],
            vec![INF, 0.0, 1.0],
            vec![1.0, INF, 0.0],
        ])
        .unwrap();
        for options in [ApspOptions::serial(), ApspOptions::parallel()].iter() {
            let r = shortest_paths_with(&m, options).unwrap();
            assert_eq!(r[(0, 2)], Dist::new(2.0));
            assert_eq!(r[(1, 0)], Dist::new(2.0));
            assert_eq!(r[(2, 1)], Dist::new(2.0));
            assert_eq!(r[(1, 2)], Dist::new(1.0));
            assert!(!r.is_symmetric());
        }
    }
    #[test]
    fn shortcut_through_many_hops() {
        // a long direct edge and a chain of short edges
        let mut m = mock_path(6, 1.0).into_adjacency();
        m.set(0, 5, Dist::new(100.0));
        m.set(5, 0, Dist::new(100.0));
        let r = shortest_paths(&m).unwrap();
        assert_eq!(r[(0, 5)], Dist::new(5.0));
        assert_eq!(r[(5, 0)], Dist::new(5.0));
    }
    #[test]
    fn serial_and_parallel_agree() {
        for seed in 0..4 {
            let net = mock_random(40, 0.08, 10.0, seed);
            let a = shortest_paths_with(net.adjacency(), &ApspOptions::serial()).unwrap();
            let b = shortest_paths_with(net.adjacency(), &ApspOptions::parallel()).unwrap();
            assert_eq!(a, b);
        }
    }
    #[test]
    fn in_place_equals_fresh() {
        let net = mock_random(25, 0.1, 5.0, 7);
        let fresh = shortest_paths(net.adjacency()).unwrap();
        let mut m = net.adjacency().clone();
        shortest_paths_in_place(&mut m).unwrap();
        assert_eq!(m, fresh);
    }
    #[test]
    fn progress_bar_does_not_change_result() {
        let net = mock_random(20, 0.2, 5.0, 3);
        let options = ApspOptions {
            sweep: Sweep::Serial,
            progress: true,
        };
        let a = shortest_paths_with(net.adjacency(), &options).unwrap();
        let b = shortest_paths(net.adjacency()).unwrap();
        assert_eq!(a, b);
    }
    #[test]
    fn options_serde() {
        let options = ApspOptions::serial();
        let s = serde_json::to_string(&options).unwrap();
        assert_eq!(s, r#"{"sweep":"Serial","progress":false}"#);
        let o: ApspOptions = serde_json::from_str(&s).unwrap();
        assert_eq!(o, options);
    }
}
