//!
//! Small networks for tests and benchmarks
//!
use super::{numbered_labels, Network};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// 0 -- 1 -- 2 -- ... -- n-1 with all weights `w`
///
pub fn mock_path(n: usize, w: f64) -> Network {
    let edges: Vec<(usize, usize, f64)> = (1..n).map(|i| (i - 1, i, w)).collect();
    Network::from_edges(numbered_labels(n), &edges)
}

///
/// Two components {0, 1} and {2, 3}
///
/// ```text
/// 0 --1.0-- 1    2 --2.0-- 3
/// ```
///
pub fn mock_two_components() -> Network {
    Network::from_edges(numbered_labels(4), &[(0, 1, 1.0), (2, 3, 2.0)])
}

///
/// Complete graph of 4 nodes whose direct edges are all shorter than any
/// 2-hop detour (weights in `[1.0, 1.5]`).
///
pub fn mock_complete4() -> Network {
    Network::from_edges(
        numbered_labels(4),
        &[
            (0, 1, 1.0),
            (0, 2, 1.2),
            (0, 3, 1.5),
            (1, 2, 1.1),
            (1, 3, 1.3),
            (2, 3, 1.4),
        ],
    )
}

///
/// Erdos-Renyi random network: each pair is connected with probability
/// `p_edge` with a weight uniform in `[1, max_weight)`.
///
pub fn mock_random(n: usize, p_edge: f64, max_weight: f64, seed: u64) -> Network {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen_bool(p_edge) {
                let w: f64 = rng.gen_range(1.0..max_weight);
                edges.push((i, j, w));
            }
        }
    }
    Network::from_edges(numbered_labels(n), &edges)
}

//
// tests
//
