//!
//! Shortest path distances and data depth of weighted networks
//!
//! * `network`: load a labeled edge list into a dense adjacency matrix
//! * `apsp`: all-pairs shortest paths on the matrix
//! * `depth`: projection depth of the embedded nodes
//!
pub mod apsp;
pub mod cli;
pub mod config;
pub mod coords;
pub mod depth;
pub mod dist;
pub mod error;
pub mod io;
pub mod matrix;
pub mod network;
pub mod prelude;
pub mod utils;

#[cfg(test)]
#[macro_use]
extern crate approx;
