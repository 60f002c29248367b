//!
//! globally-available parts
//!
pub use crate::apsp::{shortest_paths, shortest_paths_in_place, ApspOptions, Sweep};
pub use crate::coords::Coords;
pub use crate::depth::DepthTable;
pub use crate::dist::Dist;
pub use crate::error::{Error, Result, ValidationError};
pub use crate::matrix::DistMatrix;
pub use crate::network::Network;
