//!
//! Entry points of the `netdepth` subcommands
//!
use crate::apsp::shortest_paths_in_place_with;
use crate::config::{DepthConfig, DistanceConfig};
use crate::coords::Coords;
use crate::depth::DepthTable;
use crate::error::Result;
use crate::matrix::DistStats;
use crate::network::{numbered_labels, Network};
use crate::utils::timer;
use log::{info, warn};

///
/// network file -> shortest distance matrix file
///
/// 1. load and validate the network
/// 2. all-pairs shortest paths
/// 3. write the matrix
///
pub fn distance(config: &DistanceConfig) -> Result<DistStats> {
    let (network, t) = timer(|| Network::from_file(&config.input_path));
    let network = network?;
    info!(
        "loaded {} in {}ms: n_nodes={} n_edges={} n_components={}",
        config.input_path.display(),
        t,
        network.n_nodes(),
        network.n_edges(),
        network.n_components(),
    );
    info!("{}", network.degree_stats());

    let mut matrix = network.into_adjacency();
    let (ret, t) = timer(|| shortest_paths_in_place_with(&mut matrix, &config.apsp));
    ret?;
    info!("shortest paths computed in {}ms", t);

    let stats = matrix.stats();
    info!("{}", stats);
    if stats.n_disconnected_pairs > 0 {
        warn!(
            "{} pairs are disconnected; written as `inf`",
            stats.n_disconnected_pairs
        );
    }

    let (ret, t) = timer(|| matrix.to_file(&config.output_path));
    ret?;
    info!("wrote {} in {}ms", config.output_path.display(), t);
    Ok(stats)
}

///
/// coordinate file -> projection depth TSV
///
pub fn depth(config: &DepthConfig) -> Result<DepthTable> {
    let coords = Coords::from_file(&config.coords_path)?;
    info!(
        "loaded {}: n_points={} n_dims={}",
        config.coords_path.display(),
        coords.n_points(),
        coords.n_dims()
    );
    let labels = match &config.network_path {
        Some(path) => Network::from_file(path)?.labels().to_vec(),
        None => numbered_labels(coords.n_points()),
    };

    let (table, t) = timer(|| DepthTable::from_coords(labels, &coords, config.sweep));
    let table = table?;
    info!("depths computed in {}ms", t);
    for (rank, (label, depth)) in table.top(config.top).into_iter().enumerate() {
        info!("#{}\t{}\t{}", rank + 1, label, depth);
    }

    table.to_file(&config.output_path)?;
    info!("wrote {}", config.output_path.display());
    Ok(table)
}
