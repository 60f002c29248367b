//!
//! Weighted undirected network loaded from a labeled edge list
//!
//! # Network format
//!
//! ```text
//! *Vertices 4          <- header (ignored)
//! 1 YAL001C            <- label lines: the second token is the label
//! 2 YBR123W
//! 3 YDL045C
//! 4 YGR001W
//! *Edges               <- end of labels
//! 1 2 0.5              <- edge lines: 1-based endpoints and weight
//! 2 3 1.0
//! ```
//!
//! Every edge is recorded in both directions. When the same pair appears
//! twice, the last line wins.
//!
pub mod mocks;

use crate::dist::Dist;
use crate::error::{Error, Result, ValidationError};
use crate::io::{numbered_lines, open_reader, FileWriter};
use crate::matrix::DistMatrix;
use log::{debug, warn};
use petgraph::graph::UnGraph;
use std::path::Path;
use std::str::FromStr;

/// marker line separating labels and edges
pub const EDGES_MARKER: &str = "*Edges";

///
/// Labels and dense adjacency matrix of a network
///
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    /// label of node `i`
    labels: Vec<String>,
    /// `adjacency[(i, j)]` = weight of edge `(i, j)` or `Dist::INFINITY`
    adjacency: DistMatrix,
    /// `neighbors[i]` = list of `(j, weight)`, each node owning its own list
    neighbors: Vec<Vec<(usize, Dist)>>,
}

impl Network {
    ///
    /// Constructor from labels and a square adjacency matrix
    ///
    /// The number of labels must equal the number of nodes and the
    /// adjacency matrix must pass `DistMatrix::validate`.
    ///
    pub fn new(labels: Vec<String>, adjacency: DistMatrix) -> Result<Self> {
        if labels.len() != adjacency.n_nodes() {
            return Err(ValidationError::ShapeMismatch {
                what: "number of labels".to_owned(),
                expected: adjacency.n_nodes(),
                found: labels.len(),
            }
            .into());
        }
        adjacency.validate()?;
        let neighbors = neighbors_of(&adjacency);
        Ok(Network {
            labels,
            adjacency,
            neighbors,
        })
    }
    ///
    /// Constructor from labels and undirected edges `(a, b, weight)` with
    /// 0-based endpoints. Self-loops are ignored and later edges overwrite
    /// earlier ones.
    ///
    /// # Panics
    ///
    /// if an endpoint is out of range or a weight is NaN.
    ///
    pub fn from_edges(labels: Vec<String>, edges: &[(usize, usize, f64)]) -> Self {
        let mut adjacency = DistMatrix::disconnected(labels.len());
        for &(a, b, w) in edges {
            assert!(
                a < labels.len() && b < labels.len(),
                "edge ({}, {}) is out of range",
                a,
                b
            );
            if a != b {
                add_edge(&mut adjacency, a, b, Dist::new(w));
            }
        }
        let neighbors = neighbors_of(&adjacency);
        Network {
            labels,
            adjacency,
            neighbors,
        }
    }
    ///
    /// the number of nodes
    ///
    pub fn n_nodes(&self) -> usize {
        self.labels.len()
    }
    ///
    /// the number of undirected edges (unordered pairs with a finite weight)
    ///
    pub fn n_edges(&self) -> usize {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(i, ns)| ns.iter().filter(|(j, _)| *j > i).count())
            .sum()
    }
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }
    pub fn adjacency(&self) -> &DistMatrix {
        &self.adjacency
    }
    pub fn into_adjacency(self) -> DistMatrix {
        self.adjacency
    }
    ///
    /// neighbors of the node with the edge weights, in increasing index order
    ///
    pub fn neighbors(&self, node: usize) -> &[(usize, Dist)] {
        &self.neighbors[node]
    }
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors[node].len()
    }
    pub fn degree_stats(&self) -> DegreeStats {
        let degrees: Vec<usize> = (0..self.n_nodes()).map(|v| self.degree(v)).collect();
        DegreeStats {
            min: degrees.iter().copied().min().unwrap_or(0),
            max: degrees.iter().copied().max().unwrap_or(0),
            mean: if degrees.is_empty() {
                0.0
            } else {
                degrees.iter().sum::<usize>() as f64 / degrees.len() as f64
            },
            n_isolated: degrees.iter().filter(|&&d| d == 0).count(),
        }
    }
    ///
    /// Convert into petgraph undirected graph (one edge per unordered pair)
    ///
    /// Node index `i` of the graph corresponds to node `i` of the network.
    ///
    pub fn to_graph(&self) -> UnGraph<String, f64> {
        let mut graph = UnGraph::with_capacity(self.n_nodes(), self.n_edges());
        let nodes: Vec<_> = self
            .labels
            .iter()
            .map(|label| graph.add_node(label.clone()))
            .collect();
        for (i, ns) in self.neighbors.iter().enumerate() {
            for &(j, w) in ns.iter().filter(|(j, _)| *j > i) {
                graph.add_edge(nodes[i], nodes[j], w.to_value());
            }
        }
        graph
    }
    ///
    /// the number of connected components
    ///
    pub fn n_components(&self) -> usize {
        petgraph::algo::connected_components(&self.to_graph())
    }
}

///
/// labels `"1"`, `"2"`, ..., `"n"`, used when only coordinates are known
///
pub fn numbered_labels(n: usize) -> Vec<String> {
    (1..=n).map(|i| i.to_string()).collect()
}

fn add_edge(adjacency: &mut DistMatrix, a: usize, b: usize, w: Dist) {
    adjacency.set(a, b, w);
    adjacency.set(b, a, w);
}

fn neighbors_of(adjacency: &DistMatrix) -> Vec<Vec<(usize, Dist)>> {
    let n = adjacency.n_nodes();
    (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| j != i)
                .map(|j| (j, adjacency.get(i, j)))
                .filter(|(_, w)| w.is_finite())
                .collect()
        })
        .collect()
}

///
/// Parse an edge line `a b w` into 0-based `(a, b, w)`.
/// Returns the reason on failure.
///
fn parse_edge(text: &str, n_nodes: usize) -> std::result::Result<(usize, usize, Dist), String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(format!(
            "edge line needs 3 tokens `a b w` but has {}",
            tokens.len()
        ));
    }
    let endpoint = |token: &str| -> std::result::Result<usize, String> {
        let v: usize = token
            .parse()
            .map_err(|_| format!("endpoint `{}` is not a positive integer", token))?;
        if v == 0 || v > n_nodes {
            Err(format!("endpoint {} is out of range 1..={}", v, n_nodes))
        } else {
            Ok(v - 1)
        }
    };
    let a = endpoint(tokens[0])?;
    let b = endpoint(tokens[1])?;
    let w: f64 = tokens[2]
        .parse()
        .map_err(|_| format!("weight `{}` is not a number", tokens[2]))?;
    if w.is_nan() || w == f64::NEG_INFINITY {
        return Err(format!("weight `{}` is not a valid distance", tokens[2]));
    }
    Ok((a, b, Dist::new(w)))
}

///
/// Network format
///
impl Network {
    ///
    /// parse the network format
    ///
    pub fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self> {
        let mut lines = numbered_lines(reader);

        // (1) header
        match lines.next() {
            Some(line) => {
                line?;
            }
            None => return Err(Error::parse(1, "", "missing header line")),
        }

        // (2) labels
        let mut labels = Vec::new();
        let mut has_marker = false;
        for line in &mut lines {
            let (i, text) = line?;
            if text.contains(EDGES_MARKER) {
                has_marker = true;
                break;
            }
            if text.trim().is_empty() {
                continue;
            }
            match text.split_whitespace().nth(1) {
                Some(label) => labels.push(label.to_owned()),
                None => {
                    return Err(Error::parse(
                        i,
                        text.as_str(),
                        "label line needs at least 2 tokens `index label`",
                    ))
                }
            }
        }
        if !has_marker {
            warn!("no `{}` line found; the network has no edges", EDGES_MARKER);
        }

        // (3) edges
        let n = labels.len();
        let mut adjacency = DistMatrix::disconnected(n);
        for line in lines {
            let (i, text) = line?;
            if text.trim().is_empty() {
                continue;
            }
            let (a, b, w) =
                parse_edge(&text, n).map_err(|reason| Error::parse(i, text.as_str(), reason))?;
            if a == b {
                warn!("line {}: self-loop on node {} ignored", i, a + 1);
                continue;
            }
            if w < Dist::ZERO {
                warn!("line {}: negative weight {} on edge ({}, {})", i, w, a + 1, b + 1);
            }
            if adjacency.get(a, b).is_finite() {
                debug!("line {}: edge ({}, {}) overwritten", i, a + 1, b + 1);
            }
            add_edge(&mut adjacency, a, b, w);
        }

        Network::new(labels, adjacency)
    }
    ///
    /// parse a network file with `from_reader`
    ///
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = open_reader(path)?;
        Self::from_reader(reader)
    }
    ///
    /// write the network format (one line per undirected edge)
    ///
    pub fn to_writer<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "*Vertices {}", self.n_nodes())?;
        for (i, label) in self.labels.iter().enumerate() {
            writeln!(writer, "{} {}", i + 1, label)?;
        }
        writeln!(writer, "{}", EDGES_MARKER)?;
        for (i, ns) in self.neighbors.iter().enumerate() {
            for (j, w) in ns.iter().filter(|(j, _)| *j > i) {
                writeln!(writer, "{} {} {}", i + 1, j + 1, w)?;
            }
        }
        writer.flush()
    }
    ///
    /// create a network file with `to_writer`
    ///
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = FileWriter::create(path)?;
        self.to_writer(&mut writer)?;
        writer.finish()?;
        Ok(())
    }
}

impl FromStr for Network {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

///
/// Degree distribution summary
///
#[derive(Clone, Debug, PartialEq)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// nodes with no edges
    pub n_isolated: usize,
}

impl std::fmt::Display for DegreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "degree min={} max={} mean={:.3} n_isolated={}",
            self.min, self.max, self.mean, self.n_isolated
        )
    }
}

//
// tests
//
