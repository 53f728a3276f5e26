//! DIMACS graph reader.
//!
//! Reads the edge format used by the graph coloring benchmarks:
//!
//! ```text
//! c comment
//! p edge 3 2
//! e 1 2
//! e 2 3
//! ```
//!
//! Node ids are 1-based in the file and 0-based in [`DimacsGraph`].
//! `p col N M` is accepted as a synonym of `p edge N M`.

use std::fs;
use std::path::Path;

use crate::coloring::{ColoringState, NodeId};
use crate::error::{ColoringError, Result};

/// A parsed DIMACS graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsGraph {
    /// Number of nodes declared in the header.
    pub node_count: usize,
    /// Number of edges declared in the header.
    pub declared_edges: usize,
    /// Zero-based edges, in file order.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl DimacsGraph {
    /// Builds an uncolored [`ColoringState`] from the parsed graph.
    pub fn to_state(&self) -> Result<ColoringState> {
        ColoringState::from_edges(self.node_count, &self.edges)
    }
}

/// Reads and parses a DIMACS file.
pub fn read_dimacs_file<P: AsRef<Path>>(path: P) -> Result<DimacsGraph> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_dimacs(&text)
}

/// Parses DIMACS text.
///
/// # Errors
///
/// [`ColoringError::InvalidArgument`] on a missing, malformed or repeated
/// header, an edge line before the header, an endpoint outside `[1, N]`,
/// or any other unrecognized line. A declared edge count that disagrees
/// with the number of edge lines is only logged.
///
/// # Examples
///
/// ```
/// use u_kcolor::dimacs::parse_dimacs;
///
/// let graph = parse_dimacs("c triangle\np edge 3 3\ne 1 2\ne 2 3\ne 1 3\n").unwrap();
/// assert_eq!(graph.node_count, 3);
/// assert_eq!(graph.edges, vec![(0, 1), (1, 2), (0, 2)]);
/// ```
pub fn parse_dimacs(text: &str) -> Result<DimacsGraph> {
    let mut header: Option<(usize, usize)> = None;
    let mut edges = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_num = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "p" => {
                if header.is_some() {
                    return Err(parse_error(line_num, "duplicate problem line"));
                }
                if parts.len() != 4 || !matches!(parts[1], "edge" | "col") {
                    return Err(parse_error(
                        line_num,
                        format!("expected 'p edge N M', got '{line}'"),
                    ));
                }
                let n = parse_count(parts[2], line_num, "node count")?;
                let m = parse_count(parts[3], line_num, "edge count")?;
                edges.reserve(m.min(1 << 20));
                header = Some((n, m));
            }
            "e" => {
                let (n, _) = header
                    .ok_or_else(|| parse_error(line_num, "edge line before problem line"))?;
                if parts.len() != 3 {
                    return Err(parse_error(
                        line_num,
                        format!("expected 'e U V', got '{line}'"),
                    ));
                }
                let u = parse_endpoint(parts[1], n, line_num)?;
                let v = parse_endpoint(parts[2], n, line_num)?;
                edges.push((u, v));
            }
            _ => {
                return Err(parse_error(
                    line_num,
                    format!("unrecognized line '{line}'"),
                ))
            }
        }
    }

    let (node_count, declared_edges) =
        header.ok_or_else(|| ColoringError::invalid("missing problem line 'p edge N M'"))?;
    if edges.len() != declared_edges {
        log::warn!(
            "dimacs: header declares {declared_edges} edges, found {}",
            edges.len()
        );
    }

    Ok(DimacsGraph {
        node_count,
        declared_edges,
        edges,
    })
}

fn parse_error(line_num: usize, message: impl AsRef<str>) -> ColoringError {
    ColoringError::invalid(format!("line {line_num}: {}", message.as_ref()))
}

fn parse_count(token: &str, line_num: usize, what: &str) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        parse_error(
            line_num,
            format!("invalid {what} '{token}': must be a non-negative integer"),
        )
    })
}

/// Converts a 1-based endpoint to a 0-based id, checking `1 <= id <= n`.
fn parse_endpoint(token: &str, n: usize, line_num: usize) -> Result<NodeId> {
    let id: i64 = token
        .parse()
        .map_err(|_| parse_error(line_num, format!("invalid endpoint '{token}'")))?;
    if id < 1 {
        return Err(parse_error(line_num, format!("endpoint {id} is below 1")));
    }
    let id = id as usize;
    if id > n {
        return Err(parse_error(
            line_num,
            format!("endpoint {id} exceeds node count {n}"),
        ));
    }
    Ok(id - 1)
}
