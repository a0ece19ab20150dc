use super::{Edge, FxIndexMap, Graph};
use crate::errors::LoadError;
use crate::geometry::Point;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use kdtree::KdTree;

/// Parse one whitespace-separated numeric field
fn parse_number<T: std::str::FromStr>(value: &str, line: usize) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

/// Next non-blank line with its 1-based line number
fn next_line<R: BufRead>(
    lines: &mut std::io::Lines<R>,
    line_no: &mut usize,
) -> Result<Option<(usize, String)>, std::io::Error> {
    for line in lines.by_ref() {
        *line_no += 1;
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(Some((*line_no, line)));
        }
    }
    Ok(None)
}

impl Graph {
    /// Load a graph from a file in the `NODES`/`ARCS` format
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a graph from the `NODES`/`ARCS` text format:
    ///
    /// ```text
    /// NODES
    /// <count>
    /// <label> <x> <y>     (count lines)
    /// ARCS
    /// <label1> <label2> <cost>
    /// ```
    ///
    /// Each arc line adds two directed adjacency entries, one per endpoint.
    /// Blank lines are skipped; a file that ends before `ARCS` yields a graph
    /// with no arcs. Costs are non-negative integers; a negative or
    /// non-numeric cost, a duplicate or unknown label, and a declared node
    /// count that does not match the node lines are all typed errors.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LoadError> {
        let mut lines = reader.lines();
        let mut line_no = 0usize;

        // NODES header
        match next_line(&mut lines, &mut line_no)? {
            Some((_, line)) if line.trim() == "NODES" => {}
            other => {
                let line = other.map(|(n, _)| n).unwrap_or(1);
                return Err(LoadError::MissingHeader {
                    line,
                    expected: "NODES",
                });
            }
        }

        // Declared node count
        let declared: usize = match next_line(&mut lines, &mut line_no)? {
            Some((n, line)) => parse_number(line.trim(), n)?,
            None => {
                return Err(LoadError::UnexpectedEof {
                    line: line_no + 1,
                    expected: "node count",
                });
            }
        };

        // Node lines until the ARCS header or EOF
        let mut nodes: FxIndexMap<String, Point> = FxIndexMap::default();
        let mut saw_arcs_header = false;
        while let Some((n, line)) = next_line(&mut lines, &mut line_no)? {
            if line.trim() == "ARCS" {
                saw_arcs_header = true;
                break;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(LoadError::FieldCount {
                    line: n,
                    expected: 3,
                    found: fields.len(),
                });
            }

            let x: f64 = parse_number(fields[1], n)?;
            let y: f64 = parse_number(fields[2], n)?;
            if !x.is_finite() || !y.is_finite() {
                return Err(LoadError::NonFiniteCoordinate { line: n });
            }

            let label = fields[0].to_string();
            if nodes.insert(label.clone(), Point::new(x, y)).is_some() {
                return Err(LoadError::DuplicateLabel { line: n, label });
            }
        }

        if nodes.len() != declared {
            return Err(LoadError::NodeCountMismatch {
                declared,
                found: nodes.len(),
            });
        }

        // Arc lines until EOF; each one adds both directed entries
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); nodes.len()];
        let mut num_edges = 0usize;
        if saw_arcs_header {
            while let Some((n, line)) = next_line(&mut lines, &mut line_no)? {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() != 3 {
                    return Err(LoadError::FieldCount {
                        line: n,
                        expected: 3,
                        found: fields.len(),
                    });
                }

                let resolve = |label: &str| {
                    nodes
                        .get_index_of(label)
                        .ok_or_else(|| LoadError::UnknownArcLabel {
                            line: n,
                            label: label.to_string(),
                        })
                };
                let from = resolve(fields[0])?;
                let to = resolve(fields[1])?;
                let cost: u32 = parse_number(fields[2], n)?;

                adjacency[from].push(Edge { neighbor: to, cost });
                adjacency[to].push(Edge { neighbor: from, cost });
                num_edges += 2;
            }
        }

        // Spatial index over node locations, for hit-testing.
        // Coordinates are already validated finite, so add cannot reject them.
        let mut tree = KdTree::new(2);
        for (id, location) in nodes.values().enumerate() {
            tree.add([location.x, location.y], id)?;
        }

        log::debug!(
            "loaded graph: {} nodes, {} directed edges",
            nodes.len(),
            num_edges
        );

        Ok(Graph {
            nodes,
            adjacency,
            num_edges,
            tree,
        })
    }
}
