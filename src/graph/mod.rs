mod load;

use crate::errors::GraphError;
use crate::geometry::{Point, euclidean};

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;
use rustc_hash::FxHasher;

/// Use indexmap for fast lookups and rustc_hash for fast hashing
type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Hit-testing tolerance for [`Graph::node_near`], in pixels
pub const HIT_TOLERANCE: f64 = 5.0;

/// A directed adjacency entry: the destination node id and the arc cost
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edge {
    neighbor: usize,
    cost: u32,
}

/// Static, undirected graph of labeled 2D locations.
///
/// Nodes get dense integer ids in `[0, num_nodes)` assigned in load order:
/// the label index is an insertion-order-preserving map, so the map index of
/// a label *is* its id. Each undirected arc is stored as two directed
/// adjacency entries, one per endpoint, which keeps traversal symmetric.
///
/// A graph is built once by the loader (see [`Graph::from_file`]) and is
/// immutable afterward; any number of sequential shortest-path queries can
/// share it read-only.
pub struct Graph {
    nodes: FxIndexMap<String, Point>, // map index = dense node id
    adjacency: Vec<Vec<Edge>>,
    num_edges: usize, // directed entries, two per loaded arc
    tree: KdTree<f64, usize, [f64; 2]>, // stores location -> node id
}

impl Graph {
    /// Total node count
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total count of directed adjacency entries (two per loaded arc)
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Resolve a node's dense id from its label
    pub fn id_of(&self, label: &str) -> Result<usize, GraphError> {
        self.nodes
            .get_index_of(label)
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    /// Label of the node with the given id. Panics on an invalid id.
    pub fn label_of(&self, id: usize) -> &str {
        let (label, _) = self.nodes.get_index(id).unwrap();
        label
    }

    /// Location of the node with the given id. Panics on an invalid id.
    pub fn location_of(&self, id: usize) -> &Point {
        let (_, location) = self.nodes.get_index(id).unwrap();
        location
    }

    /// Iterate over a node's adjacency list as (neighbor id, cost) pairs.
    /// Iteration order is the order arcs appeared in the load file.
    pub fn neighbors_of(&self, id: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.adjacency[id].iter().map(|edge| (edge.neighbor, edge.cost))
    }

    /// All node labels, in id order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// All node locations, in id order. Used to display the nodes of the map.
    pub fn node_points(&self) -> Vec<Point> {
        self.nodes.values().cloned().collect()
    }

    /// Every directed adjacency entry as a (source, destination) segment.
    /// Used to display the edges of the map; each loaded arc appears twice,
    /// once per direction.
    pub fn edge_segments(&self) -> Vec<(Point, Point)> {
        let mut segments = Vec::with_capacity(self.num_edges);
        for (id, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                segments.push((
                    self.location_of(id).clone(),
                    self.location_of(edge.neighbor).clone(),
                ));
            }
        }
        segments
    }

    /// Turn an ordered id sequence into segments between consecutive nodes
    pub fn path_segments(&self, path: &[usize]) -> Vec<(Point, Point)> {
        path.windows(2)
            .map(|pair| (self.location_of(pair[0]).clone(), self.location_of(pair[1]).clone()))
            .collect()
    }

    /// Find the node at the given location, within [`HIT_TOLERANCE`].
    /// Returns None when no node is close enough.
    pub fn node_near(&self, point: &Point) -> Option<usize> {
        let found = self
            .tree
            .nearest(&[point.x, point.y], 1, &kt_squared_euclidean)
            .ok()?;
        let &(_, &id) = found.first()?;

        // kdtree reports squared distances; recompute the actual Euclidean
        // distance against the stored location before accepting the hit
        let location = self.location_of(id);
        if euclidean(point.x, point.y, location.x, location.y) <= HIT_TOLERANCE {
            Some(id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MAP: &str = "\
NODES
4
A 0 0
B 100 0
C 100 100
D 0 100
ARCS
A B 1
B C 2
A C 5
C D 1
";

    fn load(text: &str) -> Graph {
        Graph::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_ids_follow_file_order() {
        let graph = load(MAP);

        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.id_of("A"), Ok(0));
        assert_eq!(graph.id_of("D"), Ok(3));
        assert_eq!(graph.label_of(2), "C");
        assert_eq!(graph.labels().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_id_of_unknown_label() {
        let graph = load(MAP);

        assert_eq!(
            graph.id_of("Z"),
            Err(GraphError::UnknownLabel("Z".to_string()))
        );
    }

    #[test]
    fn test_arcs_are_stored_in_both_directions() {
        let graph = load(MAP);
        let a = graph.id_of("A").unwrap();
        let b = graph.id_of("B").unwrap();

        assert_eq!(graph.num_edges(), 8); // 4 arcs, two directions each

        let from_a: Vec<_> = graph.neighbors_of(a).collect();
        let from_b: Vec<_> = graph.neighbors_of(b).collect();
        assert!(from_a.contains(&(b, 1)));
        assert!(from_b.contains(&(a, 1)));
    }

    #[test]
    fn test_neighbor_iteration_is_restartable() {
        let graph = load(MAP);
        let c = graph.id_of("C").unwrap();

        let first: Vec<_> = graph.neighbors_of(c).collect();
        let second: Vec<_> = graph.neighbors_of(c).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3); // B, A, D
    }

    #[test]
    fn test_edge_segments_cover_every_directed_entry() {
        let graph = load(MAP);

        let segments = graph.edge_segments();
        assert_eq!(segments.len(), graph.num_edges());

        // The A->B entry maps to the endpoints' coordinates
        assert!(segments.contains(&(Point::new(0.0, 0.0), Point::new(100.0, 0.0))));
    }

    #[test]
    fn test_path_segments_joins_consecutive_nodes() {
        let graph = load(MAP);
        let path = [0, 1, 2]; // A, B, C

        let segments = graph.path_segments(&path);
        assert_eq!(
            segments,
            vec![
                (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
                (Point::new(100.0, 0.0), Point::new(100.0, 100.0)),
            ]
        );

        // A single-node path has no segments
        assert!(graph.path_segments(&[0]).is_empty());
    }

    #[test]
    fn test_node_near_respects_tolerance() {
        let graph = load(MAP);
        let b = graph.id_of("B").unwrap();

        assert_eq!(graph.node_near(&Point::new(103.0, 2.0)), Some(b));
        assert_eq!(graph.node_near(&Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_node_near_picks_the_closest_node() {
        let graph = load(MAP);

        // Exactly on a node, with other nodes in range of the index
        let a = graph.id_of("A").unwrap();
        assert_eq!(graph.node_near(&Point::new(0.0, 0.0)), Some(a));

        // Slightly closer to D than to C
        let d = graph.id_of("D").unwrap();
        assert_eq!(graph.node_near(&Point::new(2.0, 99.0)), Some(d));
    }
}
