mod dijkstra;
pub mod heap;

use crate::errors::RouteError;
use crate::geometry::Point;
use crate::graph::Graph;

/// The path stored after a successful query
struct ComputedPath {
    nodes: Vec<usize>,
    total_cost: u32,
}

/// Shortest-path query interface over a loaded [`Graph`].
///
/// Each call to [`Router::compute_shortest_path`] runs Dijkstra's algorithm
/// with freshly allocated per-query state; the router itself only retains the
/// most recent result, which [`Router::reset_path`] discards. The borrowed
/// graph stays read-only throughout.
pub struct Router<'g> {
    graph: &'g Graph,
    current: Option<ComputedPath>,
}

impl<'g> Router<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            current: None,
        }
    }

    /// Compute the shortest path between two labeled locations.
    ///
    /// Returns the ordered node-id sequence from origin to destination,
    /// endpoints inclusive; a query from a label to itself returns that
    /// single node. Fails with [`crate::errors::GraphError::UnknownLabel`]
    /// when either label is absent and with [`RouteError::NoPathExists`]
    /// when the destination is disconnected from the origin.
    pub fn compute_shortest_path(
        &mut self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<usize>, RouteError> {
        let source = self.graph.id_of(origin)?;
        let dest = self.graph.id_of(destination)?;

        let table = dijkstra::shortest_path_tree(
            self.graph.num_nodes(),
            source,
            Some(dest),
            |id| self.graph.neighbors_of(id),
        );

        let (Some(total_cost), Some(nodes)) =
            (table[dest].dist, dijkstra::trace_path(&table, source, dest))
        else {
            return Err(RouteError::NoPathExists {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        };

        log::debug!(
            "route {origin} -> {destination}: {} nodes, total cost {total_cost}",
            nodes.len()
        );

        self.current = Some(ComputedPath {
            nodes: nodes.clone(),
            total_cost,
        });
        Ok(nodes)
    }

    /// The most recently computed path, if any
    pub fn current_path(&self) -> Option<&[usize]> {
        self.current.as_ref().map(|path| path.nodes.as_slice())
    }

    /// Total cost of the most recently computed path, if any
    pub fn current_path_cost(&self) -> Option<u32> {
        self.current.as_ref().map(|path| path.total_cost)
    }

    /// The current path as drawable segments between consecutive nodes.
    /// None when no path has been computed.
    pub fn current_path_segments(&self) -> Option<Vec<(Point, Point)>> {
        self.current
            .as_ref()
            .map(|path| self.graph.path_segments(&path.nodes))
    }

    /// Discard the stored path
    pub fn reset_path(&mut self) {
        self.current = None;
    }
}
