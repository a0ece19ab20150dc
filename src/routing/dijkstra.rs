use super::heap::IndexedMinHeap;

use num_traits::Zero;

/// Per-node search state for one query.
///
/// `dist` is None until the node is first relaxed (the "unseen" class);
/// `pred` is None for unseen nodes and for the source. `finalized` flips once
/// the node's distance is provably minimal and never flips back.
#[derive(Clone, Debug)]
pub(crate) struct SearchState<C> {
    pub dist: Option<C>,
    pub pred: Option<usize>,
    pub finalized: bool,
}

/// Dijkstra's algorithm over dense node ids
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// Traverses from `source`, relaxing neighbors in non-decreasing distance
/// order, and returns the full search table. When `target` is given the loop
/// stops as soon as that node is finalized - safe, since a finalized distance
/// never changes.
///
/// Edge costs must be non-negative; the caller (the loader) guarantees this.
pub(crate) fn shortest_path_tree<C, NN, IT>(
    num_nodes: usize,
    source: usize,
    target: Option<usize>,
    neighbors: NN,
) -> Vec<SearchState<C>>
where
    C: Zero + Ord + Copy,
    NN: Fn(usize) -> IT, // returns iterator of neighbors + edge costs
    IT: IntoIterator<Item = (usize, C)>,
{
    let mut table: Vec<SearchState<C>> = (0..num_nodes)
        .map(|_| SearchState {
            dist: None,
            pred: None,
            finalized: false,
        })
        .collect();

    // The source starts on the frontier with distance 0 and no predecessor
    table[source].dist = Some(C::zero());

    let mut queue = IndexedMinHeap::with_capacity(num_nodes);
    queue.insert(source, C::zero());

    // A queued node's priority always equals its tentative distance, so the
    // popped priority is the node's final distance
    while let Some((u, dist_u)) = queue.pop_min() {
        table[u].finalized = true;

        if target == Some(u) {
            break;
        }

        for (v, cost) in neighbors(u) {
            if table[v].finalized {
                continue;
            }

            let candidate = dist_u + cost;
            let improves = match table[v].dist {
                None => true,
                Some(dist_v) => candidate < dist_v,
            };
            if !improves {
                continue;
            }

            table[v].dist = Some(candidate);
            table[v].pred = Some(u);
            if queue.contains(v) {
                queue.decrease_key(v, candidate);
            } else {
                queue.insert(v, candidate);
            }
        }
    }

    table
}

/// Walk the predecessor chain backward from `destination` to `source`.
///
/// Returns the ordered path, endpoints inclusive, or None when the
/// destination was never reached.
pub(crate) fn trace_path<C>(
    table: &[SearchState<C>],
    source: usize,
    destination: usize,
) -> Option<Vec<usize>>
where
    C: Copy,
{
    table[destination].dist?;

    let mut path = vec![destination];
    let mut current = destination;
    while current != source {
        current = table[current].pred?;
        path.push(current);
    }

    // The path is in reverse order, so reverse it
    path.reverse();
    Some(path)
}
