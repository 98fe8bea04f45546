use crate::errors::PathPlannerError;
use crate::graph::{LocationId, MapGraph};
use super::{trace_back, GraphNodeMap};

use std::{
    collections::BinaryHeap,
    hash::Hash,
    fmt::Debug,
    cmp::Ordering
};
use indexmap::map::Entry::{Occupied, Vacant};
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};



/// Frontier entry on the A* graph
#[derive(Debug)]
struct Node {
    index: usize, // index in the node map - maps to the Id of the node
    distance: f64, // distance recorded when the entry was pushed
}

// Min-heap on distance, ties broken on insertion index
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance
            .total_cmp(&self.distance)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Node {}

/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// The heuristic is folded into the stored distance: relaxing an edge records
/// `distance(current) + edge + h(neighbor)` and that running total is what the
/// frontier orders by and what later relaxations build on.
/// Bookkeeping (distance, predecessor) belongs to one call and is dropped with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar {}

impl AStar {

    /// Route between two locations of a map graph
    /// An unreachable goal yields the single element path `[goal]`.
    #[instrument(level = "debug", skip(self, graph))]
    pub fn find(&self, graph: &MapGraph, start: LocationId, goal: LocationId) -> Result<Vec<LocationId>, PathPlannerError> {
        let goal_location = graph
            .location(goal)
            .ok_or_else(|| PathPlannerError::UnknownLocation(format!("{goal:?}")))?;
        if graph.location(start).is_none() {
            return Err(PathPlannerError::UnknownLocation(format!("{start:?}")));
        }

        let path = self.plan(
            start,
            goal,
            |node: &LocationId| graph.weighted_neighbors(*node),
            |node: &LocationId| {
                graph
                    .location(*node)
                    .map_or(0.0, |location| location.heuristic(goal_location))
            },
        )?;
        debug!(len = path.len(), reached = path.first() == Some(&start), "a* finished");
        Ok(path)
    }

    /// From start node, expand the cheapest frontier node until the goal is popped
    /// or the frontier runs dry
    pub fn plan<N, IT, NN, H>(&self, start: N, goal: N, neighbors: NN, heuristic_fn: H) -> Result<Vec<N>, PathPlannerError>
    where
        N: Eq + Hash + Clone + Debug,
        NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
        H: Fn(&N) -> f64, // estimated distance to the goal
        IT: IntoIterator<Item = (N, f64)>, // Iterator of neighbors + edge cost to neighbor node
    {
        let (node_map, goal_index) = self.build_graph(start, &goal, neighbors, heuristic_fn);

        match goal_index {
            Some(goal_index) => trace_back(&node_map, goal_index),
            // goal never popped, it has no predecessor to walk back from
            None => Ok(vec![goal]),
        }
    }


    /// Traverses the graph using the folded A* relaxation
    /// Returns the per-run map of nodes with (predecessor, distance) along with the index of the goal node
    fn build_graph<N, IT, NN, H>(&self, start: N, goal: &N, neighbors: NN, heuristic_fn: H) -> (GraphNodeMap<N, f64>, Option<usize>)
    where
        N: Eq + Hash + Clone + Debug,
        NN: Fn(&N) -> IT,
        IT: IntoIterator<Item = (N, f64)>,
        H: Fn(&N) -> f64,
    {
        // Open List
        // Nodes waiting to be expanded, may hold stale duplicates
        let mut open_list: BinaryHeap<Node> = BinaryHeap::new();

        // Expanded nodes, stale frontier entries for these are skipped
        let mut visited: FxHashSet<usize> = FxHashSet::default();

        // Every node seen so far with (parent_index, distance)
        // for the start node, parent_index is set to usize::MAX to indicate it has no parent
        let mut node_map: GraphNodeMap<N, f64> = GraphNodeMap::default();

        let start_index = node_map.insert_full(start, (usize::MAX, 0.0)).0;
        open_list.push(Node {
            index: start_index,
            distance: 0.0,
        });

        while let Some(Node { index, .. }) = open_list.pop() {

            if !visited.insert(index) {
                continue;
            }

            let Some((node, &(_, distance))) = node_map.get_index(index) else {
                continue;
            };

            if node == goal {
                return (node_map, Some(index));
            }

            let node = node.clone();
            for (neighbor, edge_cost) in neighbors(&node) {

                if node_map
                    .get_index_of(&neighbor)
                    .is_some_and(|i| visited.contains(&i))
                {
                    continue;
                }

                let tentative = distance + edge_cost + heuristic_fn(&neighbor);

                let neighbor_index = match node_map.entry(neighbor) {
                    Vacant(e) => {
                        // unseen nodes start at +infinity
                        if tentative >= f64::INFINITY {
                            continue;
                        }
                        let i = e.index();
                        e.insert((index, tentative));
                        i
                    }
                    Occupied(mut e) => {
                        if tentative < e.get().1 {
                            e.insert((index, tentative));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                open_list.push(Node {
                    index: neighbor_index,
                    distance: tentative,
                });
            }
        }
        (node_map, None)
    }
}
