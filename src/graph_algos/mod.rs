
pub mod a_star;
mod shortest_path;

pub use a_star::AStar;

use shortest_path::trace_back;

use crate::collections::FxIndexMap;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Best known distance of the node for the current run
/// The tuple contains (parent_index, distance) where:
/// - parent_index is the index of the predecessor in the map, usize::MAX for the start
/// - distance is the best distance recorded for this node so far
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;
