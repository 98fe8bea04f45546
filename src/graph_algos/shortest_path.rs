use crate::errors::PathPlannerError;
use super::GraphNodeMap;

/// Follow parent links from the goal back to the start
/// Returns the ordered path as a vector of nodes from start to goal.
/// A chain longer than the map itself means the links loop, which is reported as NoPathFound.
pub(crate) fn trace_back<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>, PathPlannerError>
where
    N: Clone,
{
    let mut path = Vec::new();
    let mut current_index = goal_index;

    while current_index != usize::MAX {
        if path.len() > node_map.len() {
            return Err(PathPlannerError::NoPathFound);
        }
        let (node, &(parent_index, _)) = node_map
            .get_index(current_index)
            .ok_or(PathPlannerError::NoPathFound)?;
        path.push(node.clone());
        current_index = parent_index;
    }

    path.reverse();
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_back_orders_start_to_goal() {
        let mut node_map: GraphNodeMap<&str, f64> = GraphNodeMap::default();
        let a = node_map.insert_full("A", (usize::MAX, 0.0)).0;
        let c = node_map.insert_full("C", (a, 3.0)).0;
        let d = node_map.insert_full("D", (c, 4.0)).0;

        assert_eq!(trace_back(&node_map, d).unwrap(), vec!["A", "C", "D"]);
        assert_eq!(trace_back(&node_map, a).unwrap(), vec!["A"]);
    }

    #[test]
    fn test_trace_back_detects_broken_links() {
        let mut node_map: GraphNodeMap<&str, f64> = GraphNodeMap::default();
        node_map.insert("A", (7, 0.0));
        assert!(matches!(trace_back(&node_map, 0), Err(PathPlannerError::NoPathFound)));

        let mut looping: GraphNodeMap<&str, f64> = GraphNodeMap::default();
        looping.insert("A", (1, 0.0));
        looping.insert("B", (0, 1.0));
        assert!(matches!(trace_back(&looping, 1), Err(PathPlannerError::NoPathFound)));
    }
}
