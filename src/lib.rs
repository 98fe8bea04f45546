//! Route finding on weighted map graphs.
//!
//! Two planners share one graph model:
//!
//! - **A\***: deterministic best-first search guided by straight line distance
//!   to the goal ([`graph_algos::AStar`]).
//! - **Evolutionary search**: a population of random routes evolved over a
//!   fixed number of generations while connection weights change under it
//!   ([`genetic::GeneticSearch`]).
//!
//! Graphs are read from a small text format, see [`MapGraph::parse`].
//!
//! ```
//! let text = "VERTICES\nA;0;0\nB;1;0\nC;0;1\nD;1;1\n\nEDGES\nA;B;1\nB;D;1\nA;C;5\nC;D;1\n";
//! let graph = mapnav::load_graph(text).unwrap();
//! let a = graph.location(graph.location_by_name("A").unwrap()).unwrap().clone();
//! let d = graph.location(graph.location_by_name("D").unwrap()).unwrap().clone();
//!
//! let route = mapnav::a_star(&a, &d, &graph).unwrap();
//! let names: Vec<&str> = route.iter().map(|l| l.name()).collect();
//! assert_eq!(names, ["A", "B", "D"]);
//! ```

mod collections;
pub mod errors;
pub mod genetic;
pub mod geometry;
pub mod graph;
pub mod graph_algos;

use std::path::Path;

pub use errors::{GraphError, ParseErrorKind, PathPlannerError};
pub use genetic::{GeneticConfig, GeneticSearch};
pub use graph::{Connection, ConnectionId, Location, LocationId, MapGraph};
pub use graph_algos::AStar;


/// Parse a graph from its text description
pub fn load_graph(text: &str) -> Result<MapGraph, GraphError> {
    MapGraph::parse(text)
}

/// Read and parse a graph file
pub fn load_graph_from_path(path: impl AsRef<Path>) -> Result<MapGraph, GraphError> {
    MapGraph::from_path(path)
}

/// A* route between two locations
///
/// When the goal cannot be reached the route is just `[end]`, so callers can
/// compare the first element with `start` to tell the two cases apart.
pub fn a_star(start: &Location, end: &Location, graph: &MapGraph) -> Result<Vec<Location>, PathPlannerError> {
    let (start, end) = (id_of(graph, start)?, id_of(graph, end)?);
    let path = AStar::default().find(graph, start, end)?;
    Ok(graph.resolve(&path)?)
}

/// Evolutionary route between two locations
///
/// Random events rewrite connection weights of `graph`, those changes stay
/// after the call returns.
pub fn evolutionary_search(
    start: &Location,
    end: &Location,
    graph: &mut MapGraph,
    config: GeneticConfig,
) -> Result<Vec<Location>, PathPlannerError> {
    let (start, end) = (id_of(graph, start)?, id_of(graph, end)?);
    let path = GeneticSearch::new(config)?.find(graph, start, end)?;
    Ok(graph.resolve(&path)?)
}

fn id_of(graph: &MapGraph, location: &Location) -> Result<LocationId, PathPlannerError> {
    graph
        .location_id(location)
        .ok_or_else(|| PathPlannerError::UnknownLocation(location.to_string()))
}
