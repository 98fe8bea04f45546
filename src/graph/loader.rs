use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use super::{Location, MapGraph};
use crate::errors::{GraphError, ParseErrorKind};


const VERTICES_HEADER: &str = "VERTICES";
const EDGES_HEADER: &str = "EDGES";

/// Which block of the file the current line belongs to
#[derive(Clone, Copy, Debug, PartialEq)]
enum Block {
    Outside,
    Vertices,
    Edges,
}

impl MapGraph {

    /// Build a graph from its text description
    ///
    /// ```text
    /// VERTICES
    /// name;x;y
    ///
    /// EDGES
    /// source;target;weight
    /// ```
    ///
    /// Blocks close on a blank line (the edge block also on end of input).
    /// Lines outside of a block are ignored. Any malformed record fails the whole load.
    pub fn parse(text: &str) -> Result<Self, GraphError> {
        let mut graph = MapGraph::new();
        let mut block = Block::Outside;

        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            let number = number + 1;

            match block {
                Block::Outside => {
                    block = match line {
                        VERTICES_HEADER => Block::Vertices,
                        EDGES_HEADER => Block::Edges,
                        _ => Block::Outside,
                    };
                }
                _ if line.is_empty() => block = Block::Outside,
                Block::Vertices => {
                    let location = parse_location(line).map_err(|kind| GraphError::Parse { line: number, kind })?;
                    graph
                        .add_location(location)
                        .map_err(|e| rejected(number, e))?;
                }
                Block::Edges => {
                    let [source, target, weight] = fields(line).map_err(|kind| GraphError::Parse { line: number, kind })?;
                    let resolve = |name: &str| {
                        graph.location_by_name(name).ok_or_else(|| GraphError::Parse {
                            line: number,
                            kind: ParseErrorKind::UndeclaredLocation(name.to_string()),
                        })
                    };
                    let a = resolve(source)?;
                    let b = resolve(target)?;
                    let weight = number_field("weight", weight).map_err(|kind| GraphError::Parse { line: number, kind })?;
                    graph
                        .add_connection(a, b, weight)
                        .map_err(|e| rejected(number, e))?;
                }
            }
        }

        debug!(
            locations = graph.location_count(),
            connections = graph.connection_count(),
            "graph loaded"
        );
        Ok(graph)
    }

    /// Read and parse a graph file
    /// I/O failures are reported as GraphError::Io, never as a parse error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }
}

impl FromStr for MapGraph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_location(line: &str) -> Result<Location, ParseErrorKind> {
    let [name, x, y] = fields(line)?;
    Ok(Location::new(name, number_field("x", x)?, number_field("y", y)?))
}

/// Split a record into exactly three trimmed fields
fn fields(line: &str) -> Result<[&str; 3], ParseErrorKind> {
    let parts: Vec<&str> = line.split(';').map(str::trim).collect();
    match parts.as_slice() {
        [first, second, third] => Ok([*first, *second, *third]),
        _ => Err(ParseErrorKind::FieldCount { expected: 3, found: parts.len() }),
    }
}

/// Parse a finite number, `NaN` and infinities are rejected like any other garbage
fn number_field(field: &'static str, value: &str) -> Result<f64, ParseErrorKind> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(ParseErrorKind::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn rejected(line: usize, error: GraphError) -> GraphError {
    GraphError::Parse {
        line,
        kind: ParseErrorKind::Rejected(error.to_string()),
    }
}
