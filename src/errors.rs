use std::fmt;


/// Errors raised by the path planners
#[derive(Debug, thiserror::Error)]
pub enum PathPlannerError {
    #[error("predecessor chain is broken, no path could be rebuilt")]
    NoPathFound,
    #[error("location is not part of the graph: {0}")]
    UnknownLocation(String),
    #[error("population of {size} candidates is too small to evolve, at least 2 are needed")]
    PopulationTooSmall { size: usize },
    #[error("invalid genetic configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}


/// Errors raised while building or loading a graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("unable to read graph source: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("unknown location id {0}")]
    UnknownLocation(usize),
    #[error("unknown connection id {0}")]
    UnknownConnection(usize),
    #[error("location {0:?} is already declared")]
    DuplicateLocation(String),
    #[error("{0} and {1} are already connected")]
    DuplicateConnection(String, String),
    #[error("{0} cannot be connected to itself")]
    SelfLoop(String),
    #[error("weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),
}


/// What went wrong on a single line of graph text
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    FieldCount { expected: usize, found: usize },
    InvalidNumber { field: &'static str, value: String },
    UndeclaredLocation(String),
    Rejected(String), // record parsed but the graph refused it
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::FieldCount { expected, found } => {
                write!(f, "expected {expected} ';'-separated fields, found {found}")
            }
            ParseErrorKind::InvalidNumber { field, value } => {
                write!(f, "{field} is not a number: {value:?}")
            }
            ParseErrorKind::UndeclaredLocation(name) => {
                write!(f, "location {name:?} was not declared in a VERTICES block")
            }
            ParseErrorKind::Rejected(reason) => f.write_str(reason),
        }
    }
}
