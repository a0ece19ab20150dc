use thiserror::Error;

/// Errors from resolving nodes against a loaded graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown location label `{0}`")]
    UnknownLabel(String),
}

/// Errors from a shortest-path query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("no path exists between `{origin}` and `{destination}`")]
    NoPathExists { origin: String, destination: String },
}

/// Errors from parsing the `NODES`/`ARCS` load format.
///
/// The loader surfaces every structural violation as a typed failure and
/// never yields a partially-initialized graph.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `{expected}` section header")]
    MissingHeader { line: usize, expected: &'static str },

    #[error("line {line}: invalid numeric field `{value}`")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: duplicate node label `{label}`")]
    DuplicateLabel { line: usize, label: String },

    #[error("line {line}: arc references unknown label `{label}`")]
    UnknownArcLabel { line: usize, label: String },

    #[error("declared {declared} nodes, found {found}")]
    NodeCountMismatch { declared: usize, found: usize },

    #[error("line {line}: node coordinate is not finite")]
    NonFiniteCoordinate { line: usize },

    #[error("line {line}: unexpected end of file, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("spatial index error: {0}")]
    SpatialIndex(String),
}

impl From<kdtree::ErrorKind> for LoadError {
    fn from(error: kdtree::ErrorKind) -> Self {
        LoadError::SpatialIndex(error.to_string())
    }
}
