use thiserror::Error;

/// Errors surfaced by the shell. The tree, store and metrics are total and never fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of a print-mode report failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A `--drop` argument was not of the form `<id>:<a|b>`
    #[error("Invalid drop '{0}': expected <leaf id>:<a|b>, e.g. 3:a")]
    InvalidDrop(String),

    /// A `--drop` argument named a leaf outside [1, 2^depth]
    #[error("Leaf {leaf} is out of range for depth {depth} (valid: 1..={max})")]
    LeafOutOfRange {
        /// Requested leaf identifier
        leaf: u32,
        /// Configured tree depth
        depth: u32,
        /// Largest valid identifier
        max: u32,
    },

    /// A `--drop` path did not name one branch per level
    #[error("Path of {len} branches does not fit a tree {depth} levels deep")]
    PathLength {
        /// Number of branches given
        len: usize,
        /// Configured tree depth
        depth: u32,
    },

    /// The tracing subscriber could not be installed
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
