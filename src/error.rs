use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum GeoNearestError {
    /// A caller-supplied argument violates an operation's precondition, e.g. `k == 0`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A text record could not be turned into a point.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeoNearestError>;
