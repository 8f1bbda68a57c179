use thiserror::Error;

/// Errors raised before any hull or intersection algorithm runs.
///
/// The algorithms themselves are total over validated input; every variant here
/// is a violated precondition reported synchronously to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    #[error("invalid input at index {index}: ({x}, {y}) is not finite")]
    InvalidInput { index: usize, x: f64, y: f64 },

    #[error("insufficient points: a polygon needs 3 hull vertices, found {found}")]
    InsufficientPoints { found: usize },

    #[error("degenerate segment: endpoints ({x}, {y}) coincide within tolerance")]
    DegenerateSegment { x: f64, y: f64 },

    #[error("invalid tolerance {name} = {value} (must be finite and > 0)")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("geometry configuration already installed")]
    ConfigAlreadyInstalled,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Convenience alias for results using [`GeomError`].
pub type Result<T> = std::result::Result<T, GeomError>;
