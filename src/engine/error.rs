use thiserror;

/// The Result type for board operations.
pub(crate) type Result<T> = std::result::Result<T, EngineError>;

#[derive(thiserror::Error, Debug, PartialEq)]
pub(crate) enum EngineError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("cell ({x}, {y}) out of bounds for a {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
