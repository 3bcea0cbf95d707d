use thiserror;

/// The Result type for term48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error: {0}")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("{source}")]
    EngineError {
        #[from]
        source: crate::engine::error::EngineError,
    },
}
