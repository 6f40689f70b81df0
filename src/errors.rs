use thiserror::Error;

/// Application-level errors: terminal, configuration and log setup.
/// Filesystem failures are [`crate::safety::FsError`] values instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;
