use thiserror::Error;

/// Main error type for the fxlayout-migrator crate.
///
/// The rewrite engine itself never fails; every variant here originates in the
/// file pipeline, configuration loading, or tree (de)serialization around it.
#[derive(Debug, Error)]
pub enum MigratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No files found matching the provided patterns")]
    NoFilesFound,

    #[error("Failed to parse template tree {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to write output to {path}: {message}")]
    OutputError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Security violation: {0}")]
    SecurityError(String),
}

pub type Result<T> = std::result::Result<T, MigratorError>;
