use std::path::PathBuf;

/// Result type for prefpin operations
pub type Result<T> = std::result::Result<T, PrefError>;

/// Error types for profile reading, classification setup and output
#[derive(Debug, thiserror::Error)]
pub enum PrefError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Malformed prefs store at line {line_number}: {line}")]
    StoreParseError { line_number: usize, line: String },

    #[error("Invalid exclusion input: {0}")]
    InvalidExclusionInput(String),

    #[error("Invalid regex pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid preference name: {0:?}")]
    InvalidInput(String),

    #[error("Failed to write overrides to {}: {source}", .path.display())]
    OutputWriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),
}
