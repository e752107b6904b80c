use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Input shorter than the fixed header it should start with.
    #[error("truncated header: expected {expected} bytes, found {found}")]
    TruncatedHeader {
        /// Header length in bytes.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },
}
