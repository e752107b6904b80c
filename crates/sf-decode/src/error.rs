use thiserror::Error;

/// Errors originating from the decode module.
///
/// Malformed input never produces an error; anomalies are reported as
/// [`crate::decoder::Diagnostic`] values instead. Only the output sink can fail.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Writing to the output sink failed.
    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),
}
