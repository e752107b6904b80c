// Transcoding engine for the Sahifeh encoding.
//
// Byte stream -> signature scanner -> per-byte dispatch -> joining / bidi
// state -> formatter.

pub mod bidi;
pub mod decoder;
pub mod error;
pub mod format;
pub mod joining;
pub mod signature;
pub mod state;

pub use decoder::{DecodeReport, Decoder, Diagnostic, decode};
pub use error::DecodeError;
pub use format::Formatter;
