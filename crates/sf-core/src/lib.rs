/// Tables, configuration, and shared types for the Sahifeh decoder.
///
/// This crate holds the static per-byte data of the encoding and the types
/// shared between the decoding engine and the command-line tool.

pub mod charset;
pub mod config;
pub mod error;
pub mod section;
pub mod tables;

pub use config::{DecodeConfig, OutputFormat};
pub use error::CoreError;
pub use section::{PageMarker, SectionKind};
pub use tables::{CharacterMapping, Direction, JoiningClass, LatinOverlay, MappingTable};
