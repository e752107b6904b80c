use std::fmt;
use std::io::Write;

use sf_core::config::DecodeConfig;
use sf_core::section::{HORIZONTAL_RULE, SECTION_END, SECTION_START, SECTION_START_ALT, SectionKind};
use sf_core::tables::{CharacterMapping, Direction, LatinOverlay, MappingTable};

use crate::error::DecodeError;
use crate::format::{self, Formatter};
use crate::signature::{ByteCursor, ControlEvent};
use crate::state::{DecoderState, Mode};

/// Non-fatal anomaly found while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Byte with no entry in the active table.
    UnknownByte { offset: usize, byte: u8 },
    /// Section opener followed by a kind byte outside the known set.
    UnknownSection { offset: usize, kind: u8 },
    /// Section opener as the very last byte.
    TruncatedSection { offset: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownByte { offset, byte } => {
                write!(f, "unknown byte: {byte:#04x} (offset {offset})")
            }
            Self::UnknownSection { offset, kind } => {
                write!(f, "unknown section kind: {kind:#04x} (offset {offset})")
            }
            Self::TruncatedSection { offset } => {
                write!(f, "section marker without kind byte (offset {offset})")
            }
        }
    }
}

/// Summary of a finished decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Input bytes read by the pass.
    pub bytes_in: usize,
    /// Page breaks seen.
    pub pages: usize,
    /// English runs opened.
    pub english_runs: usize,
    /// Anomalies, in input order.
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodeReport {
    /// Number of unknown-byte placeholders written.
    #[must_use]
    pub fn unknown_bytes(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnknownByte { .. }))
            .count()
    }
}

/// Single-pass decoder over a fully buffered input.
///
/// # Example
/// ```
/// use sf_core::config::DecodeConfig;
/// use sf_decode::Decoder;
/// let mut decoder = Decoder::new(&DecodeConfig::default());
/// let mut out = Vec::new();
/// let report = decoder.decode(&[0x01, 0x20, 0x02], &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "\u{06A9}\u{0647} \u{0628}\u{0647}");
/// assert!(report.diagnostics.is_empty());
/// ```
pub struct Decoder {
    formatter: Box<dyn Formatter>,
    table: &'static MappingTable,
    overlay: &'static LatinOverlay,
    null_is_line_break: bool,
}

impl Decoder {
    /// Decoder with the formatter selected by `config.format`.
    #[must_use]
    pub fn new(config: &DecodeConfig) -> Self {
        Self::with_formatter(format::for_config(config), config)
    }

    /// Decoder with a caller-supplied formatter.
    #[must_use]
    pub fn with_formatter(formatter: Box<dyn Formatter>, config: &DecodeConfig) -> Self {
        let table = formatter.table();
        Self {
            formatter,
            table,
            overlay: LatinOverlay::shared(),
            null_is_line_break: config.null_is_line_break,
        }
    }

    /// Decode `input` into `out`.
    ///
    /// Unknown bytes and section kinds are rendered as placeholders, logged,
    /// and listed in the report; decoding always runs to the end of input.
    ///
    /// # Errors
    /// Returns [`DecodeError::Io`] if writing to `out` fails. Output written
    /// before the failure stays written.
    pub fn decode(
        &mut self,
        input: &[u8],
        out: &mut dyn Write,
    ) -> Result<DecodeReport, DecodeError> {
        let mut cursor = ByteCursor::new(input);
        let mut state = DecoderState::new();
        let mut report = DecodeReport::default();

        self.formatter.begin(out)?;
        while !cursor.is_empty() {
            if let Some(event) = cursor.try_signature() {
                self.control(&mut state, out, event, &mut report)?;
                continue;
            }

            let offset = cursor.position();
            let Some(byte) = cursor.next_byte() else {
                break;
            };
            match byte {
                SECTION_START | SECTION_START_ALT => {
                    state.boundary(out)?;
                    let Some(kind_byte) = cursor.next_byte() else {
                        let diagnostic = Diagnostic::TruncatedSection { offset };
                        log::warn!("{diagnostic}");
                        report.diagnostics.push(diagnostic);
                        break;
                    };
                    let kind = SectionKind::from_byte(kind_byte);
                    if !kind.is_known() {
                        let diagnostic = Diagnostic::UnknownSection {
                            offset,
                            kind: kind_byte,
                        };
                        log::warn!("{diagnostic}");
                        report.diagnostics.push(diagnostic);
                    }
                    self.formatter.section_start(out, kind)?;
                }
                SECTION_END => {
                    state.boundary(out)?;
                    self.formatter.section_end(out)?;
                }
                HORIZONTAL_RULE => {
                    state.boundary(out)?;
                    self.formatter.horizontal_rule(out)?;
                }
                _ => self.glyph(&mut state, out, byte, offset, &mut report)?,
            }
        }
        report.bytes_in = cursor.position();
        state.finish(out)?;
        self.formatter.finish(out)?;

        log::debug!(
            "decoded {} bytes, {} pages, {} diagnostics",
            report.bytes_in,
            report.pages,
            report.diagnostics.len()
        );
        Ok(report)
    }

    fn control(
        &mut self,
        state: &mut DecoderState,
        out: &mut dyn Write,
        event: ControlEvent,
        report: &mut DecodeReport,
    ) -> Result<(), DecodeError> {
        match event {
            ControlEvent::NewPage(marker) => {
                log::debug!("volume {} page {}", marker.volume, marker.page);
                state.boundary(out)?;
                report.pages += 1;
                self.formatter.page_break(out, marker)?;
            }
            ControlEvent::EnglishStart => {
                log::trace!("english run start");
                state.switch_mode(out, Mode::English)?;
                report.english_runs += 1;
            }
            ControlEvent::EnglishEnd => {
                log::trace!("english run end");
                state.switch_mode(out, Mode::Script)?;
            }
        }
        Ok(())
    }

    fn glyph(
        &mut self,
        state: &mut DecoderState,
        out: &mut dyn Write,
        byte: u8,
        offset: usize,
        report: &mut DecodeReport,
    ) -> Result<(), DecodeError> {
        match state.mode() {
            Mode::English => match self.overlay.get(byte) {
                Some(ch) => state.buffer_latin(ch),
                None => self.unknown(state, out, byte, offset, report)?,
            },
            Mode::Script => match self.lookup(byte) {
                // Deliberately dropped byte: no output, no state change.
                Some(mapping) if mapping.output.is_empty() => {}
                Some(mapping) if mapping.direction == Direction::Ltr => {
                    state.buffer_ltr(mapping.output);
                }
                Some(mapping) => state.emit(out, mapping)?,
                None => self.unknown(state, out, byte, offset, report)?,
            },
        }
        Ok(())
    }

    fn lookup(&self, byte: u8) -> Option<CharacterMapping> {
        if byte == 0x00 && !self.null_is_line_break {
            return None;
        }
        self.table.get(byte)
    }

    fn unknown(
        &mut self,
        state: &mut DecoderState,
        out: &mut dyn Write,
        byte: u8,
        offset: usize,
        report: &mut DecodeReport,
    ) -> Result<(), DecodeError> {
        let diagnostic = Diagnostic::UnknownByte { offset, byte };
        log::warn!("{diagnostic}");
        report.diagnostics.push(diagnostic);
        state.boundary(out)?;
        self.formatter.unknown_byte(out, byte)?;
        Ok(())
    }
}

/// Decode `input` with the formatter selected by `config`.
///
/// # Errors
/// Returns [`DecodeError::Io`] if writing to `out` fails.
///
/// # Example
/// ```
/// use sf_core::config::DecodeConfig;
/// let mut out = Vec::new();
/// let report = sf_decode::decode(&[0x8E, 0x8F, 0x20], &DecodeConfig::default(), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "\u{06F2}\u{06F1}\u{200F} ");
/// assert_eq!(report.bytes_in, 3);
/// ```
pub fn decode(
    input: &[u8],
    config: &DecodeConfig,
    out: &mut dyn Write,
) -> Result<DecodeReport, DecodeError> {
    Decoder::new(config).decode(input, out)
}
