//! Output formatters.
//!
//! A formatter renders the structural parts of the stream. Glyph bytes are
//! written by the decoder itself through the formatter's mapping table.

use std::io::{self, Write};

use sf_core::config::{DecodeConfig, OutputFormat};
use sf_core::section::{HORIZONTAL_RULE, PageMarker, SectionKind};
use sf_core::tables::MappingTable;

pub mod html;
pub mod plain;

pub use html::HtmlFormatter;
pub use plain::PlainFormatter;

/// Rendu des événements structurels d'un flux.
///
/// Implémenté par : `PlainFormatter`, `HtmlFormatter`.
///
/// # Example
/// ```
/// use std::io::{self, Write};
/// use sf_core::config::OutputFormat;
/// use sf_core::section::{PageMarker, SectionKind};
/// use sf_decode::format::Formatter;
///
/// struct Silent;
/// impl Formatter for Silent {
///     fn format(&self) -> OutputFormat { OutputFormat::Plain }
///     fn page_break(&mut self, _: &mut dyn Write, _: PageMarker) -> io::Result<()> { Ok(()) }
///     fn section_start(&mut self, _: &mut dyn Write, _: SectionKind) -> io::Result<()> { Ok(()) }
///     fn section_end(&mut self, _: &mut dyn Write) -> io::Result<()> { Ok(()) }
///     fn unknown_byte(&mut self, _: &mut dyn Write, _: u8) -> io::Result<()> { Ok(()) }
/// }
/// ```
pub trait Formatter {
    /// Format whose mapping table decodes glyphs.
    fn format(&self) -> OutputFormat;

    fn table(&self) -> &'static MappingTable {
        MappingTable::for_format(self.format())
    }

    /// Called once before the first byte.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn begin(&mut self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Render a page-break banner.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn page_break(&mut self, out: &mut dyn Write, marker: PageMarker) -> io::Result<()>;

    /// Open a section. Unknown kinds still open one.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn section_start(&mut self, out: &mut dyn Write, kind: SectionKind) -> io::Result<()>;

    /// Close the current section.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn section_end(&mut self, out: &mut dyn Write) -> io::Result<()>;

    /// Render the horizontal rule from the mapping table.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn horizontal_rule(&mut self, out: &mut dyn Write) -> io::Result<()> {
        match self.table().get(HORIZONTAL_RULE) {
            Some(rule) => out.write_all(rule.output.as_bytes()),
            None => Ok(()),
        }
    }

    /// Visible placeholder for a byte with no mapping.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn unknown_byte(&mut self, out: &mut dyn Write, byte: u8) -> io::Result<()>;

    /// Called once after the last byte.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    fn finish(&mut self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// Build the formatter selected by `config`.
#[must_use]
pub fn for_config(config: &DecodeConfig) -> Box<dyn Formatter> {
    match config.format {
        OutputFormat::Plain => Box::new(PlainFormatter),
        OutputFormat::Html => Box::new(HtmlFormatter::new(config.html.clone())),
    }
}
