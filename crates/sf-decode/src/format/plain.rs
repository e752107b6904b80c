use std::io::{self, Write};

use sf_core::config::OutputFormat;
use sf_core::section::{PageMarker, SectionKind};

use super::Formatter;

/// Plain UTF-8 text with bracketed section markers.
///
/// # Example
/// ```
/// use sf_core::section::SectionKind;
/// use sf_decode::format::{Formatter, PlainFormatter};
/// let mut out = Vec::new();
/// PlainFormatter.section_start(&mut out, SectionKind::Title).unwrap();
/// let label = SectionKind::Title.label().unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), format!(" !!! {label} !!! "));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Plain
    }

    fn page_break(&mut self, out: &mut dyn Write, marker: PageMarker) -> io::Result<()> {
        write!(
            out,
            "\n=================== volume {} page {} ====================\n",
            marker.volume, marker.page
        )
    }

    fn section_start(&mut self, out: &mut dyn Write, kind: SectionKind) -> io::Result<()> {
        match kind.label() {
            Some(label) => write!(out, " !!! {label} !!! "),
            None => write!(out, " !!! ناشناس [{:#04x}] !!! ", kind.to_byte()),
        }
    }

    fn section_end(&mut self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(" !!! پایان !!! ".as_bytes())
    }

    fn unknown_byte(&mut self, out: &mut dyn Write, byte: u8) -> io::Result<()> {
        write!(out, "<[{byte:#04x}]>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut PlainFormatter, &mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut PlainFormatter, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn page_banner() {
        let text = render(|f, out| f.page_break(out, PageMarker { volume: 2, page: 15 }));
        assert!(text.contains("volume 2"));
        assert!(text.contains("page 15"));
        assert!(text.starts_with('\n') && text.ends_with('\n'));
    }

    #[test]
    fn unknown_section_carries_raw_byte() {
        let text = render(|f, out| f.section_start(out, SectionKind::Unknown(0x3f)));
        assert!(text.contains("[0x3f]"));
    }

    #[test]
    fn unknown_byte_placeholder() {
        assert_eq!(render(|f, out| f.unknown_byte(out, 0x81)), "<[0x81]>");
    }

    #[test]
    fn section_end_marker() {
        assert_eq!(render(|f, out| f.section_end(out)), " !!! پایان !!! ");
    }
}
