use std::io::{self, Write};

use sf_core::config::{HtmlOptions, OutputFormat};
use sf_core::section::{PageMarker, SectionKind};

use super::Formatter;

const INLINE_STYLE: &str = "\
body { font-family: \"Noto Naskh Arabic\", \"B Nazanin\", serif; line-height: 1.9; margin: 2em; }
.page { display: block; margin: 1.5em 0; padding-top: 0.5em; border-top: 1px solid #ccc; color: #888; text-align: center; }
.title { display: block; font-size: 1.3em; font-weight: bold; }
.hadith, .footnote-hadith { color: #1b5e20; }
.verse, .footnote-verse { color: #0d47a1; }
.poem, .footnote-poem { font-style: italic; }
.translation { color: #555; }
.footnote, .footnote-verse, .footnote-hadith, .footnote-poem, .footnote-note { font-size: 0.85em; }
.unknown { color: #c62828; font-family: monospace; }
";

const FOOTER: &str = "\n</body>\n</html>\n";

/// HTML document with one `<span>` per section.
///
/// Only one span is tracked: opening a section while another is open closes
/// the first one.
///
/// # Example
/// ```
/// use sf_core::config::HtmlOptions;
/// use sf_core::section::SectionKind;
/// use sf_decode::format::{Formatter, HtmlFormatter};
/// let mut f = HtmlFormatter::new(HtmlOptions::default());
/// let mut out = Vec::new();
/// f.section_start(&mut out, SectionKind::Poem).unwrap();
/// f.section_end(&mut out).unwrap();
/// f.section_end(&mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "<span class=\"poem\"></span>");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlFormatter {
    options: HtmlOptions,
    open_span: bool,
}

impl HtmlFormatter {
    #[must_use]
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            open_span: false,
        }
    }

    /// `true` while a section span is open.
    #[must_use]
    pub fn has_open_span(&self) -> bool {
        self.open_span
    }

    fn close_span(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if self.open_span {
            self.open_span = false;
            out.write_all(b"</span>")?;
        }
        Ok(())
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn begin(&mut self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(
            out,
            "<html lang=\"{}\" dir=\"rtl\">",
            escape_html(&self.options.lang)
        )?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\" />")?;
        writeln!(out, "<title>{}</title>", escape_html(&self.options.title))?;
        match &self.options.stylesheet {
            Some(href) => writeln!(
                out,
                "<link rel=\"stylesheet\" href=\"{}\" />",
                escape_html(href)
            )?,
            None => write!(out, "<style>\n{INLINE_STYLE}</style>\n")?,
        }
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")
    }

    fn page_break(&mut self, out: &mut dyn Write, marker: PageMarker) -> io::Result<()> {
        write!(
            out,
            "\n<span class=\"page\" data-volume=\"{}\" data-page=\"{}\">جلد {} صفحه {}</span>\n",
            marker.volume,
            marker.page,
            persian_digits(u32::from(marker.volume)),
            persian_digits(u32::from(marker.page)),
        )
    }

    fn section_start(&mut self, out: &mut dyn Write, kind: SectionKind) -> io::Result<()> {
        self.close_span(out)?;
        match kind.css_class() {
            Some(class) => write!(out, "<span class=\"{class}\">")?,
            None => write!(out, "<span class=\"section-{:02x}\">", kind.to_byte())?,
        }
        self.open_span = true;
        Ok(())
    }

    fn section_end(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.close_span(out)
    }

    fn unknown_byte(&mut self, out: &mut dyn Write, byte: u8) -> io::Result<()> {
        write!(out, "<span class=\"unknown\">[{byte:#04x}]</span>")
    }

    fn finish(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.close_span(out)?;
        out.write_all(FOOTER.as_bytes())
    }
}

/// Render a number with Extended Arabic-Indic digits.
///
/// # Example
/// ```
/// use sf_decode::format::html::persian_digits;
/// assert_eq!(persian_digits(15), "\u{06F1}\u{06F5}");
/// ```
#[must_use]
pub fn persian_digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| char::from_u32(0x06F0 + d))
                .unwrap_or(c)
        })
        .collect()
}

/// Escape text for use in element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&#39;"),
            _ => s.push(c),
        }
    }
    s
}
