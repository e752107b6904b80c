/// Control byte opening a section; followed by one kind byte.
pub const SECTION_START: u8 = 0x7D;
/// Alternate section opener, same payload as [`SECTION_START`].
pub const SECTION_START_ALT: u8 = 0x7E;
/// Control byte closing the current section.
pub const SECTION_END: u8 = 0x80;
/// Horizontal rule separating the body from its footnotes.
pub const HORIZONTAL_RULE: u8 = 0x85;

/// Semantic kind of a section, read from the byte after a section opener.
///
/// # Example
/// ```
/// use sf_core::section::SectionKind;
/// assert_eq!(SectionKind::from_byte(0x03), SectionKind::Hadith);
/// assert_eq!(SectionKind::from_byte(0x3F), SectionKind::Unknown(0x3F));
/// assert_eq!(SectionKind::Hadith.css_class(), Some("hadith"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Title,
    Hadith,
    Verse,
    Poem,
    Translation,
    Footnote,
    FootnoteVerse,
    FootnoteHadith,
    FootnotePoem,
    FootnoteNote,
    /// Kind byte outside the known set, kept raw.
    Unknown(u8),
}

impl SectionKind {
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::Title,
            0x03 => Self::Hadith,
            0x04 => Self::Verse,
            0x05 => Self::Poem,
            0x08 => Self::Translation,
            0x0B => Self::Footnote,
            0x0C => Self::FootnoteVerse,
            0x0D => Self::FootnoteHadith,
            0x0E => Self::FootnotePoem,
            0x0F => Self::FootnoteNote,
            other => Self::Unknown(other),
        }
    }

    /// Raw kind byte as it appears in the stream.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Title => 0x01,
            Self::Hadith => 0x03,
            Self::Verse => 0x04,
            Self::Poem => 0x05,
            Self::Translation => 0x08,
            Self::Footnote => 0x0B,
            Self::FootnoteVerse => 0x0C,
            Self::FootnoteHadith => 0x0D,
            Self::FootnotePoem => 0x0E,
            Self::FootnoteNote => 0x0F,
            Self::Unknown(byte) => byte,
        }
    }

    /// Persian label used by the plain-text marker.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        let label = match self {
            Self::Title => "عنوان",
            Self::Hadith => "حدیث",
            Self::Verse => "آیه",
            Self::Poem => "شعر",
            Self::Translation => "ترجمه",
            Self::Footnote => "پاورقی",
            Self::FootnoteVerse => "آیه در پاورقی",
            Self::FootnoteHadith => "حدیث در پاورقی",
            Self::FootnotePoem => "شعر در پاورقی",
            Self::FootnoteNote => "توضیح در پاورقی",
            Self::Unknown(_) => return None,
        };
        Some(label)
    }

    /// Class name of the HTML span.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        let class = match self {
            Self::Title => "title",
            Self::Hadith => "hadith",
            Self::Verse => "verse",
            Self::Poem => "poem",
            Self::Translation => "translation",
            Self::Footnote => "footnote",
            Self::FootnoteVerse => "footnote-verse",
            Self::FootnoteHadith => "footnote-hadith",
            Self::FootnotePoem => "footnote-poem",
            Self::FootnoteNote => "footnote-note",
            Self::Unknown(_) => return None,
        };
        Some(class)
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// Volume and page number carried by a page-break signature.
///
/// Rendered once and dropped; the decoder never keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub volume: u8,
    pub page: u16,
}
