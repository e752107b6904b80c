//! Per-byte lookup tables for the Sahifeh encoding.
//!
//! Two primary tables exist, one per output format. They share every glyph
//! entry and differ only in a handful of layout controls (line break, tab,
//! horizontal rule). A third table, the Latin overlay, replaces the primary
//! one while an English run is active.

use std::sync::OnceLock;

use bitflags::bitflags;

use crate::config::OutputFormat;

bitflags! {
    /// Sides on which a Unicode renderer would join a glyph to its
    /// neighbour although the source form shows no connection there.
    ///
    /// The flags are the opposite of the drawn shape. `JOINS_PREV` is set
    /// when the form is unconnected on its leading side (isolated or
    /// initial), `JOINS_NEXT` when it is unconnected on its trailing side
    /// (isolated or final). Medial forms, connected on both sides, carry no
    /// flag; isolated forms of dual-joining letters carry both. A separator
    /// is needed where a `JOINS_NEXT` glyph meets a `JOINS_PREV` one.
    ///
    /// # Example
    /// ```
    /// use sf_core::tables::JoiningClass;
    /// assert!(JoiningClass::JOINS_BOTH.contains(JoiningClass::JOINS_NEXT));
    /// assert!(JoiningClass::NONE.is_empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct JoiningClass: u8 {
        /// Accepts joining from the preceding glyph.
        const JOINS_PREV = 0b01;
        /// Presents itself as wanting to join the following glyph.
        const JOINS_NEXT = 0b10;
        /// Both sides.
        const JOINS_BOTH = Self::JOINS_PREV.bits() | Self::JOINS_NEXT.bits();
    }
}

impl JoiningClass {
    /// No joining on either side (spaces, punctuation, digits, marks).
    pub const NONE: Self = Self::empty();
}

/// Logical writing direction of a glyph inside the right-to-left stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Emitted in stream order.
    #[default]
    Rtl,
    /// Collected into a bidi run and reordered on flush.
    Ltr,
}

/// Decoded form of a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterMapping {
    /// UTF-8 output. Empty for bytes that are deliberately dropped.
    pub output: &'static str,
    /// Joining behaviour, identical across output formats.
    pub joining: JoiningClass,
    /// Direction of the glyph.
    pub direction: Direction,
}

const NONE: JoiningClass = JoiningClass::NONE;
const PREV: JoiningClass = JoiningClass::JOINS_PREV;
const NEXT: JoiningClass = JoiningClass::JOINS_NEXT;
const BOTH: JoiningClass = JoiningClass::JOINS_BOTH;

/// First and last byte of the digit range. Digits are the only
/// left-to-right glyphs of the primary table.
pub const DIGIT_FIRST: u8 = 0x8D;
pub const DIGIT_LAST: u8 = 0x96;

/// Glyph entries shared by both formats: (byte, output, joining class).
///
/// Letter classes follow the presentation form the byte encodes: isolated
/// forms of dual-joining letters take `BOTH`, final forms `NEXT`, initial
/// forms `PREV`, medial forms nothing. Right-joining letters never take
/// `NEXT`. Bytes documented as covering two forms take the side they share.
#[rustfmt::skip]
const GLYPHS: &[(u8, &str, JoiningClass)] = &[
    // Whole-word ligatures.
    (0x01, "\u{06A9}\u{0647}", BOTH),          // ke
    (0x02, "\u{0628}\u{0647}", BOTH),          // be
    (0x03, "\u{0631}\u{0627}", PREV),          // ra
    (0x04, "\u{062F}\u{0631}", PREV),          // dar
    (0x05, "\u{0627}\u{06CC}\u{0646}", BOTH),  // in
    (0x06, "\u{0627}\u{0632}", PREV),          // az
    (0x07, "\u{0627}\u{0633}\u{062A}", BOTH),  // ast
    (0x08, "\u{0645}\u{0627}", PREV),          // ma

    // Space and punctuation.
    (0x20, " ", NONE),
    (0x65, ".", NONE),
    (0x66, ":", NONE),
    (0x67, "\u{061B}", NONE),
    (0x69, "\u{060C}", NONE),
    (0x6A, "\u{061F}", NONE),
    (0x6B, "(", NONE),
    (0x6C, ")", NONE),
    (0x6D, "[", NONE),
    (0x6E, "]", NONE),
    (0x71, "!", NONE),
    (0x72, "-", NONE),
    (0x73, "\u{00AB}", NONE),
    (0x74, "\u{00BB}", NONE),
    (0x77, "/", NONE),
    (0x7A, "*", NONE),

    // Extended Arabic-Indic digits.
    (0x8D, "\u{06F0}", NONE),
    (0x8E, "\u{06F1}", NONE),
    (0x8F, "\u{06F2}", NONE),
    (0x90, "\u{06F3}", NONE),
    (0x91, "\u{06F4}", NONE),
    (0x92, "\u{06F5}", NONE),
    (0x93, "\u{06F6}", NONE),
    (0x94, "\u{06F7}", NONE),
    (0x95, "\u{06F8}", NONE),
    (0x96, "\u{06F9}", NONE),

    // Harakat, tanwin and shadda combinations.
    (0x97, "\u{064E}", NONE),
    (0x98, "\u{0650}", NONE),
    (0x99, "\u{064F}", NONE),
    (0x9A, "\u{0670}", NONE),
    (0x9B, "\u{0656}", NONE),
    (0x9C, "\u{064B}", NONE),
    (0x9D, "\u{064D}", NONE),
    (0xA1, "\u{064C}", NONE),
    (0xA2, "\u{0651}\u{064E}", NONE),
    (0xA4, "\u{0651}\u{0650}", NONE),
    (0xA5, "\u{0651}\u{064F}", NONE),
    // Shadda with dagger alef: dropped on purpose, renders badly.
    (0xA8, "", NONE),
    (0xA9, "\u{0651}\u{064B}", NONE),
    (0xAA, "\u{0651}\u{064D}", NONE),
    (0xAB, "\u{0651}\u{064C}", NONE),
    (0xAC, "\u{0651}", NONE),
    (0xAD, "\u{0652}", NONE),

    // Alef family and hamza.
    (0xB0, "\u{0622}", PREV),   // alef madda, isolated
    (0xB1, "\u{0622}", NONE),   // alef madda, final
    (0xB2, "\u{0627}", PREV),   // alef, isolated
    (0xB3, "\u{0627}", NONE),   // alef, final
    (0xB4, "\u{0621}", NONE),   // hamza
    (0xB5, "\u{0623}", PREV),   // alef hamza above, word start
    (0xB6, "\u{0623}", NONE),   // alef hamza above, final
    (0xB7, "\u{0625}", PREV),   // alef hamza below, word start
    (0xB8, "\u{0625}", NONE),   // alef hamza below, final
    (0xB9, "\u{0624}", NONE),   // waw hamza, final
    (0xBA, "\u{0626}", NEXT),   // yeh hamza, final
    (0xBC, "\u{0626}", PREV),   // yeh hamza, initial

    // Dual-joining letters in final / initial / medial forms.
    (0xBD, "\u{0628}", NEXT),
    (0xBE, "\u{0628}", PREV),
    (0xBF, "\u{067E}", NEXT),
    (0xC0, "\u{067E}", NONE),
    (0xC1, "\u{062A}", NEXT),
    (0xC2, "\u{062A}", NONE),
    (0xC3, "\u{0629}", PREV),   // teh marbuta, isolated
    (0xC4, "\u{062B}", NEXT),
    (0xC5, "\u{062B}", PREV),
    (0xC6, "\u{062C}", NEXT),
    (0xC7, "\u{062C}", PREV),
    (0xC8, "\u{0686}", NEXT),
    (0xC9, "\u{0686}", PREV),
    (0xCA, "\u{062D}", NEXT),
    (0xCB, "\u{062D}", PREV),
    (0xCC, "\u{062E}", NEXT),
    (0xCD, "\u{062E}", NONE),   // initial and medial

    // Right-joining letters.
    (0xCE, "\u{062F}", NONE),   // dal, isolated and final
    (0xCF, "\u{0630}", PREV),   // thal, isolated
    (0xD0, "\u{0631}", NONE),
    (0xD1, "\u{0632}", NONE),   // isolated and final
    (0xD2, "\u{0698}", NONE),

    (0xD3, "\u{0633}", NEXT),
    (0xD4, "\u{0633}", PREV),
    (0xD5, "\u{0634}", BOTH),   // isolated
    (0xD6, "\u{0634}", NONE),   // initial and medial
    (0xD7, "\u{0635}", NEXT),
    (0xD8, "\u{0635}", NONE),
    (0xD9, "\u{0636}", NEXT),
    (0xDA, "\u{0636}", PREV),
    (0xDB, "\u{0637}", PREV),
    (0xDC, "\u{0638}", PREV),
    (0xDD, "\u{0639}", BOTH),
    (0xDE, "\u{0639}", NEXT),
    (0xDF, "\u{0639}", PREV),
    (0xE1, "\u{0639}", NONE),
    (0xE2, "\u{063A}", BOTH),
    (0xE3, "\u{063A}", NEXT),
    (0xE4, "\u{063A}", PREV),
    (0xE5, "\u{063A}", NONE),
    (0xE6, "\u{0641}", NEXT),
    (0xE7, "\u{0641}", NONE),
    (0xE8, "\u{0642}", BOTH),
    (0xE9, "\u{0642}", PREV),
    (0xEA, "\u{06A9}", NEXT),
    (0xEB, "\u{06A9}", NONE),
    (0xEC, "\u{06AF}", NEXT),
    (0xED, "\u{06AF}", PREV),
    (0xEE, "\u{0644}", BOTH),
    (0xF0, "\u{0644}", NONE),   // initial and medial
    (0xF1, "\u{0645}", BOTH),
    (0xF2, "\u{0645}", PREV),
    (0xF3, "\u{0646}", BOTH),
    (0xF4, "\u{0646}", PREV),
    (0xF5, "\u{0647}", NEXT),   // final and isolated
    (0xF6, "\u{0647}", NEXT),   // final, followed by ezafe
    (0xF7, "\u{0647}", PREV),
    (0xF8, "\u{0648}", NONE),   // final and isolated
    (0xF9, "\u{06CC}", BOTH),
    (0xFA, "\u{064A}", BOTH),   // arabic yeh, isolated
    (0xFB, "\u{06CC}", NEXT),
    (0xFC, "\u{064A}", NEXT),
    (0xFD, "\u{06CC}", NONE),   // initial and medial
];

/// Layout controls of the plain-text format.
const PLAIN_CONTROLS: &[(u8, &str)] = &[
    (0x00, "\n"),
    (0x75, "\n"),
    (0x76, "\t"),
    (0x85, "--------------------"),
];

/// Layout controls of the HTML format.
const HTML_CONTROLS: &[(u8, &str)] = &[
    (0x00, "<br />\n"),
    (0x75, "<br />\n"),
    (0x76, "&emsp;&emsp;"),
    (0x85, "\n<hr />\n"),
];

/// 256-entry table from input byte to [`CharacterMapping`].
///
/// Built once per format and never mutated afterwards.
///
/// # Example
/// ```
/// use sf_core::config::OutputFormat;
/// use sf_core::tables::{JoiningClass, MappingTable};
/// let table = MappingTable::for_format(OutputFormat::Plain);
/// let space = table.get(0x20).unwrap();
/// assert_eq!(space.output, " ");
/// assert_eq!(space.joining, JoiningClass::NONE);
/// assert!(table.get(0x81).is_none());
/// ```
#[derive(Debug)]
pub struct MappingTable {
    entries: [Option<CharacterMapping>; 256],
}

static PLAIN_TABLE: OnceLock<MappingTable> = OnceLock::new();
static HTML_TABLE: OnceLock<MappingTable> = OnceLock::new();
static LATIN_OVERLAY: OnceLock<LatinOverlay> = OnceLock::new();

impl MappingTable {
    /// Shared table for the given output format, built on first use.
    #[must_use]
    pub fn for_format(format: OutputFormat) -> &'static Self {
        match format {
            OutputFormat::Plain => PLAIN_TABLE.get_or_init(|| Self::build(PLAIN_CONTROLS)),
            OutputFormat::Html => HTML_TABLE.get_or_init(|| Self::build(HTML_CONTROLS)),
        }
    }

    fn build(controls: &[(u8, &'static str)]) -> Self {
        let mut entries = [None; 256];
        for &(byte, output, joining) in GLYPHS {
            debug_assert!(entries[usize::from(byte)].is_none(), "duplicate glyph {byte:#04x}");
            let direction = if is_digit(byte) {
                Direction::Ltr
            } else {
                Direction::Rtl
            };
            entries[usize::from(byte)] = Some(CharacterMapping {
                output,
                joining,
                direction,
            });
        }
        for &(byte, output) in controls {
            debug_assert!(entries[usize::from(byte)].is_none(), "duplicate control {byte:#04x}");
            entries[usize::from(byte)] = Some(CharacterMapping {
                output,
                joining: NONE,
                direction: Direction::Rtl,
            });
        }
        Self { entries }
    }

    /// Mapping for `byte`, or `None` if the byte is not part of the encoding.
    #[inline]
    #[must_use]
    pub fn get(&self, byte: u8) -> Option<CharacterMapping> {
        self.entries[usize::from(byte)]
    }

    /// Number of byte values with an entry.
    #[must_use]
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

/// `true` for the ten digit bytes.
#[inline]
#[must_use]
pub fn is_digit(byte: u8) -> bool {
    (DIGIT_FIRST..=DIGIT_LAST).contains(&byte)
}

/// Single-character Latin substitutions used inside English runs.
///
/// # Example
/// ```
/// use sf_core::tables::LatinOverlay;
/// let overlay = LatinOverlay::shared();
/// assert_eq!(overlay.get(0x8D), Some('A'));
/// assert_eq!(overlay.get(0xC0), Some('z'));
/// assert_eq!(overlay.get(0x01), None);
/// ```
#[derive(Debug)]
pub struct LatinOverlay {
    entries: [Option<char>; 256],
}

impl LatinOverlay {
    /// Shared overlay table, built on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        LATIN_OVERLAY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut entries = [None; 256];
        entries[0x20] = Some(' ');
        // Parentheses are stored mirrored inside English runs.
        entries[0x6A] = Some(')');
        entries[0x6B] = Some('(');
        for (byte, ch) in (0x8D..=0xA6u8).zip('A'..='Z') {
            entries[usize::from(byte)] = Some(ch);
        }
        for (byte, ch) in (0xA7..=0xC0u8).zip('a'..='z') {
            entries[usize::from(byte)] = Some(ch);
        }
        Self { entries }
    }

    /// Latin character for `byte`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, byte: u8) -> Option<char> {
        self.entries[usize::from(byte)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_agree_on_glyphs() {
        let plain = MappingTable::for_format(OutputFormat::Plain);
        let html = MappingTable::for_format(OutputFormat::Html);
        assert_eq!(plain.mapped_count(), html.mapped_count());
        for byte in 0..=255u8 {
            match (plain.get(byte), html.get(byte)) {
                (Some(p), Some(h)) => {
                    assert_eq!(p.joining, h.joining, "joining differs at {byte:#04x}");
                    assert_eq!(p.direction, h.direction);
                    if !PLAIN_CONTROLS.iter().any(|&(b, _)| b == byte) {
                        assert_eq!(p.output, h.output, "glyph differs at {byte:#04x}");
                    }
                }
                (None, None) => {}
                _ => panic!("coverage differs at {byte:#04x}"),
            }
        }
    }

    #[test]
    fn flags_mark_unconnected_sides() {
        let table = MappingTable::for_format(OutputFormat::Plain);
        let class = |byte| table.get(byte).map(|m| m.joining);
        assert_eq!(class(0xD5), Some(JoiningClass::JOINS_BOTH)); // sheen, isolated
        assert_eq!(class(0xBD), Some(JoiningClass::JOINS_NEXT)); // beh, final
        assert_eq!(class(0xBE), Some(JoiningClass::JOINS_PREV)); // beh, initial
        assert_eq!(class(0xC0), Some(JoiningClass::NONE)); // peh, medial
    }

    #[test]
    fn controls_differ_between_formats() {
        let plain = MappingTable::for_format(OutputFormat::Plain);
        let html = MappingTable::for_format(OutputFormat::Html);
        assert_eq!(plain.get(0x75).map(|m| m.output), Some("\n"));
        assert_eq!(html.get(0x75).map(|m| m.output), Some("<br />\n"));
        assert_eq!(plain.get(0x76).map(|m| m.output), Some("\t"));
        assert_ne!(html.get(0x76).map(|m| m.output), Some("\t"));
    }

    #[test]
    fn coverage_matches_glyph_list() {
        let table = MappingTable::for_format(OutputFormat::Plain);
        assert_eq!(table.mapped_count(), GLYPHS.len() + PLAIN_CONTROLS.len());
        // Signature lead bytes and structural controls stay unmapped.
        for byte in [0x7D, 0x7E, 0x80, 0x81, 0x82] {
            assert!(table.get(byte).is_none(), "{byte:#04x} should be unmapped");
        }
    }

    #[test]
    fn only_digits_are_left_to_right() {
        let table = MappingTable::for_format(OutputFormat::Plain);
        for byte in 0..=255u8 {
            if let Some(m) = table.get(byte) {
                let ltr = m.direction == Direction::Ltr;
                assert_eq!(ltr, is_digit(byte), "direction of {byte:#04x}");
            }
        }
    }

    #[test]
    fn outputs_are_valid_text() {
        let table = MappingTable::for_format(OutputFormat::Plain);
        let empty: Vec<u8> = (0..=255u8)
            .filter(|&b| table.get(b).is_some_and(|m| m.output.is_empty()))
            .collect();
        assert_eq!(empty, vec![0xA8]);
        assert_eq!(table.get(0x05).map(|m| m.output.len()), Some(6));
    }

    #[test]
    fn word_ligatures_join_both_sides() {
        let table = MappingTable::for_format(OutputFormat::Plain);
        assert_eq!(table.get(0x01).map(|m| m.joining), Some(BOTH));
        assert_eq!(table.get(0x02).map(|m| m.joining), Some(BOTH));
        assert_eq!(table.get(0x03).map(|m| m.joining), Some(PREV));
    }

    #[test]
    fn overlay_alphabet() {
        let overlay = LatinOverlay::shared();
        let upper: String = (0x8D..=0xA6u8).filter_map(|b| overlay.get(b)).collect();
        let lower: String = (0xA7..=0xC0u8).filter_map(|b| overlay.get(b)).collect();
        assert_eq!(upper, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(lower, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(overlay.get(0x6C), None);
        assert_eq!(overlay.get(0xC1), None);
    }
}
