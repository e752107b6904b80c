use sf_core::tables::JoiningClass;

/// Zero-width non-joiner, inserted between glyphs that must not connect.
pub const ZWNJ: char = '\u{200C}';

/// Tracks the joining class of the last emitted glyph.
///
/// A separator goes before the next glyph iff the previous one joins next
/// and the new one joins previous.
///
/// # Example
/// ```
/// use sf_core::tables::JoiningClass;
/// use sf_decode::joining::Joiner;
/// let mut joiner = Joiner::new();
/// assert!(!joiner.step(JoiningClass::JOINS_BOTH));
/// assert!(joiner.step(JoiningClass::JOINS_PREV));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joiner {
    prev: JoiningClass,
}

impl Default for Joiner {
    fn default() -> Self {
        Self::new()
    }
}

impl Joiner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prev: JoiningClass::NONE,
        }
    }

    /// Class of the last emitted glyph, `NONE` after a boundary.
    #[must_use]
    pub fn previous(&self) -> JoiningClass {
        self.prev
    }

    #[inline]
    #[must_use]
    pub fn needs_separator(&self, next: JoiningClass) -> bool {
        self.prev.contains(JoiningClass::JOINS_NEXT) && next.contains(JoiningClass::JOINS_PREV)
    }

    #[inline]
    pub fn advance(&mut self, class: JoiningClass) {
        self.prev = class;
    }

    /// Decide for `class`, then record it as the previous glyph.
    #[inline]
    pub fn step(&mut self, class: JoiningClass) -> bool {
        let separate = self.needs_separator(class);
        self.prev = class;
        separate
    }

    /// Forget the previous glyph.
    #[inline]
    pub fn reset(&mut self) {
        self.prev = JoiningClass::NONE;
    }
}
