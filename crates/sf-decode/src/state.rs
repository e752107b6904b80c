use std::io::{self, Write};

use sf_core::tables::{CharacterMapping, JoiningClass};

use crate::bidi::BidiRun;
use crate::joining::{Joiner, ZWNJ};

/// Which table decodes glyph bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Primary mapping table.
    #[default]
    Script,
    /// Latin overlay table; every glyph is left-to-right.
    English,
}

/// Mutable state of one decode pass.
///
/// Owned by the pass and dropped with it. The pending run must be flushed
/// at every structural boundary and at end of input, which [`Self::boundary`]
/// and [`Self::finish`] do.
///
/// # Example
/// ```
/// use sf_core::tables::{CharacterMapping, Direction, JoiningClass};
/// use sf_decode::state::DecoderState;
/// let word = CharacterMapping { output: "ab", joining: JoiningClass::JOINS_BOTH, direction: Direction::Rtl };
/// let mut state = DecoderState::new();
/// let mut out = Vec::new();
/// state.emit(&mut out, word).unwrap();
/// state.emit(&mut out, word).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "ab\u{200C}ab");
/// ```
#[derive(Debug, Default)]
pub struct DecoderState {
    mode: Mode,
    joiner: Joiner,
    run: BidiRun,
}

impl DecoderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn previous_joining(&self) -> JoiningClass {
        self.joiner.previous()
    }

    /// Left-to-right text waiting for a flush, in output order.
    #[must_use]
    pub fn pending_run(&self) -> String {
        self.run.reordered()
    }

    /// Flush the pending run, then forget the previous glyph.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    pub fn boundary(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.run.flush(out)?;
        self.joiner.reset();
        Ok(())
    }

    /// Switch mode at a boundary.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    pub fn switch_mode(&mut self, out: &mut dyn Write, mode: Mode) -> io::Result<()> {
        self.boundary(out)?;
        self.mode = mode;
        Ok(())
    }

    /// Emit a right-to-left glyph, preceded by a separator when needed.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    pub fn emit(&mut self, out: &mut dyn Write, mapping: CharacterMapping) -> io::Result<()> {
        // The run must go out before the separator decision.
        self.run.flush(out)?;
        if self.joiner.step(mapping.joining) {
            let mut buf = [0u8; 4];
            out.write_all(ZWNJ.encode_utf8(&mut buf).as_bytes())?;
        }
        out.write_all(mapping.output.as_bytes())
    }

    /// Buffer a left-to-right unit from the primary table.
    pub fn buffer_ltr(&mut self, unit: &str) {
        self.run.push(unit);
        self.joiner.reset();
    }

    /// Buffer a Latin overlay character.
    pub fn buffer_latin(&mut self, ch: char) {
        self.run.push_char(ch);
        self.joiner.reset();
    }

    /// End of input: flush whatever is still pending.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    pub fn finish(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.boundary(out)
    }
}

#[cfg(test)]
mod tests {
    use sf_core::tables::Direction;

    use super::*;
    use crate::bidi::RLM;

    fn glyph(output: &'static str, joining: JoiningClass) -> CharacterMapping {
        CharacterMapping {
            output,
            joining,
            direction: Direction::Rtl,
        }
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn boundary_flushes_and_resets() {
        let mut state = DecoderState::new();
        let mut out = Vec::new();
        state.emit(&mut out, glyph("a", JoiningClass::JOINS_BOTH)).unwrap();
        state.buffer_ltr("1");
        state.boundary(&mut out).unwrap();
        assert_eq!(text(out), format!("a1{RLM}"));
        assert!(state.pending_run().is_empty());
        assert_eq!(state.previous_joining(), JoiningClass::NONE);
    }

    #[test]
    fn run_start_is_a_joining_discontinuity() {
        let mut state = DecoderState::new();
        let mut out = Vec::new();
        state.emit(&mut out, glyph("a", JoiningClass::JOINS_BOTH)).unwrap();
        state.buffer_ltr("1");
        state.emit(&mut out, glyph("b", JoiningClass::JOINS_BOTH)).unwrap();
        assert_eq!(text(out), format!("a1{RLM}b"));
    }

    #[test]
    fn mode_switch_flushes_latin_run() {
        let mut state = DecoderState::new();
        let mut out = Vec::new();
        state.switch_mode(&mut out, Mode::English).unwrap();
        state.buffer_latin('i');
        state.buffer_latin('H');
        assert_eq!(state.pending_run(), "Hi");
        state.switch_mode(&mut out, Mode::Script).unwrap();
        assert_eq!(state.mode(), Mode::Script);
        assert_eq!(text(out), format!("Hi{RLM}"));
    }

    #[test]
    fn finish_with_nothing_pending_is_silent() {
        let mut state = DecoderState::new();
        let mut out = Vec::new();
        state.finish(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
