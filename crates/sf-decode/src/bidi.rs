use std::io::{self, Write};

/// Right-to-left mark appended after every flushed run.
pub const RLM: char = '\u{200F}';

/// Pending left-to-right run (digits, English text).
///
/// The stream stores these runs in visual right-to-left order. Units are
/// kept in stream order along with their start offsets, and flushing writes
/// them last-to-first, each unit unchanged, followed by [`RLM`].
///
/// # Example
/// ```
/// use sf_decode::bidi::{BidiRun, RLM};
/// let mut run = BidiRun::default();
/// run.push("2");
/// run.push("1");
/// let mut out = Vec::new();
/// assert!(run.flush(&mut out).unwrap());
/// assert_eq!(String::from_utf8(out).unwrap(), format!("12{RLM}"));
/// ```
#[derive(Debug, Default)]
pub struct BidiRun {
    text: String,
    starts: Vec<usize>,
}

impl BidiRun {
    /// Append one already-mapped unit.
    pub fn push(&mut self, unit: &str) {
        self.starts.push(self.text.len());
        self.text.push_str(unit);
    }

    pub fn push_char(&mut self, ch: char) {
        self.starts.push(self.text.len());
        self.text.push(ch);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Buffered text in output order, as [`Self::flush`] would write it
    /// minus the marker.
    #[must_use]
    pub fn reordered(&self) -> String {
        let mut s = String::with_capacity(self.text.len());
        let mut end = self.text.len();
        for &start in self.starts.iter().rev() {
            s.push_str(&self.text[start..end]);
            end = start;
        }
        s
    }

    /// Write the run and its marker, then clear it.
    ///
    /// Returns `false` without writing anything when the run is empty. The
    /// buffer is cleared even if the write fails.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    pub fn flush(&mut self, out: &mut dyn Write) -> io::Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        let mut run = self.reordered();
        self.text.clear();
        self.starts.clear();
        run.push(RLM);
        out.write_all(run.as_bytes())?;
        Ok(true)
    }
}
