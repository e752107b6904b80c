//! Cursor over the input bytes and detection of 3-byte control signatures.
//!
//! A signature is the low 24 bits of a little-endian 4-byte read. Matching
//! needs four bytes in the window even though only three are consumed.

use sf_core::section::PageMarker;

/// Page break; followed by a volume byte and a little-endian `u16` page.
pub const NEW_PAGE: u32 = 0x00_0182;
/// Start of an embedded English run.
pub const ENGLISH_START: u32 = 0x02_0181;
/// End of an embedded English run.
pub const ENGLISH_END: u32 = 0x01_007A;

const SIGNATURE_MASK: u32 = 0x00FF_FFFF;
const SIGNATURE_LEN: usize = 3;
const WINDOW_LEN: usize = 4;
const PAGE_PAYLOAD_LEN: usize = 3;

/// Structural event produced by a matched signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    NewPage(PageMarker),
    EnglishStart,
    EnglishEnd,
}

/// Forward-only cursor over the buffered input.
///
/// # Example
/// ```
/// use sf_decode::signature::{ByteCursor, ControlEvent};
/// let mut cursor = ByteCursor::new(&[0x81, 0x01, 0x02, 0x20, 0x8D]);
/// assert_eq!(cursor.try_signature(), Some(ControlEvent::EnglishStart));
/// assert_eq!(cursor.next_byte(), Some(0x20));
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume one byte.
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Try to match a control signature at the cursor.
    ///
    /// On a match the signature and its payload are consumed. Otherwise the
    /// cursor does not move. Fewer than four remaining bytes never match, and
    /// a page break whose payload is cut off by the end of input is not a
    /// match either.
    pub fn try_signature(&mut self) -> Option<ControlEvent> {
        let window = self.data.get(self.pos..self.pos + WINDOW_LEN)?;
        let signature =
            u32::from_le_bytes([window[0], window[1], window[2], window[3]]) & SIGNATURE_MASK;

        let (event, consumed) = match signature {
            NEW_PAGE => {
                let start = self.pos + SIGNATURE_LEN;
                let Some(payload) = self.data.get(start..start + PAGE_PAYLOAD_LEN) else {
                    log::debug!("page signature at {} without payload, ignored", self.pos);
                    return None;
                };
                let marker = PageMarker {
                    volume: payload[0],
                    page: u16::from_le_bytes([payload[1], payload[2]]),
                };
                (
                    ControlEvent::NewPage(marker),
                    SIGNATURE_LEN + PAGE_PAYLOAD_LEN,
                )
            }
            ENGLISH_START => (ControlEvent::EnglishStart, SIGNATURE_LEN),
            ENGLISH_END => (ControlEvent::EnglishEnd, SIGNATURE_LEN),
            _ => return None,
        };
        self.pos += consumed;
        Some(event)
    }
}
