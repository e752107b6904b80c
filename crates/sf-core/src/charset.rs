//! Reader for the application's charset-table files.
//!
//! Only the header layout and the record size are known; the 48 bytes that
//! follow each character are kept opaque and shown as hex.

use std::io::{self, Write};

use crate::error::CoreError;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 16;
/// Opaque payload following the character byte of each record.
pub const RECORD_PAYLOAD_LEN: usize = 48;
/// Full record size: character byte plus payload.
pub const RECORD_LEN: usize = 1 + RECORD_PAYLOAD_LEN;

/// Fixed header at the start of a charset file.
///
/// Field meanings beyond `version` are best guesses; counts are stored
/// minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetHeader {
    pub version: u16,
    pub header_size: u32,
    pub unique_chars_minus_one: u16,
    pub unknown_1: u16,
    pub block_size_minus_one: u16,
    pub unknown_2: u32,
}

/// One character record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetRecord {
    pub character: u8,
    pub payload: [u8; RECORD_PAYLOAD_LEN],
}

/// A parsed charset file.
///
/// # Example
/// ```
/// use sf_core::charset::{CharsetFile, HEADER_LEN, RECORD_LEN};
/// let mut bytes = vec![0u8; HEADER_LEN + RECORD_LEN];
/// bytes[0] = 3;
/// bytes[HEADER_LEN] = 0x41;
/// let file = CharsetFile::parse(&bytes).unwrap();
/// assert_eq!(file.header.version, 3);
/// assert_eq!(file.records[0].character, 0x41);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetFile {
    pub header: CharsetHeader,
    pub records: Vec<CharsetRecord>,
    /// Bytes left over after the last complete record.
    pub trailing: usize,
}

impl CharsetFile {
    /// Parse a whole charset file held in memory.
    ///
    /// # Errors
    /// Returns [`CoreError::TruncatedHeader`] if the input is shorter than
    /// the header. A trailing partial record is not an error.
    pub fn parse(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() < HEADER_LEN {
            return Err(CoreError::TruncatedHeader {
                expected: HEADER_LEN,
                found: bytes.len(),
            });
        }
        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let u32_at =
            |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let header = CharsetHeader {
            version: u16_at(0),
            header_size: u32_at(2),
            unique_chars_minus_one: u16_at(6),
            unknown_1: u16_at(8),
            block_size_minus_one: u16_at(10),
            unknown_2: u32_at(12),
        };

        let body = &bytes[HEADER_LEN..];
        let chunks = body.chunks_exact(RECORD_LEN);
        let trailing = chunks.remainder().len();
        let records = chunks
            .map(|chunk| {
                let mut payload = [0u8; RECORD_PAYLOAD_LEN];
                payload.copy_from_slice(&chunk[1..]);
                CharsetRecord {
                    character: chunk[0],
                    payload,
                }
            })
            .collect::<Vec<_>>();

        if trailing > 0 {
            log::warn!("charset: {trailing} trailing bytes after the last record");
        }
        Ok(Self {
            header,
            records,
            trailing,
        })
    }

    /// Write the human-readable inspection report.
    ///
    /// # Errors
    /// Propagates write failures on `out`.
    pub fn write_report(&self, out: &mut dyn Write) -> io::Result<()> {
        let h = &self.header;
        writeln!(out, "version: {}", h.version)?;
        writeln!(out, "header size: {}", h.header_size)?;
        writeln!(
            out,
            "unique characters no.: {}",
            u32::from(h.unique_chars_minus_one) + 1
        )?;
        writeln!(out, "unknown 1: {}", h.unknown_1)?;
        writeln!(out, "block size: {}", u32::from(h.block_size_minus_one) + 1)?;
        writeln!(out, "unknown 2: {}", h.unknown_2)?;
        writeln!(out, "blocks no.: {}", self.records.len())?;
        for (i, record) in self.records.iter().enumerate() {
            writeln!(out, "============ block #{} ============", i + 1)?;
            writeln!(
                out,
                "character: {} [{:#04x}]",
                record.character, record.character
            )?;
            writeln!(out, "{}", hex_groups(&record.payload))?;
        }
        if self.trailing > 0 {
            writeln!(out, "trailing bytes: {}", self.trailing)?;
        }
        Ok(())
    }
}

/// Format bytes as `xx ` pairs with an extra space after every 4 bytes.
///
/// # Example
/// ```
/// use sf_core::charset::hex_groups;
/// assert_eq!(hex_groups(&[0x01, 0xab, 0x02, 0x03, 0xff]), "01 ab 02 03  ff ");
/// ```
#[must_use]
pub fn hex_groups(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3 + bytes.len() / 4);
    for (i, byte) in bytes.iter().enumerate() {
        s.push_str(&format!("{byte:02x} "));
        if (i + 1) % 4 == 0 {
            s.push(' ');
        }
    }
    s
}

/// Offset-prefixed hex dump, 16 bytes per line.
///
/// # Errors
/// Propagates write failures on `out`.
///
/// # Example
/// ```
/// use sf_core::charset::write_hex_dump;
/// let mut out = Vec::new();
/// write_hex_dump(&mut out, &[0x82, 0x01, 0x00]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "00000000  82 01 00 \n");
/// ```
pub fn write_hex_dump(out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    for (line, chunk) in bytes.chunks(16).enumerate() {
        writeln!(out, "{:08x}  {}", line * 16, hex_groups(chunk))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(records: usize, extra: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..2].copy_from_slice(&2u16.to_le_bytes());
        bytes[2..6].copy_from_slice(&16u32.to_le_bytes());
        bytes[6..8].copy_from_slice(&9u16.to_le_bytes());
        bytes[10..12].copy_from_slice(&48u16.to_le_bytes());
        bytes[12..16].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        for i in 0..records {
            bytes.push(0x80 + i as u8);
            bytes.extend(std::iter::repeat_n(i as u8, RECORD_PAYLOAD_LEN));
        }
        bytes.extend(std::iter::repeat_n(0xEE, extra));
        bytes
    }

    #[test]
    fn parses_header_fields() {
        let file = CharsetFile::parse(&sample(0, 0)).unwrap();
        assert_eq!(file.header.version, 2);
        assert_eq!(file.header.header_size, 16);
        assert_eq!(file.header.unique_chars_minus_one, 9);
        assert_eq!(file.header.block_size_minus_one, 48);
        assert_eq!(file.header.unknown_2, 0xDEAD_BEEF);
        assert!(file.records.is_empty());
    }

    #[test]
    fn partial_record_is_reported_not_parsed() {
        let file = CharsetFile::parse(&sample(2, 10)).unwrap();
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.records[1].character, 0x81);
        assert_eq!(file.records[1].payload, [1u8; RECORD_PAYLOAD_LEN]);
        assert_eq!(file.trailing, 10);
    }

    #[test]
    fn short_input_is_an_error() {
        let err = CharsetFile::parse(&[0u8; 5]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TruncatedHeader {
                expected: 16,
                found: 5
            }
        ));
    }

    #[test]
    fn report_lists_counts_plus_one() {
        let file = CharsetFile::parse(&sample(1, 0)).unwrap();
        let mut out = Vec::new();
        file.write_report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unique characters no.: 10"));
        assert!(text.contains("block size: 49"));
        assert!(text.contains("blocks no.: 1"));
        assert!(text.contains("character: 128 [0x80]"));
    }

    #[test]
    fn hex_dump_wraps_lines() {
        let bytes: Vec<u8> = (0..20).collect();
        let mut out = Vec::new();
        write_hex_dump(&mut out, &bytes).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("00000010  10 11 12 13"));
    }
}
