use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Input bytes, bounded in size.
#[derive(Debug)]
pub struct Input {
    pub bytes: Vec<u8>,
    /// `true` if the source held more than the limit.
    pub truncated: bool,
}

/// Read at most `limit` bytes from `reader`.
///
/// # Errors
/// Propagates read failures.
pub fn read_bounded<R: Read>(reader: R, limit: usize) -> io::Result<Input> {
    let mut bytes = Vec::new();
    // One extra byte tells a source of exactly `limit` bytes from a longer one.
    reader.take((limit as u64).saturating_add(1)).read_to_end(&mut bytes)?;
    let truncated = bytes.len() > limit;
    bytes.truncate(limit);
    Ok(Input { bytes, truncated })
}

/// Read the whole input from `path`, or from standard input when `None`.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn open_input(path: Option<&Path>, limit: usize) -> Result<Input> {
    let input = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            read_bounded(BufReader::new(file), limit)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => read_bounded(io::stdin().lock(), limit).context("Failed to read standard input")?,
    };
    if input.truncated {
        log::warn!("input larger than {limit} bytes, the rest is ignored");
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn short_input_is_kept_whole() {
        let input = read_bounded(Cursor::new(vec![1, 2, 3]), 8).unwrap();
        assert_eq!(input.bytes, vec![1, 2, 3]);
        assert!(!input.truncated);
    }

    #[test]
    fn exact_limit_is_not_truncated() {
        let input = read_bounded(Cursor::new(vec![7; 4]), 4).unwrap();
        assert_eq!(input.bytes.len(), 4);
        assert!(!input.truncated);
    }

    #[test]
    fn long_input_is_truncated() {
        let input = read_bounded(Cursor::new(vec![7; 10]), 4).unwrap();
        assert_eq!(input.bytes, vec![7; 4]);
        assert!(input.truncated);
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x01, 0x20, 0x02]).unwrap();
        let input = open_input(Some(file.path()), 16).unwrap();
        assert_eq!(input.bytes, vec![0x01, 0x20, 0x02]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(Some(&dir.path().join("absent.sah")), 16).unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
