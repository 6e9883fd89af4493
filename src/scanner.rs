//! Character scanning stage.
//!
//! Turns raw query text into a sequence of position-tagged characters. The
//! lexer works on this buffer and never copies it: tokens and diagnostics
//! refer back into it by offset.

use thiserror::Error;

/// A single scanned character tagged with its zero-based character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Char {
    pub ch: char,
    pub offset: usize,
}

/// Errors raised while scanning raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The input is not valid UTF-8; `offset` is the byte offset of the
    /// first invalid byte.
    #[error("Scanner error: invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Scans UTF-8 text into position-tagged characters.
///
/// ```
/// use tq_lang::scanner::scan;
///
/// let chars = scan(".[1]");
/// assert_eq!(chars.len(), 4);
/// assert_eq!(chars[2].ch, '1');
/// assert_eq!(chars[2].offset, 2);
/// ```
pub fn scan(input: &str) -> Vec<Char> {
    input
        .chars()
        .enumerate()
        .map(|(offset, ch)| Char { ch, offset })
        .collect()
}

/// Scans raw bytes, rejecting anything that is not valid UTF-8.
pub fn scan_bytes(input: &[u8]) -> Result<Vec<Char>, ScanError> {
    let text = std::str::from_utf8(input).map_err(|e| ScanError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;
    Ok(scan(text))
}

/// Joins a run of scanned characters back into a string.
pub fn collect(chars: &[Char]) -> String {
    chars.iter().map(|c| c.ch).collect()
}

#[test]
fn test_offsets_count_characters_not_bytes() {
    let chars = scan("[\"ö\"]");
    assert_eq!(chars.len(), 5);
    assert_eq!(chars[3].ch, '"');
    assert_eq!(chars[3].offset, 3);
}

#[test]
fn test_scan_bytes_rejects_invalid_utf8() {
    let err = scan_bytes(&[b'.', 0xff, b'[']).unwrap_err();
    assert_eq!(err, ScanError::InvalidUtf8 { offset: 1 });
}
