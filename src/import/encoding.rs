//! Text encoding detection for bank exports
//!
//! Sparkasse exports UTF-8 (often with a BOM), Commerzbank exports Latin-9.
//! Nothing else is attempted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::*;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encodings the reader knows how to decode, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8, with or without byte order mark
    Utf8,
    /// ISO-8859-15
    Latin9,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Latin9 => write!(f, "ISO-8859-15"),
        }
    }
}

/// Decode raw export bytes, trying UTF-8 first and Latin-9 second.
///
/// Every byte sequence is valid ISO-8859-15, so the fallback itself cannot
/// fail. Input containing NUL bytes is rejected up front: it is a binary file
/// (UTF-16, a spreadsheet) rather than a CSV text export.
pub fn decode(bytes: &[u8]) -> ConvertResult<(String, TextEncoding)> {
    if let Some(offset) = bytes.iter().position(|&b| b == 0) {
        return Err(ConvertError::Encoding(format!(
            "input is not a text export (NUL byte at offset {})",
            offset
        )));
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok((text.to_string(), TextEncoding::Utf8)),
        Err(e) => {
            log::debug!("input is not UTF-8 ({}), falling back to ISO-8859-15", e);
            Ok((decode_latin9(bytes), TextEncoding::Latin9))
        }
    }
}

fn decode_latin9(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| latin9_char(byte)).collect()
}

/// ISO-8859-15 differs from Latin-1 in eight code points; the C1 range
/// `0x80..=0x9F` maps to the control characters of the same value.
fn latin9_char(byte: u8) -> char {
    match byte {
        0xA4 => '\u{20AC}',
        0xA6 => '\u{0160}',
        0xA8 => '\u{0161}',
        0xB4 => '\u{017D}',
        0xB8 => '\u{017E}',
        0xBC => '\u{0152}',
        0xBD => '\u{0153}',
        0xBE => '\u{0178}',
        other => char::from(other),
    }
}
