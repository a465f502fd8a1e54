//! Ordered text decoding
//!
//! Game logs and drop exports come from machines with different locales. A
//! file is decoded with the first encoding in an ordered list that accepts it,
//! instead of nesting one fallback handler inside another.

use encoding_rs::{Encoding, GBK, UTF_8, WINDOWS_1252};

/// Encodings the scanners know how to try
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// Simplified Chinese, as written by CN-locale Windows hosts
    Gbk,
    /// Single-byte Western; accepts every byte sequence
    Latin1,
}

/// UTF-8, then GBK, then Latin-1
pub const CSV_ENCODINGS: &[TextEncoding] =
    &[TextEncoding::Utf8, TextEncoding::Gbk, TextEncoding::Latin1];

impl TextEncoding {
    fn codec(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Gbk => GBK,
            TextEncoding::Latin1 => WINDOWS_1252,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Gbk => "gbk",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    fn strip_bom(self, bytes: &[u8]) -> &[u8] {
        match self {
            TextEncoding::Utf8 => bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
            _ => bytes,
        }
    }

    /// Decode without replacement; `None` on any malformed sequence.
    /// A leading UTF-8 BOM is stripped.
    pub fn decode_strict(self, bytes: &[u8]) -> Option<String> {
        self.codec()
            .decode_without_bom_handling_and_without_replacement(self.strip_bom(bytes))
            .map(|text| text.into_owned())
    }

    /// Decode, replacing malformed sequences with U+FFFD.
    /// A leading UTF-8 BOM is stripped.
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        let (text, _had_errors) = self
            .codec()
            .decode_without_bom_handling(self.strip_bom(bytes));
        text.into_owned()
    }
}

/// Decode with the first encoding that accepts `bytes` without errors
pub fn decode_first(bytes: &[u8], encodings: &[TextEncoding]) -> Option<(String, TextEncoding)> {
    encodings
        .iter()
        .find_map(|&enc| enc.decode_strict(bytes).map(|text| (text, enc)))
}

/// UTF-8 with replacement characters.
///
/// A log that is still being written can end in half a multibyte character,
/// and one bad byte must not change how the rest of the file decodes. A lossy
/// UTF-8 pass never fails on content and leaves every ASCII byte in place, so
/// the ASCII markers the scanner looks for survive even in GBK-written logs.
/// Log files are only ever skipped for I/O errors.
pub fn decode_log_text(bytes: &[u8]) -> String {
    TextEncoding::Utf8.decode_lossy(bytes)
}
