//! Text charset detection.
//!
//! Lyric and text files in voice works come in whatever encoding the author's
//! editor used (UTF-8, Shift-JIS, GBK, UTF-16 from Notepad, ...). The browser
//! only renders them correctly when the `Content-Type` names the charset.
//!
//! Detection order:
//! 1. BOM: UTF-8 (EF BB BF), UTF-16 LE (FF FE), UTF-16 BE (FE FF)
//! 2. No BOM: valid UTF-8 (a multi-byte sequence cut off at the end of a
//!    truncated sample still counts)
//! 3. Otherwise chardetng's guess among legacy encodings

/// How many leading bytes of a file are worth sniffing
pub const SNIFF_LIMIT: usize = 256 * 1024;

/// Guess the charset of a text sample
///
/// Returns a name usable in a `charset=` parameter, or `None` for an empty
/// sample.
pub fn detect_charset(bytes: &[u8]) -> Option<&'static str> {
    if bytes.is_empty() {
        return None;
    }

    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some(encoding_rs::UTF_8.name());
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Some(encoding_rs::UTF_16LE.name());
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Some(encoding_rs::UTF_16BE.name());
    }

    match std::str::from_utf8(bytes) {
        Ok(_) => return Some(encoding_rs::UTF_8.name()),
        // Only the tail is incomplete, e.g. a sample cut in the middle of a character
        Err(e) if e.error_len().is_none() && e.valid_up_to() > 0 => {
            return Some(encoding_rs::UTF_8.name());
        }
        Err(_) => {}
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    Some(detector.guess(None, true).name())
}

/// `text/plain` content type for a sample, if a charset could be detected
pub fn text_content_type(bytes: &[u8]) -> Option<String> {
    detect_charset(bytes).map(|charset| format!("text/plain; charset={}", charset))
}
