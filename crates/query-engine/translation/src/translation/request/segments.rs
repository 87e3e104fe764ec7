//! Tokenize a request path into raw segments, and decode captured segments.
//!
//! Tokenizing happens on the encoded path, and every capture is decoded on its
//! own afterwards, so an encoded `/` (`%2F`) never splits a segment.

use percent_encoding::percent_decode_str;

/// Split a path into its raw, still percent-encoded segments.
///
/// Returns `None` unless the path starts with `/` and every segment is non-empty.
pub fn split(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        None
    } else {
        Some(segments)
    }
}

/// Percent-decode a single captured segment. Fails on invalid UTF-8.
pub fn decode(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Decode a captured segment, treating an empty result as absent.
pub fn decode_non_empty(segment: &str) -> Option<String> {
    decode(segment).filter(|decoded| !decoded.is_empty())
}

/// Whether a raw segment is made of ASCII digits only.
pub fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}
