//! Lossy text decoding.
//!
//! Configuration dumps pulled off access nodes occasionally carry stray
//! Latin-1 bytes or truncated multi-byte sequences. Those bytes are dropped.

/// Decode bytes as UTF-8, dropping every invalid sequence.
///
/// Unlike [`String::from_utf8_lossy`], nothing is substituted for the
/// invalid bytes, so `b"ab\xffc"` decodes to `"abc"`.
#[must_use]
pub fn decode_lossy(buffer: Vec<u8>) -> String {
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let mut out = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                out.push_str(chunk.valid());
            }
            out
        }
    }
}
