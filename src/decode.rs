//! Incremental UTF-8 decoding for streamed response bodies.
//!
//! Transport chunks split on byte boundaries, not character boundaries,
//! so a multi-byte character can arrive half in one chunk and half in
//! the next. `StreamDecoder` holds such an incomplete tail back until
//! the continuation bytes arrive and decodes everything else lossily,
//! so a garbled byte never ends the session.

/// Streaming UTF-8 decoder with carry-over for split multi-byte characters.
///
/// The carried bytes only make sense within the stream that produced them,
/// so use one instance per streaming session.
///
/// # Example
/// ```
/// use helios_muse::decode::StreamDecoder;
///
/// let mut decoder = StreamDecoder::new();
/// // "é" is 0xC3 0xA9; deliver it one byte at a time.
/// assert_eq!(decoder.decode(&[b'h', 0xC3]), "h");
/// assert_eq!(decoder.decode(&[0xA9]), "é");
/// assert_eq!(decoder.finish(), "");
/// ```
#[derive(Debug, Default)]
pub struct StreamDecoder {
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, joined with any bytes held over from the
    /// previous call. An incomplete sequence at the end of the chunk is
    /// held back; invalid interior bytes decode to U+FFFD.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes = if self.pending.is_empty() {
            chunk.to_vec()
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            joined
        };

        let split = complete_prefix_len(&bytes);
        self.pending = bytes[split..].to_vec();
        String::from_utf8_lossy(&bytes[..split]).into_owned()
    }

    /// Flush any dangling partial character at end of stream.
    ///
    /// A sequence that never received its continuation bytes decodes to
    /// replacement characters rather than being dropped.
    pub fn finish(&mut self) -> String {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            String::new()
        } else {
            String::from_utf8_lossy(&pending).into_owned()
        }
    }
}

/// Length of the prefix that is safe to decode now.
///
/// Anything past the returned index is the start of a multi-byte sequence
/// still waiting for continuation bytes. At most 3 bytes are ever held
/// back; a run of stray continuation bytes is left in place for the lossy
/// decoder to substitute.
fn complete_prefix_len(bytes: &[u8]) -> usize {
    let scan_from = bytes.len().saturating_sub(3);
    for i in (scan_from..bytes.len()).rev() {
        let b = bytes[i];
        if !is_continuation(b) {
            let expected = sequence_length(b);
            if expected > bytes.len() - i {
                return i;
            }
            break;
        }
    }
    bytes.len()
}

/// Check for a UTF-8 continuation byte (10xxxxxx).
fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Expected sequence length from the first byte. Invalid lead bytes count
/// as one so they reach the lossy decoder instead of stalling the buffer.
fn sequence_length(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode(b"Hello, World!"), "Hello, World!");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_complete_multibyte() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode("caffè 🦀".as_bytes()), "caffè 🦀");
    }

    #[test]
    fn test_split_two_byte() {
        let mut decoder = StreamDecoder::new();
        let bytes = "é".as_bytes();
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.decode(&bytes[1..]), "é");
    }

    #[test]
    fn test_split_four_byte_across_three_chunks() {
        let mut decoder = StreamDecoder::new();
        let bytes = "🦀".as_bytes();
        assert_eq!(bytes.len(), 4);
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.decode(&bytes[1..2]), "");
        assert_eq!(decoder.decode(&bytes[2..]), "🦀");
    }

    #[test]
    fn test_split_with_surrounding_text() {
        let mut decoder = StreamDecoder::new();
        let emoji = "🎨".as_bytes();
        let mut first = b"art ".to_vec();
        first.extend_from_slice(&emoji[..2]);
        let mut second = emoji[2..].to_vec();
        second.extend_from_slice(b"!");

        assert_eq!(decoder.decode(&first), "art ");
        assert_eq!(decoder.decode(&second), "🎨!");
    }

    #[test]
    fn test_invalid_interior_bytes_are_replaced() {
        let mut decoder = StreamDecoder::new();
        let out = decoder.decode(&[b'a', 0xFF, b'b']);
        assert_eq!(out, "a\u{FFFD}b");
    }

    #[test]
    fn test_stray_continuation_bytes_are_replaced() {
        let mut decoder = StreamDecoder::new();
        let out = decoder.decode(&[0x80, 0x80, b'x']);
        assert!(out.ends_with('x'));
        assert!(out.contains('\u{FFFD}'));
    }

    #[test]
    fn test_finish_flushes_truncated_sequence() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode(&[0xF0, 0x9F]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        // Flushing twice is harmless.
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_abandoned_sequence_resolves_on_next_chunk() {
        let mut decoder = StreamDecoder::new();
        // A 4-byte lead followed by ASCII can never complete; the lossy
        // decoder substitutes it once more bytes show the truth.
        assert_eq!(decoder.decode(&[0xF0]), "");
        let out = decoder.decode(b"abc");
        assert_eq!(out, "\u{FFFD}abc");
    }

    #[test]
    fn test_empty_chunk() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode(&[]), "");
        assert_eq!(decoder.decode(&[0xC3]), "");
        assert_eq!(decoder.decode(&[]), "");
        assert_eq!(decoder.decode(&[0xA9]), "é");
    }
}
