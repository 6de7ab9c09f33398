//! Total UTF-8 decoding.
//!
//! [`decode`] never fails and never reads past the bound it is given. Invalid
//! or truncated input degrades to [`REPLACEMENT_CHARACTER`] while always
//! consuming at least one byte, so a decoding loop is guaranteed to make
//! progress and to consume exactly the input length in total.

/// U+FFFD, produced for every malformed sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// The outcome of decoding a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Number of bytes consumed. Zero only for the end-of-text sentinel.
    pub len: usize,
    /// The decoded codepoint.
    pub ch: char,
}

impl Decoded {
    /// Sentinel returned when there is nothing left to decode.
    pub const END: Decoded = Decoded { len: 0, ch: '\0' };

    /// Whether this is the end-of-text sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn replacement(len: usize) -> Self {
        Decoded {
            len,
            ch: REPLACEMENT_CHARACTER,
        }
    }
}

#[inline]
fn is_continuation_byte(b: u8) -> bool {
    b & 0b1100_0000 == 0b1000_0000
}

/// Declared sequence length for a lead byte, or `None` if `b` cannot start a
/// sequence.
#[inline]
fn sequence_len(b: u8) -> Option<usize> {
    match b {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Decode one codepoint from the front of `bytes`, looking at no more than
/// `max_len` bytes.
///
/// Malformed input yields [`REPLACEMENT_CHARACTER`] and consumes the lead byte
/// plus the run of continuation bytes that directly follows it. For a
/// multi-byte lead that run is always shorter than the declared sequence
/// length. Structurally complete sequences that encode a surrogate, an
/// overlong form or a value above U+10FFFF are replaced but consumed whole.
///
/// An empty input (or `max_len == 0`) yields [`Decoded::END`].
pub fn decode(bytes: &[u8], max_len: usize) -> Decoded {
    let bytes = &bytes[..bytes.len().min(max_len)];
    let Some(&lead) = bytes.first() else {
        return Decoded::END;
    };

    let Some(declared) = sequence_len(lead) else {
        return decoding_failure(bytes);
    };
    if declared == 1 {
        return Decoded {
            len: 1,
            ch: lead as char,
        };
    }

    // A valid prefix shorter than the declared length is a truncation.
    let valid_tail = bytes[1..]
        .iter()
        .take(declared - 1)
        .take_while(|b| is_continuation_byte(**b))
        .count();
    if valid_tail < declared - 1 {
        return Decoded::replacement(1 + valid_tail);
    }

    let lead_bits = match declared {
        2 => lead & 0b0001_1111,
        3 => lead & 0b0000_1111,
        _ => lead & 0b0000_0111,
    } as u32;
    let value = bytes[1..declared]
        .iter()
        .fold(lead_bits, |acc, b| (acc << 6) | (b & 0b0011_1111) as u32);

    let min_value = match declared {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    };
    match char::from_u32(value) {
        Some(ch) if value >= min_value => Decoded { len: declared, ch },
        _ => Decoded::replacement(declared),
    }
}

/// Consume an invalid lead byte and the continuation bytes behind it.
fn decoding_failure(bytes: &[u8]) -> Decoded {
    let tail = bytes[1..]
        .iter()
        .take_while(|b| is_continuation_byte(**b))
        .count();
    Decoded::replacement(1 + tail)
}

/// Decode the first codepoint of a string slice.
#[inline]
pub fn decode_str(s: &str) -> Decoded {
    decode(s.as_bytes(), s.len())
}

/// Number of codepoints in `s`.
pub fn count_codepoints(s: &str) -> usize {
    s.chars().count()
}

/// Iterator that repeatedly applies [`decode`] to a byte slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Decoder { bytes }
    }

    /// Bytes not yet decoded.
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes
    }
}

impl Iterator for Decoder<'_> {
    type Item = Decoded;

    fn next(&mut self) -> Option<Self::Item> {
        let decoded = decode(self.bytes, self.bytes.len());
        if decoded.is_end() {
            return None;
        }
        self.bytes = &self.bytes[decoded.len..];
        Some(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_classes() {
        let mut decoder = Decoder::new("a字じ".as_bytes());

        assert_eq!(decoder.next().map(|d| d.ch as u32), Some(0x61));
        assert_eq!(decoder.next().map(|d| d.ch as u32), Some(0x5B57));
        assert_eq!(decoder.next().map(|d| d.ch as u32), Some(0x3058));
        assert_eq!(decoder.next(), None);
        assert!(decoder.remaining().is_empty());
    }

    #[test]
    fn test_decode_empty_is_end() {
        assert_eq!(decode(b"", 0), Decoded::END);
        assert_eq!(decode(b"abc", 0), Decoded::END);
        assert!(decode_str("").is_end());
    }

    #[test]
    fn test_decode_four_byte() {
        let s = "𠀋";
        let decoded = decode_str(s);
        assert_eq!(decoded.len, 4);
        assert_eq!(decoded.ch, '𠀋');
    }

    #[test]
    fn test_truncated_sequence_is_replaced() {
        let bytes = "字".as_bytes();
        let decoded = decode(bytes, 2);
        assert_eq!(decoded.ch, REPLACEMENT_CHARACTER);
        assert_eq!(decoded.len, 2);

        let decoded = decode(&bytes[..1], 1);
        assert_eq!(decoded.ch, REPLACEMENT_CHARACTER);
        assert_eq!(decoded.len, 1);
    }

    #[test]
    fn test_lead_followed_by_ascii() {
        // 3-byte lead, then an ASCII byte that must not be swallowed.
        let bytes = [0xE5, b'a', b'b'];
        let decoded = decode(&bytes, bytes.len());
        assert_eq!(decoded, Decoded::replacement(1));

        let rest: Vec<char> = Decoder::new(&bytes).map(|d| d.ch).collect();
        assert_eq!(rest, vec![REPLACEMENT_CHARACTER, 'a', 'b']);
    }

    #[test]
    fn test_stray_continuation_bytes() {
        let bytes = [0x80, 0x81, 0x82, b'x'];
        let decoded = decode(&bytes, bytes.len());
        assert_eq!(decoded, Decoded::replacement(3));
    }

    #[test]
    fn test_overlong_and_surrogate() {
        // Overlong encoding of '/'.
        assert_eq!(decode(&[0xC0, 0xAF], 2), Decoded::replacement(2));
        // Encoded surrogate U+D800.
        assert_eq!(decode(&[0xED, 0xA0, 0x80], 3), Decoded::replacement(3));
        // Above U+10FFFF.
        assert_eq!(
            decode(&[0xF4, 0x90, 0x80, 0x80], 4),
            Decoded::replacement(4)
        );
    }

    #[test]
    fn test_consumption_matches_input_length() {
        let mut inputs: Vec<Vec<u8>> = vec![
            "abcd 4242.ひらがな漢字".as_bytes().to_vec(),
            vec![0xE3, 0x81],
            vec![0xF0, 0x9F, 0x98],
            vec![0xFF, 0xFE, 0x80, b'a', 0xC3],
        ];
        // Every prefix of a multi-byte string, including ones that cut a
        // sequence in half.
        let full = "日本語のテキスト".as_bytes();
        for end in 0..=full.len() {
            inputs.push(full[..end].to_vec());
        }

        for input in inputs {
            let total: usize = Decoder::new(&input).map(|d| d.len).sum();
            assert_eq!(total, input.len(), "input {input:?}");
        }
    }

    /// Decode `input` to the end, checking progress and bounds at every step.
    fn assert_total(input: &[u8]) {
        // Well-formed input must decode to exactly what std decodes.
        let mut expected = std::str::from_utf8(input).ok().map(str::chars);
        let mut rest = input;
        while !rest.is_empty() {
            let decoded = decode(rest, rest.len());
            assert!(
                decoded.len >= 1 && decoded.len <= rest.len(),
                "input {input:02X?} step {decoded:?}"
            );
            if let Some(chars) = expected.as_mut() {
                assert_eq!(Some(decoded.ch), chars.next(), "input {input:02X?}");
            }
            rest = &rest[decoded.len..];
        }
        assert_eq!(expected.and_then(|mut chars| chars.next()), None);
    }

    #[test]
    fn test_every_short_sequence_is_consumed() {
        for a in 0..=u8::MAX {
            assert_total(&[a]);
            for b in 0..=u8::MAX {
                assert_total(&[a, b]);
                for c in 0..=u8::MAX {
                    assert_total(&[a, b, c]);
                }
            }
        }
    }

    #[test]
    fn test_random_bytes_are_consumed() {
        // xorshift64, fixed seed.
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        for _ in 0..20_000 {
            let len = (next() % 24) as usize;
            let input: Vec<u8> = (0..len)
                .map(|_| {
                    // Bias towards lead and continuation bytes.
                    let byte = next() as u8;
                    match next() % 3 {
                        0 => 0x80 | (byte & 0x3F),
                        1 => 0xC0 | byte,
                        _ => byte,
                    }
                })
                .collect();
            assert_total(&input);

            let bound = (next() % 8) as usize;
            let decoded = decode(&input, bound);
            assert!(decoded.len <= bound.min(input.len()));
            assert_eq!(decoded.is_end(), bound == 0 || input.is_empty());
        }
    }

    #[test]
    fn test_never_reads_past_bound() {
        let bytes = "漢字".as_bytes();
        for bound in 0..=bytes.len() {
            let decoded = decode(bytes, bound);
            assert!(decoded.len <= bound);
            if bound > 0 {
                assert!(decoded.len > 0);
            }
        }
    }

    #[test]
    fn test_count_codepoints() {
        assert_eq!(count_codepoints("to eat"), 6);
        assert_eq!(count_codepoints("食べる"), 3);
        assert_eq!(count_codepoints(""), 0);
    }
}
