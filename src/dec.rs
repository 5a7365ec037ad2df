use tracing::debug;

use crate::alphabet::Alphabet;
use crate::enc::{padding_len, BITS_PER_CHAR, BYTES_PER_GROUP, CHARS_PER_GROUP};
use crate::error::{Error, Result};

/// Upper bound on the decoded length of `len` input characters.
pub fn decoded_len(len: usize) -> usize {
    len.div_ceil(CHARS_PER_GROUP) * BYTES_PER_GROUP
}

/// Decodes `src` with `alphabet`.
///
/// Characters for which [`Alphabet::ignore`] holds are skipped anywhere in the
/// input. Padding is optional: when present it must form an unbroken trailing
/// block (ignored characters aside) whose length matches what [`b32enc`] would
/// have emitted for the decoded length.
///
/// [`b32enc`]: crate::b32enc
pub fn b32dec<A: Alphabet + ?Sized>(src: &str, alphabet: &A) -> Result<Vec<u8>> {
    let pad = alphabet.pad();
    let mut dst = Vec::with_capacity(decoded_len(src.len()));

    // pending bits live in the high end of `buffer`; `bidx` counts them
    let mut buffer: u32 = 0;
    let mut bidx: usize = 0;
    let mut padding = 0;

    for (position, symbol) in src.chars().enumerate() {
        if Some(symbol) == pad {
            padding += 1;
            continue;
        }
        if alphabet.ignore(symbol) {
            continue;
        }
        if padding > 0 {
            debug!(position, %symbol, "data after padding");
            return Err(Error::UnexpectedCharacterAfterPadding { symbol, position });
        }

        let value = match alphabet.to_index(symbol) {
            Some(value) => u32::from(value),
            None => {
                debug!(position, %symbol, "invalid symbol");
                return Err(Error::InvalidSymbol { symbol, position });
            }
        };

        buffer |= ((value << (8 - BITS_PER_CHAR)) >> bidx) & 0xFF;
        bidx += BITS_PER_CHAR;

        if bidx >= 8 {
            bidx -= 8;
            dst.push(buffer as u8);
            buffer = (value << (8 - bidx)) & 0xFF;
        }
    }

    // a whole symbol that never completed a byte
    if bidx >= BITS_PER_CHAR {
        dst.push(buffer as u8);
    }

    let expected = padding_len(dst.len());
    if padding != 0 && padding != expected {
        debug!(expected, found = padding, "malformed padding");
        return Err(Error::MalformedPadding { expected, found: padding });
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{RFC4648, RFC4648_HEX, ZBASE32};
    use crate::enc::b32enc;
    use proptest::prelude::*;

    #[test]
    fn test_b32dec_empty() {
        assert_eq!(b32dec("", &RFC4648), Ok(vec![]));
        assert_eq!(b32dec("  \n", &RFC4648), Ok(vec![]));
        assert_eq!(b32dec("", &ZBASE32), Ok(vec![]));
    }

    #[test]
    fn test_b32dec_rfc4648_vectors() {
        let cases: [(&str, &[u8]); 7] = [
            ("", b""),
            ("MY======", b"f"),
            ("MZXQ====", b"fo"),
            ("MZXW6===", b"foo"),
            ("MZXW6YQ=", b"foob"),
            ("MZXW6YTB", b"fooba"),
            ("MZXW6YTBOI======", b"foobar"),
        ];
        for (src, expected) in cases {
            assert_eq!(b32dec(src, &RFC4648).as_deref(), Ok(expected), "decoding {:?}", src);
        }
    }

    #[test]
    fn test_b32dec_other_alphabets() {
        assert_eq!(b32dec("CPNMUOJ1E8======", &RFC4648_HEX), Ok(b"foobar".to_vec()));
        assert_eq!(b32dec("6n9hq", &ZBASE32), Ok(vec![0xF0, 0xBF, 0xC7]));
    }

    #[test]
    fn test_b32dec_padding_optional() {
        assert_eq!(b32dec("MY", &RFC4648), Ok(b"f".to_vec()));
        assert_eq!(b32dec("MZXW6", &RFC4648), Ok(b"foo".to_vec()));
        assert_eq!(b32dec("MZXW6YTBOI", &RFC4648), Ok(b"foobar".to_vec()));
    }

    #[test]
    fn test_b32dec_whitespace_ignored() {
        assert_eq!(b32dec(" MZ XW\t6Y\nTB OI ==== ==\r\n", &RFC4648), Ok(b"foobar".to_vec()));
        assert_eq!(b32dec("MY=\n=====", &RFC4648), Ok(b"f".to_vec()));
    }

    #[test]
    fn test_b32dec_invalid_symbol() {
        assert_eq!(
            b32dec("MZxW6===", &RFC4648),
            Err(Error::InvalidSymbol { symbol: 'x', position: 2 })
        );
        assert_eq!(
            b32dec("MZ-W", &RFC4648),
            Err(Error::InvalidSymbol { symbol: '-', position: 2 })
        );
        // positions count characters, not bytes
        assert_eq!(
            b32dec("\u{00e9}MY", &RFC4648),
            Err(Error::InvalidSymbol { symbol: '\u{00e9}', position: 0 })
        );
        assert_eq!(
            b32dec("yy==", &ZBASE32),
            Err(Error::InvalidSymbol { symbol: '=', position: 2 })
        );
    }

    #[test]
    fn test_b32dec_data_after_padding() {
        assert_eq!(
            b32dec("MY=A", &RFC4648),
            Err(Error::UnexpectedCharacterAfterPadding { symbol: 'A', position: 3 })
        );
        assert_eq!(
            b32dec("MY====== MY======", &RFC4648),
            Err(Error::UnexpectedCharacterAfterPadding { symbol: 'M', position: 9 })
        );
        // reported even when the offending character is not a symbol
        assert_eq!(
            b32dec("MY==?", &RFC4648),
            Err(Error::UnexpectedCharacterAfterPadding { symbol: '?', position: 4 })
        );
    }

    #[test]
    fn test_b32dec_malformed_padding() {
        assert_eq!(
            b32dec("MY=====", &RFC4648),
            Err(Error::MalformedPadding { expected: 6, found: 5 })
        );
        assert_eq!(
            b32dec("MY=======", &RFC4648),
            Err(Error::MalformedPadding { expected: 6, found: 7 })
        );
        assert_eq!(
            b32dec("MZXW6YTB=", &RFC4648),
            Err(Error::MalformedPadding { expected: 0, found: 1 })
        );
        assert_eq!(b32dec("=", &RFC4648), Err(Error::MalformedPadding { expected: 0, found: 1 }));
    }

    #[test]
    fn test_b32dec_non_canonical_tail() {
        // trailing bits that do not reach a full byte are dropped unchecked
        assert_eq!(b32dec("M7", &RFC4648), Ok(vec![0x67]));
        // a whole dangling symbol still yields a byte
        assert_eq!(b32dec("MZX", &RFC4648), Ok(vec![0x66, 0x6E]));
        assert_eq!(b32dec("M", &RFC4648), Ok(vec![0x60]));
    }

    #[test]
    fn test_decoded_len() {
        assert_eq!(decoded_len(0), 0);
        assert_eq!(decoded_len(1), 5);
        assert_eq!(decoded_len(8), 5);
        assert_eq!(decoded_len(9), 10);
    }

    proptest! {
        #[test]
        fn prop_round_trip(src in proptest::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(b32dec(&b32enc(&src, &RFC4648).unwrap(), &RFC4648), Ok(src.clone()));
            prop_assert_eq!(b32dec(&b32enc(&src, &RFC4648_HEX).unwrap(), &RFC4648_HEX), Ok(src.clone()));
            prop_assert_eq!(b32dec(&b32enc(&src, &ZBASE32).unwrap(), &ZBASE32), Ok(src));
        }

        #[test]
        fn prop_unpadded_round_trip(src in proptest::collection::vec(any::<u8>(), 0..128)) {
            let encoded = b32enc(&src, &RFC4648).unwrap();
            let unpadded = encoded.trim_end_matches('=');
            prop_assert_eq!(b32dec(unpadded, &RFC4648), Ok(src));
        }

        #[test]
        fn prop_whitespace_ignored(
            src in proptest::collection::vec(any::<u8>(), 0..64),
            gaps in proptest::collection::vec((any::<prop::sample::Index>(), prop::sample::select(vec![" ", "\t", "\n", "\r\n"])), 0..16),
        ) {
            let encoded = b32enc(&src, &RFC4648).unwrap();
            let mut spaced: Vec<char> = encoded.chars().collect();
            for (at, ws) in gaps {
                let at = at.index(spaced.len() + 1);
                for (k, c) in ws.chars().enumerate() {
                    spaced.insert(at + k, c);
                }
            }
            let spaced: String = spaced.into_iter().collect();
            prop_assert_eq!(b32dec(&spaced, &RFC4648), Ok(src));
        }
    }
}
