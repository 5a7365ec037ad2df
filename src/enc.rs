use std::convert::Infallible;

use crate::alphabet::{Alphabet, Table};
use crate::error::Result;

pub(crate) const BITS_PER_CHAR: usize = 5;
pub(crate) const BYTES_PER_GROUP: usize = 5;
pub(crate) const CHARS_PER_GROUP: usize = BYTES_PER_GROUP * 8 / BITS_PER_CHAR;

/// Number of padding characters needed to complete the quantum after `len` bytes.
pub fn padding_len(len: usize) -> usize {
    (len.div_ceil(BYTES_PER_GROUP) * BYTES_PER_GROUP - len) * 8 / BITS_PER_CHAR
}

/// Length of the encoding of `len` bytes.
pub fn encoded_len(len: usize, padded: bool) -> usize {
    if padded {
        len.div_ceil(BYTES_PER_GROUP) * CHARS_PER_GROUP
    } else {
        (len * 8).div_ceil(BITS_PER_CHAR)
    }
}

/// Selects the `len` bits (at most 8) starting at bit `bit` of `src`, right aligned.
/// Bits past the end of `src` read as zero.
#[inline(always)]
fn bits_at_offset(src: &[u8], bit: usize, len: usize) -> u8 {
    let i = bit / 8;
    let Some(&hi) = src.get(i) else {
        return 0;
    };
    let lo = src.get(i + 1).copied().unwrap_or(0);
    let off = bit % 8;
    let word = (u16::from(hi) << 8) | u16::from(lo);
    ((word >> (16 - off - len)) & ((1 << len) - 1)) as u8
}

fn encode_groups<E>(
    src: &[u8],
    pad: Option<char>,
    mut to_char: impl FnMut(u8) -> core::result::Result<char, E>,
) -> core::result::Result<String, E> {
    let mut dst = String::with_capacity(encoded_len(src.len(), pad.is_some()));

    let mut bit = 0;
    while bit / 8 < src.len() {
        dst.push(to_char(bits_at_offset(src, bit, BITS_PER_CHAR))?);
        bit += BITS_PER_CHAR;
    }

    if let Some(pad) = pad {
        dst.extend(std::iter::repeat(pad).take(padding_len(src.len())));
    }

    Ok(dst)
}

/// Encodes `src` with `alphabet`, padding to a multiple of 8 characters when the
/// alphabet defines a padding character.
///
/// Every group goes through [`Alphabet::to_char`]; its errors are passed on.
pub fn b32enc<A: Alphabet + ?Sized>(src: &[u8], alphabet: &A) -> Result<String> {
    encode_groups(src, alphabet.pad(), |value| alphabet.to_char(value))
}

impl Table {
    /// Infallible [`b32enc`] for table alphabets.
    pub fn encode(&self, src: &[u8]) -> String {
        let encoded = encode_groups(src, self.pad(), |value| Ok::<_, Infallible>(self.symbol(value)));
        match encoded {
            Ok(dst) => dst,
            Err(never) => match never {},
        }
    }
}
