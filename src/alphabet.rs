//! Symbol tables mapping 5-bit values to characters and back.

use crate::error::{Error, Result};

pub(crate) const RFC4648_CHARS: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
pub(crate) const RFC4648HEX_CHARS: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
pub(crate) const ZBASE32_CHARS: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

/// RFC4648 section 6 alphabet with `=` padding. Whitespace is ignored.
pub static RFC4648: Table = Table::new(RFC4648_CHARS, Some('='));

/// RFC4648 section 7 "extended hex" alphabet with `=` padding.
pub static RFC4648_HEX: Table = Table::new(RFC4648HEX_CHARS, Some('='));

/// z-base-32. Never padded.
pub static ZBASE32: Table = Table::new(ZBASE32_CHARS, None);

/// A base 32 alphabet.
///
/// Implementors provide a bijection between the values `0..32` and 32 distinct
/// symbols, a predicate for characters the decoder skips, and an optional
/// padding character. `ignore` must never hold for a data symbol or for the
/// padding character.
pub trait Alphabet {
    /// Symbol for the 5-bit value `index`. Fails with
    /// [`Error::IndexOutOfRange`] for `index >= 32`.
    fn to_char(&self, index: u8) -> Result<char>;

    /// Value of `symbol`, or `None` if it is not one of the 32 data symbols.
    fn to_index(&self, symbol: char) -> Option<u8>;

    fn ignore(&self, symbol: char) -> bool;

    /// Padding character, or `None` if this alphabet is never padded.
    fn pad(&self) -> Option<char>;
}

const UNMAPPED: u8 = u8::MAX;

/// Table-driven ASCII alphabet.
///
/// Decoding looks symbols up in a dense array indexed by `symbol - min(symbol)`.
#[derive(Debug, Clone)]
pub struct Table {
    chars: &'static [u8; 32],
    min: u8,
    indices: [u8; 128],
    pad: Option<char>,
}

impl Table {
    /// Builds a table alphabet. Panics (at compile time when used in a
    /// `static`) if a symbol is repeated, is not printable ASCII, or collides
    /// with the padding character.
    pub const fn new(chars: &'static [u8; 32], pad: Option<char>) -> Self {
        let mut min = u8::MAX;
        let mut i = 0;
        while i < 32 {
            let c = chars[i];
            if !c.is_ascii_graphic() {
                panic!("base32 symbols must be printable ASCII");
            }
            if c < min {
                min = c;
            }
            i += 1;
        }

        let mut indices = [UNMAPPED; 128];
        let mut i = 0;
        while i < 32 {
            let slot = (chars[i] - min) as usize;
            if indices[slot] != UNMAPPED {
                panic!("duplicate base32 symbol");
            }
            indices[slot] = i as u8;
            if let Some(p) = pad {
                if p as u32 == chars[i] as u32 {
                    panic!("padding character is also a data symbol");
                }
            }
            i += 1;
        }

        if let Some(p) = pad {
            if !p.is_ascii_graphic() {
                panic!("padding character must be printable ASCII");
            }
        }

        Table { chars, min, indices, pad }
    }
}

impl Table {
    /// Symbol for each 5-bit value, in value order.
    pub fn symbols(&self) -> &[u8; 32] {
        self.chars
    }

    /// Symbol for a value already masked to 5 bits.
    #[inline(always)]
    pub(crate) fn symbol(&self, value: u8) -> char {
        char::from(self.chars[usize::from(value & 0x1F)])
    }
}

impl Alphabet for Table {
    fn to_char(&self, index: u8) -> Result<char> {
        self.chars
            .get(usize::from(index))
            .map(|&b| char::from(b))
            .ok_or(Error::IndexOutOfRange(index))
    }

    fn to_index(&self, symbol: char) -> Option<u8> {
        let slot = u32::from(symbol).checked_sub(u32::from(self.min))?;
        match self.indices.get(slot as usize) {
            Some(&i) if i != UNMAPPED => Some(i),
            _ => None,
        }
    }

    fn ignore(&self, symbol: char) -> bool {
        symbol.is_whitespace()
    }

    fn pad(&self) -> Option<char> {
        self.pad
    }
}
