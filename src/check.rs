//! Single-symbol check digit over GF(2^5).
//!
//! Each symbol's 5-bit value is a field element. The symbol at position `i` is
//! weighted by `p^(i+1)` for a primitive element `p`, and the weighted values
//! are summed (XOR). The check symbol is chosen so that appending it drives the
//! sum of the whole string to zero, so a string carrying a correct check symbol
//! always checks to the alphabet's first symbol.
//!
//! Any single substitution is detected. Transpositions are detected unless the
//! swapped positions' weights coincide, which happens for positions 31 apart
//! since the multiplicative group has order 31.

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};

const CARDINAL: usize = 1 << 5;
const ORDER: usize = CARDINAL - 1;

/// Rows of a linear operator on GF(2)^5, most significant input bit first.
type Matrix = [u8; 5];

/// Applies `m` to `a`: XOR of the rows of `m` selected by the set bits of `a`.
#[inline(always)]
const fn mat_mul(a: u8, m: &Matrix) -> u8 {
    let mut out = 0;
    let mut j = 0;
    while j < 5 {
        if a & (1 << (4 - j)) != 0 {
            out ^= m[j];
        }
        j += 1;
    }
    out
}

const fn mat_compose(a: &Matrix, m: &Matrix) -> Matrix {
    let mut out = [0; 5];
    let mut i = 0;
    while i < 5 {
        out[i] = mat_mul(a[i], m);
        i += 1;
    }
    out
}

/// Check symbol calculator for a fixed primitive element.
#[derive(Debug, Clone)]
pub struct Check1 {
    /// `powers[k]` multiplies by `p^k`; `powers[0]` is `p^31`, the identity.
    powers: [Matrix; ORDER],
}

/// Calculator for the primitive polynomial used by base32check1.
pub static CHECK1: Check1 = Check1::new([
    0b00001,
    0b10001,
    0b01000,
    0b00101,
    0b00011,
]);

impl Check1 {
    /// Builds the power table from the matrix of multiplication by a primitive
    /// element.
    pub const fn new(primitive: Matrix) -> Self {
        let mut powers = [[0; 5]; ORDER];
        powers[1] = primitive;

        let mut i = 2;
        while i <= ORDER {
            let values = mat_compose(&powers[i - 1], &primitive);
            if i < ORDER {
                powers[i] = values;
            } else {
                powers[0] = values;
            }
            i += 1;
        }

        Check1 { powers }
    }

    /// Computes the check symbol of `payload`.
    ///
    /// Every character must be a data symbol of `alphabet`; ignorable
    /// characters are not skipped.
    pub fn compute<A: Alphabet + ?Sized>(&self, payload: &str, alphabet: &A) -> Result<char> {
        let mut sum = 0;
        let mut len: usize = 0;
        for (position, symbol) in payload.chars().enumerate() {
            let value = alphabet
                .to_index(symbol)
                .ok_or(Error::InvalidSymbol { symbol, position })?;
            sum ^= mat_mul(value, &self.powers[(position + 1) % ORDER]);
            len += 1;
        }

        let exp = (CARDINAL as i64 - len as i64 - 2).rem_euclid(ORDER as i64) as usize;
        alphabet.to_char(mat_mul(sum, &self.powers[exp]))
    }

    /// Whether `payload`, including its trailing check symbol, checks out.
    pub fn validate<A: Alphabet + ?Sized>(&self, payload: &str, alphabet: &A) -> Result<bool> {
        Ok(self.compute(payload, alphabet)? == alphabet.to_char(0)?)
    }
}
