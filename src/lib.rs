//! Base32 encoding with pluggable alphabets and a single-symbol GF(2^5) check
//! digit for catching transcription errors.
//!
//! ```
//! let encoded = base32check::encode(b"foobar");
//! assert_eq!(encoded, "MZXW6YTBOI======");
//! assert_eq!(base32check::decode(&encoded).unwrap(), b"foobar");
//!
//! let check = base32check::checksum("CAFEBABE").unwrap();
//! assert_eq!(check, 'N');
//! assert!(base32check::validate("CAFEBABEN").unwrap());
//! ```

pub mod alphabet;
mod check;
mod dec;
mod enc;
mod error;

pub use crate::alphabet::{Alphabet, Table, RFC4648, RFC4648_HEX, ZBASE32};
pub use crate::check::{Check1, CHECK1};
pub use crate::dec::{b32dec, decoded_len};
pub use crate::enc::{b32enc, encoded_len, padding_len};
pub use crate::error::{Error, Result};

/// Encodes `src` with the padded RFC4648 alphabet.
pub fn encode(src: &[u8]) -> String {
    RFC4648.encode(src)
}

/// Decodes RFC4648 text. Padding is optional and whitespace is ignored.
pub fn decode(src: &str) -> Result<Vec<u8>> {
    b32dec(src, &RFC4648)
}

/// RFC4648 check symbol of `payload`.
pub fn checksum(payload: &str) -> Result<char> {
    CHECK1.compute(payload, &RFC4648)
}

/// Whether RFC4648 `payload` ends in its correct check symbol.
pub fn validate(payload: &str) -> Result<bool> {
    CHECK1.validate(payload, &RFC4648)
}
