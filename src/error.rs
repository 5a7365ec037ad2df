use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Character outside the alphabet's domain
    #[error("invalid base32 character {symbol:?} at index {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Data symbol after the first padding character
    #[error("unexpected character {symbol:?} at index {position} after padding character; only padding and ignored characters allowed after first padding character")]
    UnexpectedCharacterAfterPadding { symbol: char, position: usize },

    #[error("malformed padding: found {found} padding characters, expected {expected} to complete the quantum")]
    MalformedPadding { expected: usize, found: usize },

    #[error("symbol index {0} out of range (must be below 32)")]
    IndexOutOfRange(u8),
}
