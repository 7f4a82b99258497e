//! Shared hex-string grammar: optional `0x`/`0X` prefix, even digit count,
//! exact byte length where the type demands one.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("hex string has an odd number of digits")]
    OddLength,
    #[error("expected {expected} bytes, got {got}")]
    BadLength { expected: usize, got: usize },
    #[error("invalid hex character")]
    InvalidHex,
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

pub(crate) fn decode(s: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_prefix(s);
    match hex::decode(digits) {
        Ok(bytes) => Ok(bytes),
        Err(hex::FromHexError::OddLength) => Err(HexError::OddLength),
        Err(_) => Err(HexError::InvalidHex),
    }
}

pub(crate) fn decode_exact(s: &str, expected: usize) -> Result<Vec<u8>, HexError> {
    let digits = strip_prefix(s);
    // Length is checked on the digit count first so that `0x1234` against a
    // 32-byte type reports BadLength, not a decode failure.
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength);
    }
    if digits.len() != expected * 2 {
        return Err(HexError::BadLength { expected, got: digits.len() / 2 });
    }
    hex::decode(digits).map_err(|_| HexError::InvalidHex)
}
