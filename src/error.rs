//! Error type shared by every stage of a calculation.

use thiserror::Error;

/// OTP calculation error type.
///
/// Every variant is terminal for the call that produced it; no partial result accompanies an
/// error.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum OtpError {
    /// The secret contains a character outside the base32 alphabet.
    ///
    /// `position` is 1-based and counts characters, not bytes.
    #[error("invalid base32 character {character:?} at position {position}")]
    InvalidEncoding { character: char, position: usize },
    /// The request is malformed or names an ambiguous or missing counter source.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The HMAC provider returned something other than a 20-byte digest.
    #[error("invalid HMAC-SHA1 digest: expected 20 bytes, got {length}")]
    MalformedDigest { length: usize },
    /// The requested number of digits was outside of the range [6, 10].
    #[error("implausible digit count {0}: must be between 6 and 10")]
    ImplausibleDigitCount(u8),
    /// A timer was requested for a timestamp without a refresh period.
    #[error("a timestamp was given without a token period")]
    MissingPeriod,
    /// No HMAC-SHA1 implementation is available.
    #[error("no HMAC-SHA1 implementation is available")]
    CryptoUnavailable,
}

impl OtpError {
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        OtpError::InvalidRequest(message.into())
    }
}

pub type Result<T> = std::result::Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_error_names_character_and_position() {
        let err = OtpError::InvalidEncoding {
            character: '1',
            position: 4,
        };
        assert_eq!(
            err.to_string(),
            "invalid base32 character '1' at position 4"
        );
    }

    #[test]
    fn digest_error_reports_length() {
        let err = OtpError::MalformedDigest { length: 19 };
        assert_eq!(
            err.to_string(),
            "invalid HMAC-SHA1 digest: expected 20 bytes, got 19"
        );
    }
}
