//! HMAC-based one-time passwords.
//!
//! Implements [RFC 4226][4226] (HOTP, explicit counter) and its time-based variant
//! [RFC 6238][6238] (TOTP, counter derived from the clock) over HMAC-SHA1:
//!
//! 1. the base32 secret is decoded ([`base32`]);
//! 2. the counter is encoded as 8 big-endian bytes ([`counter`]);
//! 3. an [`HmacProvider`] signs the counter bytes with the secret;
//! 4. the 20-byte digest is dynamically truncated to a decimal [`Token`] ([`digest`]).
//!
//! Every intermediate value is available through [`calculate_otp_data`].
//!
//! ```rust
//! use otp_core::{calculate, Request};
//!
//! let request = Request::hotp("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", 1);
//! assert_eq!(calculate(&request).unwrap().to_string(), "287082");
//! ```
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use core::fmt;

pub mod base32;
pub mod counter;
pub mod digest;
pub mod digits;
pub mod engine;
mod error;
pub mod request;
pub mod secret;
pub mod timer;

pub use crate::digest::{HmacProvider, HmacSha1, SystemHmac};
pub use crate::digits::Digits;
pub use crate::engine::{Engine, OtpData};
pub use crate::error::{OtpError, Result};
pub use crate::request::{Calculation, CounterSource, Request};
pub use crate::secret::random_secret;

/// Token length used when a request does not name one.
pub const DEFAULT_DIGITS: u8 = 6;
/// Token lifetime in seconds for [`Request::totp_default`].
pub const DEFAULT_PERIOD: u64 = 30;

/// A computed one-time password.
///
/// `value` always lies in `[0, 10^digits)`. The `Display` implementation zero-pads it to exactly
/// `digits` characters, which is the form users type in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub value: u32,
    pub digits: Digits,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:0width$}",
            self.value,
            width = usize::from(self.digits.get())
        )
    }
}

/// Computes the one-time password described by `request`.
///
/// # Errors
///
/// See [`Engine::calculate`].
pub fn calculate(request: &Request) -> Result<Token> {
    Engine::new().calculate(request)
}

/// Computes the one-time password described by `request`, along with every intermediate value.
///
/// # Errors
///
/// See [`Engine::calculate_otp_data`].
pub fn calculate_otp_data(request: &Request) -> Result<OtpData> {
    Engine::new().calculate_otp_data(request)
}

/// Seconds until the TOTP code described by `request` expires.
///
/// # Errors
///
/// See [`timer::remaining`].
pub fn timer(request: &Request) -> Result<u64> {
    timer::remaining(request)
}

#[cfg(all(test, feature = "ring"))]
mod tests {
    use super::*;
    use test_case::test_case;

    /// `b"12345678901234567890"`, the RFC test secret.
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    // RFC 4226 Appendix D
    #[test_case(0, 755224)]
    #[test_case(1, 287082)]
    #[test_case(2, 359152)]
    #[test_case(3, 969429)]
    #[test_case(4, 338314)]
    #[test_case(5, 254676)]
    #[test_case(6, 287922)]
    #[test_case(7, 162583)]
    #[test_case(8, 399871)]
    #[test_case(9, 520489)]
    fn test_hotp(counter: u64, expected: u32) {
        let token = calculate(&Request::hotp(RFC_SECRET, counter)).unwrap();
        assert_eq!(token.value, expected);
    }

    // RFC 6238 Appendix B, SHA-1 rows
    #[test_case(59, "94287082")]
    #[test_case(1_111_111_109, "07081804")]
    #[test_case(1_111_111_111, "14050471")]
    #[test_case(1_234_567_890, "89005924")]
    #[test_case(2_000_000_000, "69279037")]
    #[test_case(20_000_000_000, "65353130")]
    fn test_totp(timestamp: u64, expected: &str) {
        let request = Request::totp(RFC_SECRET, timestamp, 30).with_digits(8);
        assert_eq!(calculate(&request).unwrap().to_string(), expected);
    }

    #[test]
    fn raw_values_match_appendix_d() {
        let data = calculate_otp_data(&Request::hotp(RFC_SECRET, 9).with_digits(10)).unwrap();
        assert_eq!(data.expected_otp.value, 0x2679dc69);
    }

    #[test]
    fn tokens_keep_leading_zeros() {
        let token = Token {
            value: 42,
            digits: Digits::new(6).unwrap(),
        };
        assert_eq!(token.to_string(), "000042");
    }

    #[test]
    fn calculate_is_repeatable() {
        let request = Request::hotp(RFC_SECRET, 12_345).with_digits(7);
        assert_eq!(calculate(&request), calculate(&request));
    }

    #[test]
    fn padded_secrets_are_accepted() {
        let padded = Request::hotp("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ====", 0);
        assert_eq!(calculate(&padded).unwrap().value, 755224);
    }

    #[test]
    fn timer_counts_down() {
        assert_eq!(timer(&Request::totp(RFC_SECRET, 30, 30)), Ok(30));
        assert_eq!(timer(&Request::totp(RFC_SECRET, 59, 30)), Ok(1));
        assert_eq!(timer(&Request::totp(RFC_SECRET, 60, 30)), Ok(30));
        assert_eq!(timer(&Request::hotp(RFC_SECRET, 60)), Ok(0));
    }
}
