//! Validated token lengths.

use core::convert::TryFrom;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OtpError;

/// Number of decimal digits in a token, guaranteed to lie in `6..=10`.
///
/// [RFC 4226][4226] requires at least 6 digits and Appendix E discusses longer codes. A 31-bit
/// truncated value never exceeds 10 decimal digits, so 10 is the upper bound.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digits(u8);

impl Digits {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 10;

    /// # Errors
    ///
    /// Returns [`OtpError::ImplausibleDigitCount`] outside of `6..=10`.
    pub fn new(digits: u8) -> Result<Self, OtpError> {
        if (Self::MIN..=Self::MAX).contains(&digits) {
            Ok(Digits(digits))
        } else {
            Err(OtpError::ImplausibleDigitCount(digits))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `10^digits`, the modulus applied to the truncated value.
    pub fn modulus(self) -> u64 {
        10_u64.pow(u32::from(self.0))
    }
}

impl Default for Digits {
    fn default() -> Self {
        Digits(crate::DEFAULT_DIGITS)
    }
}

impl TryFrom<u8> for Digits {
    type Error = OtpError;
    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Digits::new(digits)
    }
}

impl From<Digits> for u8 {
    fn from(digits: Digits) -> u8 {
        digits.0
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
