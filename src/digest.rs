//! HMAC digest types, providers and dynamic truncation.

use core::convert::{TryFrom, TryInto as _};

use super::Token;
use crate::digits::Digits;
use crate::error::{OtpError, Result};

/// Length in bytes of an HMAC-SHA1 digest.
pub const DIGEST_LEN: usize = 20;

/// HMAC-SHA1 digest type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HmacSha1(pub [u8; DIGEST_LEN]);

impl AsRef<[u8]> for HmacSha1 {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<[u8; DIGEST_LEN]> for HmacSha1 {
    fn from(raw: [u8; DIGEST_LEN]) -> Self {
        Self(raw)
    }
}

impl TryFrom<&[u8]> for HmacSha1 {
    type Error = OtpError;
    fn try_from(digest: &[u8]) -> Result<Self> {
        digest
            .try_into()
            .map(Self)
            .map_err(|_| OtpError::MalformedDigest {
                length: digest.len(),
            })
    }
}

impl HmacSha1 {
    /// Truncate the digest to a token of the given length.
    ///
    /// This is the dynamic truncation of [RFC 4226 §5.3][4226]: the low nibble of the final byte
    /// selects an offset, and the four bytes found there, with the leading bit stripped, are
    /// reduced modulo `10^digits`.
    ///
    /// [4226]: https://datatracker.ietf.org/doc/html/rfc4226#section-5.3
    pub fn truncate(&self, digits: Digits) -> Token {
        let digest = &self.0;
        // The highest offset is 15, so offset + 3 stays within the 20 bytes
        let offset = (digest[DIGEST_LEN - 1] & 0xf) as usize;
        let bytes = [
            // Strip leading bit to remove signed/unsigned ambiguity
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ];
        let binary = u32::from_be_bytes(bytes);
        // Reduce in 64 bits, since 10^10 does not fit in a u32
        let value = u64::from(binary) % digits.modulus();
        Token {
            value: value as u32,
            digits,
        }
    }
}

/// Truncate a raw digest to a token of `digits` digits.
///
/// # Errors
///
/// Returns [`OtpError::MalformedDigest`] unless the digest is exactly 20 bytes, then
/// [`OtpError::ImplausibleDigitCount`] unless `digits` lies in `6..=10`.
pub fn truncate(digest: &[u8], digits: u8) -> Result<Token> {
    let digest = HmacSha1::try_from(digest)?;
    let digits = Digits::new(digits)?;
    Ok(digest.truncate(digits))
}

/// Source of HMAC-SHA1 digests.
///
/// The engine never computes HMACs itself; it asks a provider, which lets tests substitute fixed
/// digests and lets hosts bring their own cryptography. Providers are called synchronously and
/// must be reentrant.
///
/// Any `Fn(&[u8], &[u8]) -> Result<Vec<u8>>` closure is a provider.
pub trait HmacProvider {
    /// Compute HMAC-SHA1 of `message` keyed by `key`.
    ///
    /// Implementations without access to HMAC-SHA1 should return
    /// [`OtpError::CryptoUnavailable`]. Output of the wrong length is reported by the caller as
    /// [`OtpError::MalformedDigest`].
    fn hmac_sha1(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>>;
}

impl<F> HmacProvider for F
where
    F: Fn(&[u8], &[u8]) -> Result<Vec<u8>>,
{
    fn hmac_sha1(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        self(key, message)
    }
}

/// The default provider, backed by `ring` when the `ring` feature is enabled.
///
/// Without that feature every call fails with [`OtpError::CryptoUnavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHmac;

impl HmacProvider for SystemHmac {
    #[cfg(feature = "ring")]
    fn hmac_sha1(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        use ring::hmac::{sign, Key as HmacKey, HMAC_SHA1_FOR_LEGACY_USE_ONLY as HMAC_SHA1};

        let key = HmacKey::new(HMAC_SHA1, key);
        Ok(sign(&key, message).as_ref().to_vec())
    }

    #[cfg(not(feature = "ring"))]
    fn hmac_sha1(&self, _key: &[u8], _message: &[u8]) -> Result<Vec<u8>> {
        log::debug!("HMAC-SHA1 requested but the crate was built without a backend");
        Err(OtpError::CryptoUnavailable)
    }
}
