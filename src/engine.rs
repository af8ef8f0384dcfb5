//! Orchestration of a full HOTP/TOTP calculation.

use core::convert::TryFrom;

use log::{debug, trace};

use crate::counter::{self, Counter};
use crate::digest::{HmacProvider, HmacSha1, SystemHmac};
use crate::error::{OtpError, Result};
use crate::request::{Calculation, CounterSource, Request};
use crate::{base32, timer, Token};

/// Every value produced on the way to a token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OtpData {
    /// The decoded shared secret.
    pub secret_bytes: Vec<u8>,
    pub counter_value: u64,
    /// `counter_value`, big-endian.
    pub counter_bytes: [u8; 8],
    pub hmac: HmacSha1,
    pub expected_otp: Token,
}

/// HOTP/TOTP calculator over an [`HmacProvider`].
///
/// The engine holds no state besides its provider; every call is independent.
#[derive(Clone, Debug, Default)]
pub struct Engine<H = SystemHmac> {
    provider: H,
}

impl Engine {
    /// An engine using the built-in HMAC-SHA1 implementation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: HmacProvider> Engine<H> {
    pub fn with_provider(provider: H) -> Self {
        Engine { provider }
    }

    /// Computes the token for `request`.
    ///
    /// # Errors
    ///
    /// See [`Engine::calculate_otp_data`].
    pub fn calculate(&self, request: &Request) -> Result<Token> {
        self.calculate_otp_data(request)
            .map(|data| data.expected_otp)
    }

    /// Computes the token for `request` along with its intermediate values.
    ///
    /// # Errors
    ///
    /// * [`OtpError::InvalidRequest`] if the request names no counter source, both sources, a
    ///   timestamp without a period, or a secret that decodes to nothing.
    /// * [`OtpError::ImplausibleDigitCount`] for token lengths outside `6..=10`.
    /// * [`OtpError::InvalidEncoding`] if the secret is not base32.
    /// * [`OtpError::CryptoUnavailable`] or [`OtpError::MalformedDigest`] from the provider.
    pub fn calculate_otp_data(&self, request: &Request) -> Result<OtpData> {
        let calculation = Calculation::try_from(request).map_err(|e| {
            debug!("rejected request: {}", e);
            e
        })?;
        self.evaluate(&calculation)
    }

    /// Runs an already validated calculation.
    ///
    /// # Errors
    ///
    /// As [`Engine::calculate_otp_data`], minus the request validation errors.
    pub fn evaluate(&self, calculation: &Calculation) -> Result<OtpData> {
        debug!(
            "calculating {} code with {} digits",
            match calculation.source {
                CounterSource::Counter(_) => "HOTP",
                CounterSource::Time(_) => "TOTP",
            },
            calculation.digits
        );
        let secret_bytes = base32::decode(&calculation.secret)?;
        if secret_bytes.is_empty() {
            return Err(OtpError::invalid_request(
                "secret must decode to at least one byte",
            ));
        }
        let counter_value = calculation.source.value();
        trace!("counter value {}", counter_value);
        let counter_bytes = counter::encode(&counter_value);
        let digest = self.provider.hmac_sha1(&secret_bytes, &counter_bytes)?;
        let hmac = HmacSha1::try_from(digest.as_slice())?;
        let expected_otp = hmac.truncate(calculation.digits);
        Ok(OtpData {
            secret_bytes,
            counter_value,
            counter_bytes,
            hmac,
            expected_otp,
        })
    }

    /// Seconds until the TOTP code for `request` expires; see [`timer::remaining`].
    ///
    /// # Errors
    ///
    /// See [`timer::remaining`].
    pub fn timer(&self, request: &Request) -> Result<u64> {
        timer::remaining(request)
    }
}
