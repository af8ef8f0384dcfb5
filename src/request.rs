//! Calculation requests: the raw named-field form callers send, and its validated form.

use core::convert::TryFrom;
use core::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::counter::{Counter, TimeStep};
use crate::digits::Digits;
use crate::error::{OtpError, Result};
use crate::{DEFAULT_DIGITS, DEFAULT_PERIOD};

/// Parameters of one calculation as supplied by a caller.
///
/// Exactly one of `counter` (HOTP) or `timestamp` (TOTP) must be set, and a `timestamp` needs a
/// `period`. These rules are checked when the request is turned into a [`Calculation`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Token length; [`DEFAULT_DIGITS`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digits: Option<u8>,
    /// Base32 shared secret, optionally `=`-padded.
    pub secret: String,
    /// Explicit HOTP counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u64>,
    /// Unix time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    /// TOTP token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
}

impl Request {
    pub fn hotp(secret: impl Into<String>, counter: u64) -> Self {
        Request {
            secret: secret.into(),
            counter: Some(counter),
            ..Request::default()
        }
    }

    pub fn totp(secret: impl Into<String>, timestamp: u64, period: u64) -> Self {
        Request {
            secret: secret.into(),
            timestamp: Some(timestamp),
            period: Some(period),
            ..Request::default()
        }
    }

    /// A TOTP request with the customary 30 second period.
    pub fn totp_default(secret: impl Into<String>, timestamp: u64) -> Self {
        Self::totp(secret, timestamp, DEFAULT_PERIOD)
    }

    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = Some(digits);
        self
    }

    /// Parses a request from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidRequest`] if the input is not JSON, is not an object of named
    /// fields (a bare number or string, say), or has fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| OtpError::invalid_request(format!("malformed JSON: {}", e)))?;
        if !value.is_object() {
            return Err(OtpError::invalid_request(
                "request must be a set of named fields",
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| OtpError::invalid_request(format!("malformed request: {}", e)))
    }

    /// Validates which counter source the request names.
    pub fn counter_source(&self) -> Result<CounterSource> {
        match (self.counter, self.timestamp) {
            (Some(_), Some(_)) => Err(OtpError::invalid_request(
                "a counter and a timestamp were both given; supply exactly one",
            )),
            (None, None) => Err(OtpError::invalid_request(
                "neither a counter nor a timestamp was given; supply exactly one",
            )),
            (Some(counter), None) => Ok(CounterSource::Counter(counter)),
            (None, Some(timestamp)) => {
                let period = self.period.ok_or_else(|| {
                    OtpError::invalid_request("a timestamp requires a token period")
                })?;
                let period = positive_period(period)?;
                Ok(CounterSource::Time(TimeStep::new(timestamp, period)))
            }
        }
    }
}

pub(crate) fn positive_period(period: u64) -> Result<NonZeroU64> {
    NonZeroU64::new(period)
        .ok_or_else(|| OtpError::invalid_request("token period must be at least one second"))
}

/// Where a calculation's moving factor comes from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CounterSource {
    /// HOTP: the counter is given.
    Counter(u64),
    /// TOTP: the counter is the number of whole periods since the epoch.
    Time(TimeStep),
}

impl Counter for CounterSource {
    fn value(&self) -> u64 {
        match self {
            CounterSource::Counter(counter) => *counter,
            CounterSource::Time(step) => step.value(),
        }
    }
}

/// A validated request.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Calculation {
    pub digits: Digits,
    pub secret: String,
    pub source: CounterSource,
}

impl TryFrom<&Request> for Calculation {
    type Error = OtpError;
    fn try_from(request: &Request) -> Result<Self> {
        let source = request.counter_source()?;
        let digits = Digits::new(request.digits.unwrap_or(DEFAULT_DIGITS))?;
        Ok(Calculation {
            digits,
            secret: request.secret.clone(),
            source,
        })
    }
}
