//! Countdown arithmetic for TOTP codes.

use crate::counter::TimeStep;
use crate::error::{OtpError, Result};
use crate::request::{positive_period, Request};

/// Seconds the TOTP code for `request` remains valid, in `[0, period]`.
///
/// HOTP codes do not expire with time, so a request without a timestamp yields 0. At the exact
/// start of a step the full period remains.
///
/// # Errors
///
/// Returns [`OtpError::MissingPeriod`] for a timestamp without a period, and
/// [`OtpError::InvalidRequest`] for a zero period.
pub fn remaining(request: &Request) -> Result<u64> {
    let timestamp = match request.timestamp {
        Some(timestamp) => timestamp,
        None => return Ok(0),
    };
    let period = request.period.ok_or(OtpError::MissingPeriod)?;
    let step = TimeStep::new(timestamp, positive_period(period)?);
    Ok(seconds_remaining(&step))
}

/// Seconds left in `step`'s window.
pub fn seconds_remaining(step: &TimeStep) -> u64 {
    let period = step.period.get();
    period.saturating_sub(step.elapsed()).min(period)
}
