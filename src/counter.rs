//! Moving factors: explicit HOTP counters and TOTP time steps.

use core::num::NonZeroU64;

/// Synchronized moving counter.
///
/// [RFC 4226][4226] describes an "8-byte synchronized moving counter." HOTP callers supply the
/// value directly; [RFC 6238][6238] derives it from the clock, which [`TimeStep`] models. Both
/// are fed through [`encode`] before hashing.
///
/// `Counter` is implemented for `u64` and for raw `[u8; 8]` arrays, the latter read big-endian.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238
pub trait Counter {
    /// The counter value as an eight-byte, big-endian, unsigned integer.
    fn value(&self) -> u64;
}

impl Counter for u64 {
    fn value(&self) -> u64 {
        *self
    }
}

impl Counter for [u8; 8] {
    fn value(&self) -> u64 {
        u64::from_be_bytes(*self)
    }
}

/// Time-derived counter, `floor(timestamp / period)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeStep {
    /// Unix time in seconds.
    pub timestamp: u64,
    /// Token lifetime in seconds.
    pub period: NonZeroU64,
}

impl TimeStep {
    pub fn new(timestamp: u64, period: NonZeroU64) -> Self {
        Self { timestamp, period }
    }

    /// Seconds already spent in the current step.
    pub fn elapsed(&self) -> u64 {
        self.timestamp - self.value() * self.period.get()
    }
}

impl Counter for TimeStep {
    fn value(&self) -> u64 {
        self.timestamp / self.period.get()
    }
}

/// Encodes a counter as the 8-byte big-endian message that gets hashed.
pub fn encode<C: Counter + ?Sized>(counter: &C) -> [u8; 8] {
    counter.value().to_be_bytes()
}
