//! Random base32 secrets for bootstrapping.
//!
//! These secrets are short and drawn from a general-purpose RNG. They are meant for demos and
//! tests; provision real secrets from a cryptographically secure source with at least 128 bits.

use log::trace;
use rand::Rng;

use crate::base32::ALPHABET;

/// Shortest generated secret, in characters.
pub const MIN_LEN: usize = 6;
/// Longest generated secret, in characters.
pub const MAX_LEN: usize = 16;

/// Generates a random base32 secret using the thread-local RNG.
///
/// The length is even and uniform over `6..=16`; each character is uniform over the alphabet.
pub fn random_secret() -> String {
    random_secret_with(&mut rand::thread_rng())
}

/// Generates a random base32 secret from `rng`.
pub fn random_secret_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = 2 * rng.gen_range(MIN_LEN / 2..=MAX_LEN / 2);
    trace!("generating {}-character secret", len);
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
