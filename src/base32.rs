//! RFC 4648 base32 decoding of shared secrets.

use crate::error::{OtpError, Result};

/// The RFC 4648 base32 alphabet, indexed by 5-bit value.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const PADDING: char = '=';

fn value_of(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

/// Decodes a base32 string into raw bytes.
///
/// Trailing `=` padding is stripped before decoding. Bits left over once the final full byte has
/// been emitted are discarded without inspection, so inputs of any length decode.
///
/// # Errors
///
/// Returns [`OtpError::InvalidEncoding`] for the first character outside `A-Z2-7`, along with its
/// 1-based position.
///
/// # Examples
///
/// ```rust
/// # use otp_core::base32;
/// assert_eq!(base32::decode("MZXW6===").unwrap(), b"foo");
/// assert!(base32::decode("MZXW1").is_err());
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let input = input.trim_end_matches(PADDING);
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u16 = 0;
    let mut bits = 0_u32;
    for (index, character) in input.chars().enumerate() {
        let value = value_of(character).ok_or(OtpError::InvalidEncoding {
            character,
            position: index + 1,
        })?;
        buffer = (buffer << 5) | u16::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            // Only the unconsumed low bits stay buffered
            buffer &= (1 << bits) - 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_encoding::BASE32_NOPAD;
    use quickcheck::quickcheck;

    #[test]
    fn decodes_rfc_4648_vectors() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("MY======").unwrap(), b"f");
        assert_eq!(decode("MZXQ====").unwrap(), b"fo");
        assert_eq!(decode("MZXW6===").unwrap(), b"foo");
        assert_eq!(decode("MZXW6YQ=").unwrap(), b"foob");
        assert_eq!(decode("MZXW6YTB").unwrap(), b"fooba");
        assert_eq!(decode("MZXW6YTBOI======").unwrap(), b"foobar");
    }

    #[test]
    fn decodes_rfc_4226_secret() {
        assert_eq!(
            decode("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap(),
            b"12345678901234567890"
        );
    }

    #[test]
    fn drops_leftover_bits() {
        // One character carries only 5 bits, two carry 10
        assert_eq!(decode("M").unwrap(), b"");
        assert_eq!(decode("MZ").unwrap(), b"f");
        assert_eq!(decode("MZ7").unwrap(), b"f");
    }

    #[test]
    fn reports_first_bad_character() {
        assert_eq!(
            decode("GEZ1GNB8"),
            Err(OtpError::InvalidEncoding {
                character: '1',
                position: 4
            })
        );
        assert_eq!(
            decode("gezdgnbv"),
            Err(OtpError::InvalidEncoding {
                character: 'g',
                position: 1
            })
        );
    }

    #[test]
    fn padding_only_counts_at_the_end() {
        assert_eq!(
            decode("MY==MY"),
            Err(OtpError::InvalidEncoding {
                character: '=',
                position: 3
            })
        );
    }

    #[test]
    fn positions_count_characters() {
        assert_eq!(
            decode("ÄA"),
            Err(OtpError::InvalidEncoding {
                character: 'Ä',
                position: 1
            })
        );
        assert_eq!(
            decode("AAé"),
            Err(OtpError::InvalidEncoding {
                character: 'é',
                position: 3
            })
        );
    }

    #[test]
    fn round_trips_through_independent_encoder() {
        fn check(bytes: Vec<u8>) -> bool {
            let encoded = BASE32_NOPAD.encode(&bytes);
            decode(&encoded).map(|decoded| decoded == bytes).unwrap_or(false)
        }
        quickcheck(check as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn truncated_input_keeps_leading_bytes() {
        fn check(bytes: Vec<u8>, cut: usize) -> bool {
            let encoded = BASE32_NOPAD.encode(&bytes);
            let cut = if encoded.is_empty() { 0 } else { cut % encoded.len() };
            let prefix = &encoded[..cut];
            match decode(prefix) {
                Ok(decoded) => decoded.len() == cut * 5 / 8 && bytes.starts_with(&decoded),
                Err(_) => false,
            }
        }
        quickcheck(check as fn(Vec<u8>, usize) -> bool);
    }
}
