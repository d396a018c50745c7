//! Checksum verification for NMEA sentences.
//!
//! [`map`](../parser/fn.map.html) deliberately does not look at the
//! checksum. Anything receiving sentences from a real serial link should run
//! [`verify`](fn.verify.html) first, otherwise a corrupted but well formed
//! sentence maps to a plausible looking fix.

use err::ChecksumError;

/// XOR of every byte in `payload`.
#[inline]
pub fn compute(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |acc, b| acc ^ b)
}

/// Verify the two hex digit checksum after `*` against the bytes between
/// `$` and `*`. Returns the checksum on success.
pub fn verify(sentence: &[u8]) -> Result<u8, ChecksumError> {
    let start = if sentence.first() == Some(&b'$') { 1 } else { 0 };
    let star = sentence
        .iter()
        .position(|&b| b == b'*')
        .ok_or(ChecksumError::Missing)?;

    let expected = match sentence.get(star + 1..star + 3) {
        Some(&[hi, lo]) => match (hex_digit(hi), hex_digit(lo)) {
            (Some(hi), Some(lo)) => hi << 4 | lo,
            _ => return Err(ChecksumError::Malformed),
        },
        _ => return Err(ChecksumError::Malformed),
    };

    let actual = compute(&sentence[start..star]);
    if expected != actual {
        return Err((expected, actual).into());
    }
    Ok(actual)
}

#[inline]
fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}
