//! Unsigned integer <-> binary text conversions.

use crate::error::{GaError, GaResult};
use rand::Rng;

/// Minimum number of binary digits needed to write `x`.
///
/// Returns 1 for `x` in `{0, 1}` and `floor(log2(x)) + 1` otherwise.
pub fn count_bits(x: u64) -> usize {
    let mut n = x;
    let mut count = 1;
    while n > 1 {
        count += 1;
        n /= 2;
    }
    count
}

/// Standard binary rendering of `x`, most-significant digit first,
/// exactly [`count_bits`] digits wide.
pub fn dec_to_bin_text(x: u64) -> String {
    let width = count_bits(x);
    (0..width)
        .rev()
        .map(|digit| if (x >> digit) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Binary rendering of `x` left-padded with zeros to `width` digits.
///
/// Only the low `width` bits of `x` are kept when `x` does not fit.
pub fn dec_to_bin_text_padded(x: u64, width: usize) -> String {
    (0..width)
        .rev()
        .map(|digit| {
            if digit < 64 && (x >> digit) & 1 == 1 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

/// Parses unsigned binary text (most-significant digit first).
///
/// # Errors
///
/// [`GaError::InvalidText`] for a character other than '0'/'1', and
/// [`GaError::Decode`] when the value does not fit in 64 bits.
pub fn bin_text_to_dec(text: &str) -> GaResult<u64> {
    let mut value: u64 = 0;
    for (position, c) in text.chars().enumerate() {
        let digit = match c {
            '0' => 0,
            '1' => 1,
            found => return Err(GaError::InvalidText { position, found }),
        };
        value = value
            .checked_mul(2)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| GaError::Decode(format!("binary text {text:?} exceeds 64 bits")))?;
    }
    Ok(value)
}

/// `n` independently, uniformly sampled '0'/'1' characters.
pub fn random_bit_text<R: Rng>(n: usize, rng: &mut R) -> String {
    (0..n)
        .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
        .collect()
}
