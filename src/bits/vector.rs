//! The [`BitVector`] value type.

use crate::error::{GaError, GaResult};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Fixed-length sequence of bits.
///
/// Storage is kept in text order: storage slot `n - 1 - i` holds logical
/// bit `i`. Equality is structural over the bit content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitVector {
    /// Bits in text (most-significant first) order.
    bits: Vec<bool>,
}

impl BitVector {
    /// All-zero vector of length `n`.
    pub fn new(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Builds a vector from bits in logical order (`bits[0]` is bit 0).
    pub fn from_bits(mut bits: Vec<bool>) -> Self {
        bits.reverse();
        Self { bits }
    }

    /// Parses '0'/'1' text; length equals the text length.
    ///
    /// Character `c` at text position `p` sets logical bit `n - 1 - p`.
    pub fn from_text(text: &str) -> GaResult<Self> {
        let bits = text
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(GaError::InvalidText { position, found }),
            })
            .collect::<GaResult<Vec<bool>>>()?;
        Ok(Self { bits })
    }

    /// The low `width` bits of `value`.
    pub fn from_u64(value: u64, width: usize) -> Self {
        let bits = (0..width)
            .map(|i| i < 64 && (value >> i) & 1 == 1)
            .collect();
        Self::from_bits(bits)
    }

    /// Uniformly random vector of length `n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..n).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the vector holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    fn slot(&self, i: usize) -> GaResult<usize> {
        let len = self.bits.len();
        if i >= len {
            return Err(GaError::IndexOutOfRange { index: i, len });
        }
        Ok(len - 1 - i)
    }

    /// Logical bit `i` as 0 or 1.
    pub fn get_bit(&self, i: usize) -> GaResult<u8> {
        let slot = self.slot(i)?;
        Ok(self.bits[slot] as u8)
    }

    /// Sets logical bit `i`; any nonzero `value` is stored as 1.
    pub fn set_bit(&mut self, i: usize, value: u8) -> GaResult<()> {
        let slot = self.slot(i)?;
        self.bits[slot] = value != 0;
        Ok(())
    }

    /// Flips logical bit `i`.
    pub fn complement_bit(&mut self, i: usize) -> GaResult<()> {
        let slot = self.slot(i)?;
        self.bits[slot] = !self.bits[slot];
        Ok(())
    }

    /// Uniformly random index in `[0, len)`.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    pub fn random_index<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.bits.len())
    }

    /// Big-endian text rendering: bit `n - 1` first, bit 0 last.
    pub fn to_text(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// Logical bits, index 0 first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().rev().copied()
    }

    /// Unsigned value of the vector, or `None` above 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u64, |acc, &b| (acc << 1) | u64::from(b)),
        )
    }

    /// Concatenates vectors so the first part occupies the most-significant
    /// segment, matching text concatenation.
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a BitVector>,
    {
        let bits = parts
            .into_iter()
            .flat_map(|p| p.bits.iter().copied())
            .collect();
        Self { bits }
    }

    /// Splits into consecutive segments in text order: the first segment
    /// takes the `widths[0]` most-significant bits.
    ///
    /// # Errors
    /// [`GaError::Decode`] unless the widths sum to exactly [`len`](Self::len).
    pub fn split(&self, widths: &[usize]) -> GaResult<Vec<BitVector>> {
        let total: usize = widths.iter().sum();
        if total != self.bits.len() {
            return Err(GaError::Decode(format!(
                "cannot split {} bits into widths {:?} (sum {})",
                self.bits.len(),
                widths,
                total
            )));
        }
        let mut start = 0;
        Ok(widths
            .iter()
            .map(|&w| {
                let part = BitVector {
                    bits: self.bits[start..start + w].to_vec(),
                };
                start += w;
                part
            })
            .collect())
    }

    /// Logical bits `[start, start + width)` as a new vector, so the result's
    /// bit 0 is `self`'s bit `start`.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfRange`] if the range runs past the end.
    pub fn segment(&self, start: usize, width: usize) -> GaResult<BitVector> {
        let n = self.bits.len();
        let end = start.saturating_add(width);
        if end > n {
            return Err(GaError::IndexOutOfRange { index: end, len: n });
        }
        Ok(BitVector {
            bits: self.bits[n - end..n - start].to_vec(),
        })
    }

    /// Copies logical bits `[start, end)` from `source` into `self`.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfRange`] if `end` exceeds either length.
    pub fn copy_range_from(
        &mut self,
        source: &BitVector,
        start: usize,
        end: usize,
    ) -> GaResult<()> {
        let len = self.len().min(source.len());
        if end > len {
            return Err(GaError::IndexOutOfRange { index: end, len });
        }
        for i in start..end {
            let bit = source.get_bit(i)?;
            self.set_bit(i, bit)?;
        }
        Ok(())
    }

    /// Number of positions at which `self` and `other` differ.
    ///
    /// Both vectors must have the same length.
    pub fn hamming_distance(&self, other: &BitVector) -> usize {
        debug_assert_eq!(self.len(), other.len(), "hamming distance of unequal lengths");
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for BitVector {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}
