//! Motor command gene.

use crate::bits::BitVector;
use crate::error::{GaError, GaResult};
use crate::ga::{Encodable, FixedWidthGene};
use std::fmt;

/// One motor command: an 8-bit speed and a direction flag.
///
/// Encoded as 9 bits, direction most significant, then the speed
/// zero-padded to 8 bits.
///
/// ```
/// use u_bitga::ga::Encodable;
/// use u_bitga::spiderbot::MotorGene;
///
/// let gene = MotorGene::new(5, true);
/// assert_eq!(gene.encode().to_text(), "100000101");
/// assert_eq!(gene.to_string(), "-5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorGene {
    /// Speed, 0–255.
    pub speed: u8,
    /// Direction bit; set means the motor runs backward.
    pub reverse: bool,
}

impl MotorGene {
    /// Encoded width.
    pub const BITS: usize = 9;

    /// Degrees per second per speed unit on the regulated motor.
    pub const SPEED_SCALE: f64 = 360.0 / 256.0;

    pub fn new(speed: u8, reverse: bool) -> Self {
        Self { speed, reverse }
    }

    /// Builds a gene from an unbounded speed, clamped to 0–255.
    pub fn clamped(speed: i64, reverse: bool) -> Self {
        Self::new(speed.clamp(0, 255) as u8, reverse)
    }

    /// Speed converted to the motor's regulated units, truncated.
    pub fn regulated_speed(&self) -> u32 {
        (f64::from(self.speed) * Self::SPEED_SCALE) as u32
    }
}

impl Default for MotorGene {
    /// Speed 10 with the direction bit set.
    fn default() -> Self {
        Self::new(10, true)
    }
}

impl Encodable for MotorGene {
    fn n_bits(&self) -> usize {
        Self::BITS
    }

    fn encode(&self) -> BitVector {
        let value = (u64::from(self.reverse) << 8) | u64::from(self.speed);
        BitVector::from_u64(value, Self::BITS)
    }
}

impl FixedWidthGene for MotorGene {
    const WIDTH: usize = Self::BITS;

    fn from_bits(bits: &BitVector) -> GaResult<Self> {
        if bits.len() != Self::BITS {
            return Err(GaError::Decode(format!(
                "motor gene needs {} bits, got {}",
                Self::BITS,
                bits.len()
            )));
        }
        let value = bits
            .to_u64()
            .ok_or_else(|| GaError::Decode("motor gene wider than 64 bits".into()))?;
        Ok(Self {
            speed: (value & 0xff) as u8,
            reverse: value & 0x100 != 0,
        })
    }
}

impl fmt::Display for MotorGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.reverse { '-' } else { '+' };
        write!(f, "{}{}", sign, self.speed)
    }
}
