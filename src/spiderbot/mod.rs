//! Three-motor walking robot domain.
//!
//! A chromosome holds three [`MotorGene`]s (left, back, right), 27 bits in
//! total. [`SpiderFitness`] rewards the direction pattern and speed ratios
//! that make the robot walk straight.
//!
//! # Example
//!
//! ```
//! use u_bitga::ga::FitnessFunction;
//! use u_bitga::spiderbot::{spider_population, SpiderFitness};
//!
//! let population = spider_population(8).unwrap();
//! assert_eq!(population[0].to_bit_text(), "111111111010010010000011111");
//!
//! let score = SpiderFitness.rate(&population[0]);
//! assert!((0.0..=1.0).contains(&score));
//! ```

mod fitness;
mod motor;

pub use fitness::SpiderFitness;
pub use motor::MotorGene;

use crate::bits::{dec_to_bin_text_padded, BitVector};
use crate::error::GaResult;
use crate::ga::{decode_uniform, Chromosome, Genome};

/// Number of motors on the robot.
pub const MOTORS: usize = 3;

/// Speed table cycled through by [`spider_population`].
const SEED_SPEEDS: [u64; 8] = [0x1ff, 0x92, 0x155, 0x99, 0x1f0, 0x1f, 0x124, 0xdb];

/// Chromosome kind for the robot: three motor genes.
pub struct SpiderGenome;

impl Genome for SpiderGenome {
    type Gene = MotorGene;

    fn decode(bits: &BitVector) -> GaResult<Vec<MotorGene>> {
        decode_uniform(bits, MOTORS)
    }

    fn describe(genes: &[MotorGene]) -> String {
        genes
            .iter()
            .enumerate()
            .map(|(i, m)| format!("motor{}: {}\n", i + 1, m))
            .collect()
    }
}

impl SpiderGenome {
    /// Builds a chromosome from up to three motors.
    ///
    /// Missing motors are filled with [`MotorGene::default`]; extra motors
    /// are ignored.
    pub fn from_motors(motors: &[MotorGene]) -> GaResult<Chromosome<SpiderGenome>> {
        let genes = (0..MOTORS)
            .map(|i| motors.get(i).copied().unwrap_or_default())
            .collect();
        Chromosome::from_genes(genes)
    }
}

/// Deterministic initial population of `n` robot chromosomes.
///
/// Each gene's 9 bits come from [`SEED_SPEEDS`] at index `k mod 8`, where
/// `k` starts at 0 and advances by a step that itself grows by 3 after
/// every gene (0, 1, 5, 12, 22, ...).
pub fn spider_population(n: usize) -> GaResult<Vec<Chromosome<SpiderGenome>>> {
    let mut k = 0usize;
    let mut incr = 1usize;
    (0..n)
        .map(|_| {
            let mut text = String::with_capacity(MOTORS * MotorGene::BITS);
            for _ in 0..MOTORS {
                let value = SEED_SPEEDS[k % SEED_SPEEDS.len()];
                text.push_str(&dec_to_bin_text_padded(value, MotorGene::BITS));
                k += incr;
                incr += 3;
            }
            Chromosome::from_text(&text)
        })
        .collect()
}
