//! Bit-vector genetic algorithm engine.
//!
//! Candidates are fixed-length bit vectors built from domain genes. Each
//! generation is ranked by fitness, lower-ranked individuals survive with
//! probability equal to their score, and survivors breed with the elite by
//! single-point crossover. Mutation flips a fixed number of distinct bits.
//!
//! - **bits**: [`bits::BitVector`] and integer/text conversions.
//! - **ga**: the engine. Domains implement [`ga::Encodable`],
//!   [`ga::Genome`] and [`ga::FitnessFunction`]; the engine supplies
//!   [`ga::Chromosome`], [`ga::Generation`] and [`ga::GeneticAlgorithm`].
//! - **spiderbot**: a three-motor walking robot, evolved toward a
//!   coordinated motor command.
//!
//! # Architecture
//!
//! The engine has no domain knowledge. Gene layouts, decoding and scoring
//! come from the consumer through traits, and every random choice draws
//! from a seedable generator owned by the [`ga::Generation`].

pub mod bits;
pub mod error;
pub mod ga;
pub mod random;
pub mod spiderbot;

pub use error::{GaError, GaResult};
