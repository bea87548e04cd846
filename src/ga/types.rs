//! Core trait definitions for the GA engine.
//!
//! Three traits form the contract between the generic engine and a
//! domain:
//!
//! - [`Encodable`]: a gene that serializes itself to a fixed-width bit vector
//! - [`Genome`]: the concrete chromosome kind, owning the decode mapping
//! - [`FitnessFunction`]: scores a candidate in `[0, 1]`, higher is better

use super::chromosome::Chromosome;
use crate::bits::BitVector;
use crate::error::{GaError, GaResult};
use std::fmt;

/// A domain value that can be written as bits.
///
/// `encode()` must return exactly `n_bits()` bits and must be a pure
/// function of the current value.
pub trait Encodable {
    /// Declared width of this gene's encoding.
    fn n_bits(&self) -> usize;

    /// Serializes the current value.
    fn encode(&self) -> BitVector;
}

/// A gene type with a width known without an instance.
///
/// Implementing this gives access to [`decode_uniform`], which segments
/// a bit vector into equally sized genes.
pub trait FixedWidthGene: Encodable + Sized {
    /// Width of every value of this type.
    const WIDTH: usize;

    /// Parses exactly [`WIDTH`](Self::WIDTH) bits.
    fn from_bits(bits: &BitVector) -> GaResult<Self>;
}

/// The concrete chromosome kind of a domain.
///
/// `decode` is the authoritative inverse of encoding: for every gene list
/// `genes` the domain can represent,
/// `decode(concat(genes.map(encode))) == genes` must hold. Nothing in the
/// engine can enforce this, but [`Chromosome::verify_round_trip`] checks
/// it for a given chromosome.
///
/// # Implementing
///
/// ```ignore
/// struct ByteGenome;
///
/// impl Genome for ByteGenome {
///     type Gene = ByteGene;
///     fn decode(bits: &BitVector) -> GaResult<Vec<ByteGene>> {
///         decode_uniform(bits, 4)
///     }
/// }
/// ```
pub trait Genome: 'static {
    /// Gene (component) type stored in the chromosome.
    type Gene: Encodable + Clone + PartialEq + fmt::Debug;

    /// Interprets bit content as the ordered gene list.
    ///
    /// The first gene occupies the most-significant segment.
    fn decode(bits: &BitVector) -> GaResult<Vec<Self::Gene>>;

    /// Human-readable rendering of a decoded gene list.
    fn describe(genes: &[Self::Gene]) -> String {
        genes
            .iter()
            .enumerate()
            .map(|(i, g)| format!("gene{}: {:?}\n", i + 1, g))
            .collect()
    }
}

/// Scores a candidate chromosome.
///
/// Scores are conventionally in `[0, 1]` with 1 the best. The engine uses
/// a score directly as a survival probability, so values outside that range
/// distort selection; they are logged but not rejected.
///
/// The function may be called several times per individual per generation
/// and must not depend on hidden mutable state.
///
/// Any `Fn(&Chromosome<G>) -> f64` closure implements this trait.
pub trait FitnessFunction<G: Genome> {
    /// Returns the fitness of `candidate`.
    fn rate(&self, candidate: &Chromosome<G>) -> f64;
}

impl<G, F> FitnessFunction<G> for F
where
    G: Genome,
    F: Fn(&Chromosome<G>) -> f64,
{
    fn rate(&self, candidate: &Chromosome<G>) -> f64 {
        self(candidate)
    }
}

/// Splits `bits` into `count` genes of type `T`, most-significant first.
///
/// # Errors
/// [`GaError::Decode`] unless `bits` holds exactly `count * T::WIDTH` bits,
/// or if any segment fails to parse.
pub fn decode_uniform<T: FixedWidthGene>(bits: &BitVector, count: usize) -> GaResult<Vec<T>> {
    let expected = count * T::WIDTH;
    if bits.len() != expected {
        return Err(GaError::Decode(format!(
            "expected {} bits for {} genes of width {}, got {}",
            expected,
            count,
            T::WIDTH,
            bits.len()
        )));
    }
    bits.split(&vec![T::WIDTH; count])?
        .iter()
        .map(T::from_bits)
        .collect()
}
