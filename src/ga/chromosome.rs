//! Chromosomes: bit content plus the decoded gene list.

use super::types::{Encodable, Genome};
use crate::bits::BitVector;
use crate::error::{GaError, GaResult};
use rand::Rng;
use std::fmt;

/// A candidate solution: the concatenated encodings of an ordered gene list.
///
/// Invariant after every operation: `bits` equals the concatenation of
/// `genes[i].encode()` in order, and `G::decode(bits) == genes`.
pub struct Chromosome<G: Genome> {
    bits: BitVector,
    genes: Vec<G::Gene>,
    /// Width of each gene, in gene order.
    layout: Vec<usize>,
}

impl<G: Genome> Chromosome<G> {
    /// Builds a chromosome by encoding and concatenating `genes`.
    ///
    /// # Errors
    /// [`GaError::Decode`] if a gene's encoding length differs from its
    /// declared `n_bits()`.
    pub fn from_genes(genes: Vec<G::Gene>) -> GaResult<Self> {
        let mut encoded = Vec::with_capacity(genes.len());
        for (i, gene) in genes.iter().enumerate() {
            let bits = gene.encode();
            if bits.len() != gene.n_bits() {
                return Err(GaError::Decode(format!(
                    "gene {} declares {} bits but encodes {}",
                    i,
                    gene.n_bits(),
                    bits.len()
                )));
            }
            encoded.push(bits);
        }
        let layout = encoded.iter().map(BitVector::len).collect();
        Ok(Self {
            bits: BitVector::concat(&encoded),
            genes,
            layout,
        })
    }

    /// Builds a chromosome from raw bits; genes come from `G::decode`.
    pub fn from_bits(bits: BitVector) -> GaResult<Self> {
        let (genes, layout) = Self::decode_layout(&bits)?;
        Ok(Self {
            bits,
            genes,
            layout,
        })
    }

    /// Decodes `bits` and derives the gene widths, which must cover every bit.
    fn decode_layout(bits: &BitVector) -> GaResult<(Vec<G::Gene>, Vec<usize>)> {
        let genes = G::decode(bits)?;
        let layout: Vec<usize> = genes.iter().map(Encodable::n_bits).collect();
        let total: usize = layout.iter().sum();
        if total != bits.len() {
            return Err(GaError::Decode(format!(
                "decoded genes cover {} bits of {}",
                total,
                bits.len()
            )));
        }
        Ok((genes, layout))
    }

    /// Builds a chromosome from '0'/'1' text.
    pub fn from_text(text: &str) -> GaResult<Self> {
        Self::from_bits(BitVector::from_text(text)?)
    }

    /// Bit content.
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    /// Decoded genes, in order.
    pub fn genes(&self) -> &[G::Gene] {
        &self.genes
    }

    /// Width of each gene.
    pub fn layout(&self) -> &[usize] {
        &self.layout
    }

    /// Total bit length.
    pub fn n_bits(&self) -> usize {
        self.bits.len()
    }

    /// Big-endian bit text.
    pub fn to_bit_text(&self) -> String {
        self.bits.to_text()
    }

    /// Domain rendering of the genes.
    pub fn describe(&self) -> String {
        G::describe(&self.genes)
    }

    /// Re-runs `G::decode` over the current bits.
    pub fn decode(&self) -> GaResult<Vec<G::Gene>> {
        G::decode(&self.bits)
    }

    /// Replaces gene `i` and re-encodes.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfRange`] for a bad gene index, and
    /// [`GaError::TypeMismatch`] when the new gene's width differs from
    /// the slot it replaces.
    pub fn set_gene(&mut self, i: usize, gene: G::Gene) -> GaResult<()> {
        if i >= self.genes.len() {
            return Err(GaError::IndexOutOfRange {
                index: i,
                len: self.genes.len(),
            });
        }
        if gene.n_bits() != self.layout[i] {
            let mut found = self.layout.clone();
            found[i] = gene.n_bits();
            return Err(GaError::TypeMismatch {
                expected: self.layout.clone(),
                found,
            });
        }
        let mut genes = self.genes.clone();
        genes[i] = gene;
        *self = Self::from_genes(genes)?;
        Ok(())
    }

    /// Clamps a mutation volume to `n_bits - 1`.
    pub fn clean_mutation_volume(&self, volume: usize) -> usize {
        volume.min(self.n_bits().saturating_sub(1))
    }

    /// Flips exactly `volume` distinct, uniformly chosen bits.
    ///
    /// `volume` is first clamped by [`clean_mutation_volume`](Self::clean_mutation_volume).
    /// Genes and layout are re-derived from the mutated bits; if decoding fails the
    /// chromosome is left unchanged.
    pub fn mutate<R: Rng>(&mut self, volume: usize, rng: &mut R) -> GaResult<()> {
        let volume = self.clean_mutation_volume(volume);
        if volume == 0 {
            return Ok(());
        }

        let mut bits = self.bits.clone();
        let mut flipped: Vec<usize> = Vec::with_capacity(volume);
        while flipped.len() < volume {
            let index = bits.random_index(rng);
            if flipped.contains(&index) {
                continue;
            }
            bits.complement_bit(index)?;
            flipped.push(index);
        }

        let (genes, layout) = Self::decode_layout(&bits)?;
        self.bits = bits;
        self.genes = genes;
        self.layout = layout;
        debug_assert!(self.verify_round_trip().is_ok(), "mutate broke encode/decode round trip");
        Ok(())
    }

    /// Produces one child: bits `[0, pivot)` from `self`, bits
    /// `[pivot, n_bits)` from `partner`.
    ///
    /// `pivot == 0` copies `partner`; `pivot == n_bits` copies `self`.
    ///
    /// # Errors
    /// [`GaError::TypeMismatch`] if the partner's gene layout differs, and
    /// [`GaError::IndexOutOfRange`] if `pivot > n_bits`.
    pub fn crossover(&self, partner: &Self, pivot: usize) -> GaResult<Self> {
        if self.layout != partner.layout {
            return Err(GaError::TypeMismatch {
                expected: self.layout.clone(),
                found: partner.layout.clone(),
            });
        }
        let n = self.n_bits();
        if pivot > n {
            return Err(GaError::IndexOutOfRange {
                index: pivot,
                len: n,
            });
        }

        let mut child = self.duplicate()?;
        child.bits.copy_range_from(&self.bits, 0, pivot)?;
        child.bits.copy_range_from(&partner.bits, pivot, n)?;
        let (genes, layout) = Self::decode_layout(&child.bits)?;
        child.genes = genes;
        child.layout = layout;
        debug_assert!(
            child.verify_round_trip().is_ok(),
            "crossover broke encode/decode round trip"
        );
        Ok(child)
    }

    /// Rebuilds a new chromosome by re-encoding the current genes.
    ///
    /// Equal to `self` only when encode/decode are true inverses.
    pub fn duplicate(&self) -> GaResult<Self> {
        let copy = Self::from_genes(self.genes.clone())?;
        debug_assert!(copy.bits == self.bits, "duplicate diverged from source bits");
        Ok(copy)
    }

    /// Checks that decoding then re-encoding reproduces the current bits.
    ///
    /// # Errors
    /// [`GaError::Decode`] describing the first divergence.
    pub fn verify_round_trip(&self) -> GaResult<()> {
        let genes = G::decode(&self.bits)?;
        if genes != self.genes {
            return Err(GaError::Decode(format!(
                "decoded genes {:?} differ from stored {:?}",
                genes, self.genes
            )));
        }
        let encoded: Vec<BitVector> = genes.iter().map(Encodable::encode).collect();
        let rebuilt = BitVector::concat(&encoded);
        if rebuilt != self.bits {
            return Err(GaError::Decode(format!(
                "re-encoded bits {} differ from {}",
                rebuilt, self.bits
            )));
        }
        Ok(())
    }
}

impl<G: Genome> Clone for Chromosome<G> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            genes: self.genes.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<G: Genome> PartialEq for Chromosome<G> {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.bits == other.bits
    }
}

impl<G: Genome> fmt::Debug for Chromosome<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chromosome")
            .field("bits", &self.bits.to_text())
            .field("genes", &self.genes)
            .finish()
    }
}

impl<G: Genome> fmt::Display for Chromosome<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.bits, f)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ga::types::FixedWidthGene;
    use crate::random::create_rng;

    /// 4-bit unsigned gene.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(crate) struct Nibble(pub u8);

    impl Encodable for Nibble {
        fn n_bits(&self) -> usize {
            4
        }
        fn encode(&self) -> BitVector {
            BitVector::from_u64(u64::from(self.0 & 0x0f), 4)
        }
    }

    impl FixedWidthGene for Nibble {
        const WIDTH: usize = 4;
        fn from_bits(bits: &BitVector) -> GaResult<Self> {
            bits.to_u64()
                .map(|v| Nibble(v as u8))
                .ok_or_else(|| GaError::Decode("nibble wider than 64 bits".into()))
        }
    }

    /// Any whole number of nibbles.
    pub(crate) struct Nibbles;

    impl Genome for Nibbles {
        type Gene = Nibble;
        fn decode(bits: &BitVector) -> GaResult<Vec<Nibble>> {
            if bits.len() % 4 != 0 {
                return Err(GaError::Decode(format!("{} is not a multiple of 4", bits.len())));
            }
            crate::ga::types::decode_uniform(bits, bits.len() / 4)
        }
    }

    /// A gene whose encoding is shorter than it claims.
    #[derive(Debug, Clone, PartialEq)]
    struct Liar;

    impl Encodable for Liar {
        fn n_bits(&self) -> usize {
            3
        }
        fn encode(&self) -> BitVector {
            BitVector::new(2)
        }
    }

    struct LiarGenome;

    impl Genome for LiarGenome {
        type Gene = Liar;
        fn decode(_bits: &BitVector) -> GaResult<Vec<Liar>> {
            Ok(vec![Liar])
        }
    }

    fn nibbles(values: &[u8]) -> Chromosome<Nibbles> {
        Chromosome::from_genes(values.iter().map(|&v| Nibble(v)).collect()).unwrap()
    }

    #[test]
    fn test_from_genes_concatenates_first_gene_high() {
        let c = nibbles(&[0x1, 0xa, 0xf]);
        assert_eq!(c.to_bit_text(), "000110101111");
        assert_eq!(c.n_bits(), 12);
        assert_eq!(c.layout(), &[4, 4, 4]);
    }

    #[test]
    fn test_from_text_decodes() {
        let c = Chromosome::<Nibbles>::from_text("00011010").unwrap();
        assert_eq!(c.genes(), &[Nibble(1), Nibble(10)]);
    }

    #[test]
    fn test_component_round_trip() {
        let genes = vec![Nibble(3), Nibble(0), Nibble(15), Nibble(8)];
        let c = Chromosome::<Nibbles>::from_genes(genes.clone()).unwrap();
        assert_eq!(c.decode().unwrap(), genes);
        assert!(c.verify_round_trip().is_ok());
    }

    #[test]
    fn test_width_mismatch_is_decode_error() {
        let result = Chromosome::<LiarGenome>::from_genes(vec![Liar]);
        assert!(matches!(result, Err(GaError::Decode(_))));
    }

    #[test]
    fn test_set_gene() {
        let mut c = nibbles(&[1, 2, 3]);
        c.set_gene(1, Nibble(0xf)).unwrap();
        assert_eq!(c.to_bit_text(), "000111110011");
        assert_eq!(
            c.set_gene(3, Nibble(0)),
            Err(GaError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_mutate_flips_exact_distinct_bits() {
        let mut rng = create_rng(42);
        for volume in 0..12 {
            let original = nibbles(&[0x5, 0xa, 0x3]);
            let mut c = original.clone();
            c.mutate(volume, &mut rng).unwrap();
            assert_eq!(c.bits().hamming_distance(original.bits()), volume);
            assert!(c.verify_round_trip().is_ok());
        }
    }

    #[test]
    fn test_mutate_clamps_volume() {
        let mut rng = create_rng(7);
        let original = nibbles(&[0, 0]);
        let mut c = original.clone();
        c.mutate(100, &mut rng).unwrap();
        assert_eq!(c.bits().hamming_distance(original.bits()), 7);
        assert_eq!(c.clean_mutation_volume(8), 7);
        assert_eq!(c.clean_mutation_volume(3), 3);
    }

    #[test]
    fn test_crossover_extremes() {
        let a = nibbles(&[0x0, 0x0, 0x0]);
        let b = nibbles(&[0xf, 0xf, 0xf]);

        let child = a.crossover(&b, 0).unwrap();
        assert_eq!(child.genes(), b.genes());

        let child = a.crossover(&b, 12).unwrap();
        assert_eq!(child.genes(), a.genes());
    }

    #[test]
    fn test_crossover_low_bits_from_self() {
        let a = nibbles(&[0x0, 0x0, 0x0]);
        let b = nibbles(&[0xf, 0xf, 0xf]);
        let child = a.crossover(&b, 4).unwrap();
        assert_eq!(child.to_bit_text(), "111111110000");
        assert_eq!(child.genes(), &[Nibble(0xf), Nibble(0xf), Nibble(0x0)]);

        let child = b.crossover(&a, 6).unwrap();
        assert_eq!(child.to_bit_text(), "000000111111");
    }

    #[test]
    fn test_crossover_type_mismatch() {
        let a = nibbles(&[1, 2, 3]);
        let b = nibbles(&[1, 2]);
        assert_eq!(
            a.crossover(&b, 2),
            Err(GaError::TypeMismatch {
                expected: vec![4, 4, 4],
                found: vec![4, 4],
            })
        );
    }

    #[test]
    fn test_crossover_pivot_out_of_range() {
        let a = nibbles(&[1, 2]);
        assert_eq!(
            a.crossover(&a, 9),
            Err(GaError::IndexOutOfRange { index: 9, len: 8 })
        );
    }

    #[test]
    fn test_duplicate_equals_source() {
        let a = nibbles(&[9, 4, 2]);
        let copy = a.duplicate().unwrap();
        assert_eq!(copy, a);
        assert_eq!(copy.genes(), a.genes());
    }

    /// A gene of 2 or 4 bits.
    #[derive(Debug, Clone, PartialEq)]
    struct Chunk {
        width: usize,
        value: u64,
    }

    impl Encodable for Chunk {
        fn n_bits(&self) -> usize {
            self.width
        }
        fn encode(&self) -> BitVector {
            BitVector::from_u64(self.value, self.width)
        }
    }

    /// Four bits read as one 4-bit chunk when the count of ones is odd,
    /// otherwise as two 2-bit chunks.
    struct ParityGenome;

    impl Genome for ParityGenome {
        type Gene = Chunk;
        fn decode(bits: &BitVector) -> GaResult<Vec<Chunk>> {
            let widths: &[usize] = if bits.iter().filter(|&b| b).count() % 2 == 1 {
                &[4]
            } else {
                &[2, 2]
            };
            bits.split(widths)?
                .iter()
                .map(|part| {
                    part.to_u64()
                        .map(|value| Chunk {
                            width: part.len(),
                            value,
                        })
                        .ok_or_else(|| GaError::Decode("chunk too wide".into()))
                })
                .collect()
        }
    }

    #[test]
    fn test_mutate_rederives_layout() {
        let mut c = Chromosome::<ParityGenome>::from_text("1000").unwrap();
        assert_eq!(c.layout(), &[4]);
        // One flip always makes the count of ones even
        c.mutate(1, &mut create_rng(42)).unwrap();
        assert_eq!(c.layout(), &[2, 2]);
        assert_eq!(c.genes().len(), 2);
    }

    #[test]
    fn test_crossover_rederives_layout() {
        let a = Chromosome::<ParityGenome>::from_text("1000").unwrap();
        let b = Chromosome::<ParityGenome>::from_text("0111").unwrap();
        assert_eq!(a.layout(), b.layout());

        // Bit 0 from a, bits 1..4 from b
        let child = a.crossover(&b, 1).unwrap();
        assert_eq!(child.to_bit_text(), "0110");
        assert_eq!(child.layout(), &[2, 2]);

        // The stale layout would have let this through
        assert!(matches!(
            child.crossover(&a, 2),
            Err(GaError::TypeMismatch { .. })
        ));
    }
}
