//! Property-based tests for u-bitga
//!
//! Uses proptest to verify invariants of the bit vector, chromosome
//! operators, ranking, and the evolution step.

use proptest::prelude::*;
use u_bitga::bits::{bin_text_to_dec, count_bits, dec_to_bin_text, BitVector};
use u_bitga::ga::{
    decode_uniform, rank, Chromosome, CrossoverPivot, CrossoverStrategy, Encodable,
    FixedWidthGene, Generation, GenerationConfig, Genome, SelectionScheme,
};
use u_bitga::random::create_rng;
use u_bitga::spiderbot::{spider_population, MotorGene, SpiderFitness};
use u_bitga::{GaError, GaResult};

/// 4-bit gene for generic chromosome properties.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Nibble(u8);

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
            .ok_or_else(|| GaError::Decode("nibble too wide".into()))
    }
}

struct Nibbles;

impl Genome for Nibbles {
    type Gene = Nibble;
    fn decode(bits: &BitVector) -> GaResult<Vec<Nibble>> {
        decode_uniform(bits, bits.len() / 4)
    }
}

fn nibbles(values: &[u8]) -> Chromosome<Nibbles> {
    Chromosome::from_genes(values.iter().map(|&v| Nibble(v & 0x0f)).collect()).unwrap()
}

fn strategy_of(i: u8) -> CrossoverStrategy {
    match i % 3 {
        0 => CrossoverStrategy::EliteHigh,
        1 => CrossoverStrategy::EliteLow,
        _ => CrossoverStrategy::Random,
    }
}

fn pivot_of(i: u8) -> CrossoverPivot {
    match i % 4 {
        0 => CrossoverPivot::Half,
        1 => CrossoverPivot::AfterFirstGene,
        2 => CrossoverPivot::BeforeLastGene,
        _ => CrossoverPivot::Random,
    }
}

proptest! {
    // ==================== Conversion Properties ====================

    #[test]
    fn dec_text_round_trip(x in any::<u64>()) {
        prop_assert_eq!(bin_text_to_dec(&dec_to_bin_text(x)).unwrap(), x);
    }

    #[test]
    fn text_dec_round_trip_drops_leading_zeros(text in "[01]{1,48}") {
        let value = bin_text_to_dec(&text).unwrap();
        let trimmed = text.trim_start_matches('0');
        let expected = if trimmed.is_empty() { "0" } else { trimmed };
        prop_assert_eq!(dec_to_bin_text(value), expected);
    }

    #[test]
    fn count_bits_is_log2_plus_one(x in 2u64..) {
        prop_assert_eq!(count_bits(x), (64 - x.leading_zeros()) as usize);
    }

    // ==================== BitVector Properties ====================

    #[test]
    fn bit_vector_text_round_trip(text in "[01]{0,64}") {
        let v = BitVector::from_text(&text).unwrap();
        prop_assert_eq!(v.to_text(), text.clone());
        prop_assert_eq!(v.len(), text.len());
    }

    #[test]
    fn bit_index_is_little_endian(text in "[01]{1,64}") {
        let v = BitVector::from_text(&text).unwrap();
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        for i in 0..n {
            let expected = if chars[n - 1 - i] == '1' { 1 } else { 0 };
            prop_assert_eq!(v.get_bit(i).unwrap(), expected);
        }
        prop_assert!(v.get_bit(n).is_err());
    }

    // ==================== Chromosome Properties ====================

    #[test]
    fn component_round_trip(values in prop::collection::vec(0u8..16, 1..10)) {
        let c = nibbles(&values);
        let decoded: Vec<u8> = c.decode().unwrap().iter().map(|n| n.0).collect();
        prop_assert_eq!(decoded, values);
        prop_assert!(c.verify_round_trip().is_ok());
    }

    #[test]
    fn mutate_flips_exact_distinct_bits(
        values in prop::collection::vec(0u8..16, 1..8),
        volume in 0usize..40,
        seed in any::<u64>()
    ) {
        let original = nibbles(&values);
        let mut mutated = original.clone();
        let mut rng = create_rng(seed);
        mutated.mutate(volume, &mut rng).unwrap();

        let n = original.n_bits();
        let expected = volume.min(n - 1);
        prop_assert_eq!(mutated.bits().hamming_distance(original.bits()), expected);
        prop_assert!(mutated.verify_round_trip().is_ok());
    }

    #[test]
    fn crossover_takes_low_from_self(
        a in prop::collection::vec(0u8..16, 3),
        b in prop::collection::vec(0u8..16, 3),
        pivot in 0usize..=12
    ) {
        let ca = nibbles(&a);
        let cb = nibbles(&b);
        let child = ca.crossover(&cb, pivot).unwrap();
        for i in 0..12 {
            let source = if i < pivot { ca.bits() } else { cb.bits() };
            prop_assert_eq!(child.bits().get_bit(i).unwrap(), source.get_bit(i).unwrap());
        }
        prop_assert!(child.verify_round_trip().is_ok());
    }

    #[test]
    fn crossover_extremes_copy_a_parent(
        a in prop::collection::vec(0u8..16, 1..6),
        seed in any::<u64>()
    ) {
        let ca = nibbles(&a);
        let mut cb = ca.clone();
        cb.mutate(3, &mut create_rng(seed)).unwrap();
        let n = ca.n_bits();
        prop_assert_eq!(ca.crossover(&cb, 0).unwrap(), cb.clone());
        prop_assert_eq!(ca.crossover(&cb, n).unwrap(), ca.clone());
        prop_assert!(ca.crossover(&cb, n + 1).is_err());
    }

    // ==================== Ranking Properties ====================

    #[test]
    fn rank_is_descending_with_stable_ties(levels in prop::collection::vec(0u8..5, 0..30)) {
        let fitness: Vec<f64> = levels.iter().map(|&l| f64::from(l) / 4.0).collect();
        let order = rank(&fitness);

        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..fitness.len()).collect::<Vec<_>>());

        for w in order.windows(2) {
            let (a, b) = (w[0], w[1]);
            prop_assert!(fitness[a] >= fitness[b]);
            if fitness[a] == fitness[b] {
                prop_assert!(a < b);
            }
        }
    }

    // ==================== Generation Properties ====================

    #[test]
    fn evolve_preserves_population_size(
        seed in any::<u64>(),
        strategy in 0u8..3,
        pivot in 0u8..4,
        non_revisiting in any::<bool>(),
        rate in 0.0f64..=1.0,
        steps in 1usize..6
    ) {
        let selection = if non_revisiting {
            SelectionScheme::NonRevisiting
        } else {
            SelectionScheme::Revisiting
        };
        let config = GenerationConfig::default()
            .with_mutation_rate(rate)
            .with_crossover_strategy(strategy_of(strategy))
            .with_crossover_pivot(pivot_of(pivot))
            .with_selection(selection)
            .with_seed(seed);
        let population = spider_population(config.population_size).unwrap();
        let mut generation = Generation::new(config, population, SpiderFitness).unwrap();

        for step in 1..=steps {
            prop_assert_eq!(generation.evolve().unwrap(), step);
            prop_assert_eq!(generation.population().len(), 8);
            prop_assert!(generation.population().iter().all(|c| c.layout() == [9, 9, 9]));
        }
        prop_assert_eq!(generation.count(), steps);
    }

    #[test]
    fn motor_gene_round_trip(speed in any::<u8>(), reverse in any::<bool>()) {
        let gene = MotorGene::new(speed, reverse);
        prop_assert_eq!(MotorGene::from_bits(&gene.encode()).unwrap(), gene);
    }

    #[test]
    fn spider_fitness_in_unit_range(
        speeds in prop::array::uniform3(any::<u8>()),
        dirs in prop::array::uniform3(any::<bool>())
    ) {
        let motors = [
            MotorGene::new(speeds[0], dirs[0]),
            MotorGene::new(speeds[1], dirs[1]),
            MotorGene::new(speeds[2], dirs[2]),
        ];
        let f = SpiderFitness.score(&motors);
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&f));
    }
}
