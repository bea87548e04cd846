//! Generation configuration.
//!
//! [`GenerationConfig`] holds every parameter of the evolution step:
//! population size, mutation, crossover policy, selection scheme, and seed.

use rand::Rng;

/// Which parent supplies which segment of an offspring.
///
/// Bits `[0, pivot)` are the low (least-significant) segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverStrategy {
    /// Elite anchor supplies the high segment: `worse.crossover(elite, pivot)`.
    #[default]
    EliteHigh,
    /// Elite anchor supplies the low segment: `elite.crossover(worse, pivot)`.
    EliteLow,
    /// Fair coin per offspring between the two.
    Random,
}

/// Where offspring are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverPivot {
    /// Half the total bit length.
    #[default]
    Half,
    /// The boundary ending the first (most-significant) gene.
    AfterFirstGene,
    /// The boundary starting the last (least-significant) gene.
    BeforeLastGene,
    /// Uniform in `[0, n_bits)`.
    Random,
}

impl CrossoverPivot {
    /// Resolves the pivot for a chromosome with the given gene `layout`.
    ///
    /// Gene 0 occupies the most-significant bits, so the boundary after it
    /// sits at logical index `n_bits - layout[0]`, and the last gene spans
    /// `[0, layout[last])`.
    pub fn position<R: Rng>(&self, layout: &[usize], rng: &mut R) -> usize {
        let n: usize = layout.iter().sum();
        match self {
            CrossoverPivot::Half => n / 2,
            CrossoverPivot::AfterFirstGene => n - layout.first().copied().unwrap_or(0),
            CrossoverPivot::BeforeLastGene => layout.last().copied().unwrap_or(0),
            CrossoverPivot::Random => {
                if n == 0 {
                    0
                } else {
                    rng.random_range(0..n)
                }
            }
        }
    }
}

/// How lower-ranked individuals are offered for survival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionScheme {
    /// Every outer step rescans all lower ranks, so an individual may be
    /// offered (and admitted) once per higher-ranked anchor.
    #[default]
    Revisiting,
    /// Each individual is offered at most once per evolve, and ranks already
    /// admitted are skipped as anchors.
    NonRevisiting,
}

/// Configuration of a [`Generation`](super::Generation).
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GenerationConfig;
///
/// let config = GenerationConfig::default();
/// assert_eq!(config.population_size, 8);
/// assert_eq!(config.mutation_volume, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::{CrossoverPivot, CrossoverStrategy, GenerationConfig};
///
/// let config = GenerationConfig::default()
///     .with_population_size(16)
///     .with_mutation_rate(0.05)
///     .with_crossover_strategy(CrossoverStrategy::Random)
///     .with_crossover_pivot(CrossoverPivot::AfterFirstGene)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    /// Number of chromosomes, fixed for the generation's lifetime.
    ///
    /// Ranking is O(N²); keep this in the tens.
    pub population_size: usize,

    /// Probability that an elite anchor is mutated before admission (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of distinct bits flipped per mutation.
    pub mutation_volume: usize,

    /// Which parent supplies which offspring segment.
    pub crossover_strategy: CrossoverStrategy,

    /// Where offspring are split.
    pub crossover_pivot: CrossoverPivot,

    /// Survival offering scheme.
    pub selection: SelectionScheme,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            mutation_rate: 0.02,
            mutation_volume: 1,
            crossover_strategy: CrossoverStrategy::default(),
            crossover_pivot: CrossoverPivot::default(),
            selection: SelectionScheme::default(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = clean_mutation_rate(rate);
        self
    }

    /// Sets the mutation volume.
    pub fn with_mutation_volume(mut self, volume: usize) -> Self {
        self.mutation_volume = volume;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover_strategy(mut self, strategy: CrossoverStrategy) -> Self {
        self.crossover_strategy = strategy;
        self
    }

    /// Sets the crossover pivot policy.
    pub fn with_crossover_pivot(mut self, pivot: CrossoverPivot) -> Self {
        self.crossover_pivot = pivot;
        self
    }

    /// Sets the selection scheme.
    pub fn with_selection(mut self, selection: SelectionScheme) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            ));
        }
        Ok(())
    }
}

/// Clamps a mutation rate to `[0, 1]`; NaN becomes 0.
pub fn clean_mutation_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        return 0.0;
    }
    rate.clamp(0.0, 1.0)
}
