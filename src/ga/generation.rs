//! A population snapshot and the evolution step.
//!
//! [`Generation`] owns N chromosomes, their fitness scores, and the
//! rank → survive → reproduce algorithm:
//!
//! 1. Rate the population if the scores are stale.
//! 2. Rank by descending fitness ([`rank`]).
//! 3. Walk the ranking with an outer cursor. Each anchor is admitted,
//!    mutated with probability `mutation_rate`. Every lower rank is then
//!    offered survival with probability equal to its own raw score; a
//!    survivor is always mutated, admitted, and crossed with the anchor to
//!    produce one offspring.
//! 4. Stop as soon as the new population holds N chromosomes.

use super::chromosome::Chromosome;
use super::config::{clean_mutation_rate, CrossoverStrategy, GenerationConfig, SelectionScheme};
use super::ranking::rank;
use super::types::{FitnessFunction, Genome};
use crate::bits::BitVector;
use crate::error::{GaError, GaResult};
use crate::random::rng_from_seed;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt;

/// Summary of the current fitness scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generation counter.
    pub generation: usize,
    /// Highest score.
    pub best: f64,
    /// Mean score.
    pub mean: f64,
    /// Lowest score.
    pub worst: f64,
    /// Whether the scores belong to the current population.
    pub rated: bool,
}

/// One population and its evolution state.
///
/// Starts *unrated*; [`rate`](Self::rate) scores the population, and
/// [`evolve`](Self::evolve) replaces it wholesale, leaving the new
/// population unrated again.
pub struct Generation<G: Genome, F: FitnessFunction<G>> {
    config: GenerationConfig,
    population: Vec<Chromosome<G>>,
    /// Index-aligned with `population` as of the last rating pass.
    fitness: Vec<f64>,
    rated: bool,
    most_fit: Option<Chromosome<G>>,
    count: usize,
    fitness_fn: F,
    rng: StdRng,
}

impl<G: Genome, F: FitnessFunction<G>> Generation<G, F> {
    /// Creates a generation from an explicit initial population.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] if `config` fails validation, and
    /// [`GaError::InvalidPopulation`] if the population size differs from
    /// `config.population_size`, a chromosome has no bits, or layouts differ.
    pub fn new(
        config: GenerationConfig,
        population: Vec<Chromosome<G>>,
        fitness_fn: F,
    ) -> GaResult<Self> {
        let rng = rng_from_seed(config.seed);
        Self::assemble(config, population, fitness_fn, rng)
    }

    /// Creates a generation whose initial population comes from `build`.
    ///
    /// `build` receives the population size and the generation's own random
    /// source, so a seeded config reproduces the initial population too.
    pub fn with_builder<B>(config: GenerationConfig, fitness_fn: F, build: B) -> GaResult<Self>
    where
        B: FnOnce(usize, &mut StdRng) -> GaResult<Vec<Chromosome<G>>>,
    {
        config.validate().map_err(GaError::InvalidConfig)?;
        let mut rng = rng_from_seed(config.seed);
        let population = build(config.population_size, &mut rng)?;
        Self::assemble(config, population, fitness_fn, rng)
    }

    fn assemble(
        config: GenerationConfig,
        population: Vec<Chromosome<G>>,
        fitness_fn: F,
        rng: StdRng,
    ) -> GaResult<Self> {
        config.validate().map_err(GaError::InvalidConfig)?;

        if population.len() != config.population_size {
            return Err(GaError::InvalidPopulation(format!(
                "expected {} chromosomes, got {}",
                config.population_size,
                population.len()
            )));
        }
        let layout = population[0].layout();
        if population[0].n_bits() == 0 {
            return Err(GaError::InvalidPopulation("chromosomes have no bits".into()));
        }
        if let Some(i) = population.iter().position(|c| c.layout() != layout) {
            return Err(GaError::InvalidPopulation(format!(
                "chromosome {} has layout {:?}, expected {:?}",
                i,
                population[i].layout(),
                layout
            )));
        }

        let n = population.len();
        Ok(Self {
            config,
            population,
            fitness: vec![0.0; n],
            rated: false,
            most_fit: None,
            count: 0,
            fitness_fn,
            rng,
        })
    }

    // ---- Accessors ----

    /// Number of completed evolve steps.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Current population. Valid until the next [`evolve`](Self::evolve).
    pub fn population(&self) -> &[Chromosome<G>] {
        &self.population
    }

    /// Population size N.
    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Chromosome at population index `i`.
    pub fn chromosome_at(&self, i: usize) -> Option<&Chromosome<G>> {
        self.population.get(i)
    }

    /// Decoded genes of every chromosome, in population order.
    pub fn decoded_population(&self) -> Vec<&[G::Gene]> {
        self.population.iter().map(Chromosome::genes).collect()
    }

    /// Fitness scores as of the last rating pass.
    ///
    /// Aligned with [`population`](Self::population) only while
    /// [`is_rated`](Self::is_rated) is true.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Whether the fitness scores belong to the current population.
    pub fn is_rated(&self) -> bool {
        self.rated
    }

    /// Best chromosome of the population ranked by the last evolve, as it
    /// was before reproduction. `None` before the first evolve.
    pub fn most_fit(&self) -> Option<&Chromosome<G>> {
        self.most_fit.as_ref()
    }

    /// Scores [`most_fit`](Self::most_fit) with the fitness function.
    pub fn rate_most_fit(&self) -> Option<f64> {
        self.most_fit.as_ref().map(|c| self.fitness_fn.rate(c))
    }

    /// The fitness function.
    pub fn fitness_fn(&self) -> &F {
        &self.fitness_fn
    }

    /// The active configuration.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Mutation probability for elite anchors.
    pub fn mutation_rate(&self) -> f64 {
        self.config.mutation_rate
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn set_mutation_rate(&mut self, rate: f64) {
        self.config.mutation_rate = clean_mutation_rate(rate);
    }

    /// Number of bits flipped per mutation.
    pub fn mutation_volume(&self) -> usize {
        self.config.mutation_volume
    }

    /// Sets the mutation volume.
    pub fn set_mutation_volume(&mut self, volume: usize) {
        self.config.mutation_volume = volume;
    }

    /// Summary of the current fitness scores.
    pub fn stats(&self) -> GenerationStats {
        let n = self.fitness.len().max(1) as f64;
        GenerationStats {
            generation: self.count,
            best: self.fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: self.fitness.iter().sum::<f64>() / n,
            worst: self.fitness.iter().copied().fold(f64::INFINITY, f64::min),
            rated: self.rated,
        }
    }

    // ---- Evolution ----

    /// Scores every chromosome and marks the generation rated.
    ///
    /// Scores outside `[0, 1]` are kept as-is and logged.
    pub fn rate(&mut self) {
        for (slot, chromosome) in self.fitness.iter_mut().zip(self.population.iter()) {
            *slot = self.fitness_fn.rate(chromosome);
        }
        let out_of_range = self
            .fitness
            .iter()
            .filter(|f| !(0.0..=1.0).contains(*f))
            .count();
        if out_of_range > 0 {
            warn!(
                "generation {}: {} fitness scores outside [0, 1] used as survival probabilities",
                self.count, out_of_range
            );
        }
        self.rated = true;
    }

    /// Runs one evolution step and returns the new generation count.
    ///
    /// # Errors
    /// Propagates operator failures (a genome whose decode rejects mutated
    /// or recombined bits). The population is left unchanged on error.
    pub fn evolve(&mut self) -> GaResult<usize> {
        if !self.rated {
            self.rate();
        }

        let order = rank(&self.fitness);
        let n = self.population.len();
        let most_fit = self.population[order[0]].clone();
        debug!(
            "generation {}: best {:.4} ({}), worst {:.4}",
            self.count,
            self.fitness[order[0]],
            most_fit,
            self.fitness[order[n - 1]]
        );

        let mut working = self.population.clone();
        let next = self.reproduce(&order, &mut working)?;
        debug_assert_eq!(next.len(), n);

        self.most_fit = Some(most_fit);
        self.population = next;
        self.rated = false;
        self.count += 1;
        Ok(self.count)
    }

    /// Builds the next population from `working` (a copy of the current
    /// one, mutated in place as individuals are admitted).
    fn reproduce(
        &mut self,
        order: &[usize],
        working: &mut [Chromosome<G>],
    ) -> GaResult<Vec<Chromosome<G>>> {
        let n = order.len();
        let volume = self.config.mutation_volume;
        let revisit = self.config.selection == SelectionScheme::Revisiting;

        let mut next = Vec::with_capacity(n);
        // Indexed by rank position
        let mut admitted = vec![false; n];
        let mut offered = vec![false; n];
        let mut offspring = 0usize;

        for j in 0..n {
            if next.len() >= n {
                break;
            }
            if !revisit && admitted[j] {
                continue;
            }

            let anchor = order[j];
            if self.rng.random_bool(self.config.mutation_rate) {
                working[anchor].mutate(volume, &mut self.rng)?;
            }
            next.push(working[anchor].clone());
            admitted[j] = true;

            for k in (j + 1)..n {
                if next.len() >= n {
                    break;
                }
                if !revisit && (offered[k] || admitted[k]) {
                    continue;
                }
                offered[k] = true;

                let worse = order[k];
                let survival = self.fitness[worse];
                let draw: f64 = self.rng.random();
                if survival.is_nan() || draw >= survival {
                    continue;
                }

                working[worse].mutate(volume, &mut self.rng)?;
                next.push(working[worse].clone());
                admitted[k] = true;

                if next.len() < n {
                    let child = self.breed(&working[anchor], &working[worse])?;
                    next.push(child);
                    offspring += 1;
                }
            }
        }

        debug!(
            "generation {}: {} offspring in population of {}",
            self.count, offspring, n
        );
        Ok(next)
    }

    fn breed(&mut self, elite: &Chromosome<G>, worse: &Chromosome<G>) -> GaResult<Chromosome<G>> {
        let pivot = self
            .config
            .crossover_pivot
            .position(elite.layout(), &mut self.rng);
        let elite_low = match self.config.crossover_strategy {
            CrossoverStrategy::EliteLow => true,
            CrossoverStrategy::EliteHigh => false,
            CrossoverStrategy::Random => self.rng.random_bool(0.5),
        };
        if elite_low {
            elite.crossover(worse, pivot)
        } else {
            worse.crossover(elite, pivot)
        }
    }
}

/// Random-bit initial population of `n` chromosomes, `width` bits each.
///
/// Chromosomes whose bits the genome rejects are redrawn, up to a bounded
/// number of attempts.
pub fn random_population<G: Genome, R: Rng>(
    n: usize,
    width: usize,
    rng: &mut R,
) -> GaResult<Vec<Chromosome<G>>> {
    const MAX_ATTEMPTS: usize = 64;
    (0..n)
        .map(|_| {
            let mut last_err = GaError::InvalidPopulation("no attempts made".into());
            for _ in 0..MAX_ATTEMPTS {
                match Chromosome::from_bits(BitVector::random(width, rng)) {
                    Ok(c) => return Ok(c),
                    Err(e) => last_err = e,
                }
            }
            Err(last_err)
        })
        .collect()
}

impl<G: Genome, F: FitnessFunction<G>> fmt::Display for Generation<G, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "g{}:", self.count)?;
        for (i, (chromosome, score)) in self.population.iter().zip(&self.fitness).enumerate() {
            writeln!(f, "  {}. Chromosome: {}    Fitness: {}", i + 1, chromosome, score)?;
        }
        Ok(())
    }
}
