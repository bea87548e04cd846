//! Bit-vector Genetic Algorithm engine.
//!
//! Domains plug in by implementing [`Encodable`] for their genes,
//! [`Genome`] for their chromosome kind, and [`FitnessFunction`] for
//! scoring. The engine handles ranking, probabilistic survival, crossover,
//! and mutation.
//!
//! # Core Traits
//!
//! - [`Encodable`]: a gene with a fixed, self-declared bit width
//! - [`Genome`]: the decode mapping from bits back to genes
//! - [`FitnessFunction`]: candidate score in `[0, 1]`, higher is better
//!
//! # Key Types
//!
//! - [`Chromosome`]: bit content plus decoded genes; mutation and crossover
//! - [`GenerationConfig`]: population size, mutation, crossover policy, seed
//! - [`Generation`]: one population and the evolve step
//! - [`GeneticAlgorithm`]: evolves until a target fitness is met
//!
//! # Example
//!
//! ```
//! use u_bitga::ga::{Generation, GenerationConfig, GeneticAlgorithm};
//! use u_bitga::spiderbot::{spider_population, SpiderFitness};
//!
//! let config = GenerationConfig::default().with_seed(7);
//! let population = spider_population(config.population_size).unwrap();
//! let generation = Generation::new(config, population, SpiderFitness).unwrap();
//! let mut ga = GeneticAlgorithm::new(generation, 0.95);
//!
//! let outcome = ga.run(10).unwrap();
//! assert_eq!(outcome.generations, ga.generation().count());
//! ```
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod algorithm;
mod chromosome;
mod config;
mod generation;
mod ranking;
mod types;

pub use algorithm::{GaOutcome, GeneticAlgorithm};
pub use chromosome::Chromosome;
pub use config::{
    clean_mutation_rate, CrossoverPivot, CrossoverStrategy, GenerationConfig, SelectionScheme,
};
pub use generation::{random_population, Generation, GenerationStats};
pub use ranking::rank;
pub use types::{decode_uniform, Encodable, FitnessFunction, FixedWidthGene, Genome};
