//! Target-fitness driver around a [`Generation`].

use super::generation::Generation;
use super::types::{FitnessFunction, Genome};
use crate::error::GaResult;
use log::info;

/// Result of a bounded [`GeneticAlgorithm::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct GaOutcome {
    /// Whether the target fitness was reached.
    pub reached: bool,

    /// Total number of evolve steps executed.
    pub generations: usize,

    /// Score of the most-fit chromosome after the last step.
    pub best_fitness: f64,

    /// Most-fit score after each evolve step.
    pub fitness_history: Vec<f64>,
}

/// Owns one [`Generation`] and a target-fitness threshold.
///
/// # Usage
///
/// ```ignore
/// let mut ga = GeneticAlgorithm::new(generation, 0.95);
/// while !ga.evolve()? {}
/// let best = ga.generation().most_fit();
/// ```
pub struct GeneticAlgorithm<G: Genome, F: FitnessFunction<G>> {
    generation: Generation<G, F>,
    target_fitness: f64,
}

impl<G: Genome, F: FitnessFunction<G>> GeneticAlgorithm<G, F> {
    /// Default target used by [`with_default_target`](Self::with_default_target).
    pub const DEFAULT_TARGET: f64 = 0.95;

    /// Wraps `generation` with a target fitness.
    pub fn new(generation: Generation<G, F>, target_fitness: f64) -> Self {
        Self {
            generation,
            target_fitness,
        }
    }

    /// Wraps `generation` with a target of 0.95.
    pub fn with_default_target(generation: Generation<G, F>) -> Self {
        Self::new(generation, Self::DEFAULT_TARGET)
    }

    /// The wrapped generation.
    pub fn generation(&self) -> &Generation<G, F> {
        &self.generation
    }

    /// Mutable access to the wrapped generation.
    pub fn generation_mut(&mut self) -> &mut Generation<G, F> {
        &mut self.generation
    }

    /// Fitness threshold that ends the search.
    pub fn target_fitness(&self) -> f64 {
        self.target_fitness
    }

    /// Evolves one step, then reports whether the most-fit chromosome
    /// scores at least the target.
    ///
    /// Performs no internal looping; callers repeat until `true`.
    pub fn evolve(&mut self) -> GaResult<bool> {
        let count = self.generation.evolve()?;
        let best = self
            .generation
            .rate_most_fit()
            .unwrap_or(f64::NEG_INFINITY);
        let reached = best >= self.target_fitness;
        if reached {
            info!(
                "target fitness {} reached at generation {} (score {:.4})",
                self.target_fitness, count, best
            );
        }
        Ok(reached)
    }

    /// Calls [`evolve`](Self::evolve) until the target is reached or
    /// `max_generations` steps have run.
    pub fn run(&mut self, max_generations: usize) -> GaResult<GaOutcome> {
        let mut fitness_history = Vec::with_capacity(max_generations);
        let mut reached = false;
        let mut generations = 0;

        while generations < max_generations {
            reached = self.evolve()?;
            generations += 1;
            fitness_history.push(
                self.generation
                    .rate_most_fit()
                    .unwrap_or(f64::NEG_INFINITY),
            );
            if reached {
                break;
            }
        }

        Ok(GaOutcome {
            reached,
            generations,
            best_fitness: fitness_history.last().copied().unwrap_or(f64::NEG_INFINITY),
            fitness_history,
        })
    }
}
