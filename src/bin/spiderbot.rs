//! Simulated spider-bot trainer.
//!
//! Evolves three-motor commands until the target fitness is reached. Motor
//! commands are logged instead of sent to hardware.
//!
//! Usage: `spiderbot [config.toml]`; set `RUST_LOG=info` to see progress.
//!
//! Without a config file the trainer crosses over at a random pivot; the
//! library default is the half-length pivot.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process;
use u_bitga::ga::{
    Chromosome, CrossoverPivot, FitnessFunction, Generation, GenerationConfig, GeneticAlgorithm,
};
use u_bitga::spiderbot::{spider_population, SpiderFitness, SpiderGenome};

#[derive(Deserialize, Debug)]
#[serde(default)]
struct DriverConfig {
    generation: GenerationConfig,
    target_fitness: f64,
    max_generations: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default().with_crossover_pivot(CrossoverPivot::Random),
            target_fitness: 0.95,
            max_generations: 10_000,
        }
    }
}

impl DriverConfig {
    fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DriverConfig = toml::from_str(content)?;
        Ok(config)
    }
}

/// Logs the command each motor would receive.
fn actuate(label: &str, chromosome: &Chromosome<SpiderGenome>) {
    let motors: Vec<String> = chromosome
        .genes()
        .iter()
        .map(|m| {
            let dir = if m.reverse { "backward" } else { "forward" };
            format!("{} {}", dir, m.regulated_speed())
        })
        .collect();
    log::info!(
        "{}: left [{}], back [{}], right [{}]",
        label,
        motors.first().map(String::as_str).unwrap_or("-"),
        motors.get(1).map(String::as_str).unwrap_or("-"),
        motors.get(2).map(String::as_str).unwrap_or("-"),
    );
}

fn main() {
    env_logger::init();
    log::info!("Booting spider-bot trainer...");

    let config = match std::env::args().nth(1) {
        Some(path) => match DriverConfig::load(Path::new(&path)) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load configuration '{}': {}", path, e);
                process::exit(1);
            }
        },
        None => DriverConfig::default(),
    };
    if let Err(e) = config.generation.validate() {
        log::error!("Invalid configuration: {}", e);
        process::exit(1);
    }
    log::info!("Configuration: {:?}", config);

    let population = match spider_population(config.generation.population_size) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Failed to build initial population: {}", e);
            process::exit(1);
        }
    };
    let generation = match Generation::new(config.generation.clone(), population, SpiderFitness) {
        Ok(g) => g,
        Err(e) => {
            log::error!("Failed to create generation: {}", e);
            process::exit(1);
        }
    };
    let mut ga = GeneticAlgorithm::new(generation, config.target_fitness);

    let mut reached = false;
    while !reached && ga.generation().count() < config.max_generations {
        let g = ga.generation();
        let n = g.population_size();
        log::info!("Generation {}", g.count());
        for (i, chromosome) in g.population().iter().enumerate() {
            let label = format!("Chromosome {}", g.count() * n + i + 1);
            actuate(&label, chromosome);
            log::debug!(
                "{}\n{}fitness: {:.5}",
                chromosome,
                chromosome.describe(),
                SpiderFitness.rate(chromosome)
            );
        }

        reached = match ga.evolve() {
            Ok(r) => r,
            Err(e) => {
                log::error!("Evolution failed: {}", e);
                process::exit(1);
            }
        };
    }

    let Some(best) = ga.generation().most_fit() else {
        log::warn!("No generation was evolved (max_generations = 0).");
        return;
    };
    if reached {
        log::info!("Target found after {} generations.", ga.generation().count());
    } else {
        log::warn!(
            "Target {} not reached within {} generations.",
            config.target_fitness,
            config.max_generations
        );
    }
    log::info!(
        "bits: {}\n{}fit: {}",
        best,
        best.describe(),
        SpiderFitness.rate(best)
    );
    actuate("Best", best);
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_bitga::ga::CrossoverStrategy;

    #[test]
    fn test_default_uses_random_pivot() {
        let config = DriverConfig::default();
        assert_eq!(config.generation.crossover_pivot, CrossoverPivot::Random);
        assert_eq!(config.generation.crossover_strategy, CrossoverStrategy::EliteHigh);
        assert_eq!(config.generation.population_size, 8);
        assert!((config.target_fitness - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_parse_overrides() {
        let text = r#"
target_fitness = 0.9
max_generations = 50

[generation]
population_size = 12
crossover_pivot = "Half"
"#;
        let config = DriverConfig::parse(text).unwrap();
        assert!((config.target_fitness - 0.9).abs() < 1e-12);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.generation.population_size, 12);
        assert_eq!(config.generation.crossover_pivot, CrossoverPivot::Half);
        assert!((config.generation.mutation_rate - 0.02).abs() < 1e-12);
    }
}
