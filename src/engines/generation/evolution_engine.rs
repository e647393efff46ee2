use crate::config::EvolutionConfig;
use crate::engines::generation::{
    genome::{random_population, Agent},
    operators::*,
    progress::NoopProgressCallback,
};
use crate::error::{GenetradeError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_agent_evaluated(&mut self, agent_num: usize, total: usize);
    fn on_generation_complete(&mut self, generation: usize, best_score: f64, population_size: usize);
}

/// An agent together with the score it earned in one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAgent {
    pub agent: Agent,
    pub score: f64,
}

/// A scored generation, index-aligned: `scores[i]` belongs to `agents[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub agents: Vec<Agent>,
    pub scores: Vec<f64>,
}

impl Generation {
    /// Highest-scoring agent. Ties go to the later index.
    pub fn best(&self) -> Option<ScoredAgent> {
        let mut best_idx: Option<usize> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            best_idx = match best_idx {
                Some(best) if cmp_score_nan_last(score, self.scores[best]) == Ordering::Less => Some(best),
                _ => Some(idx),
            };
        }
        best_idx.and_then(|idx| {
            self.agents.get(idx).map(|agent| ScoredAgent {
                agent: agent.clone(),
                score: self.scores[idx],
            })
        })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

pub struct GeneticAlgorithm<F> {
    fitness_function: F,
    population: Vec<Agent>,
    mutation_chance: f64,
    cross_rate: f64,
    reset_rate: f64,
    tournament_size: usize,
    generation: usize,
    rng: StdRng,
}

/// Check the population is non-empty, even, and uniformly sized; returns the gene count
fn validate_population(population: &[Agent]) -> Result<usize> {
    let first = population.first().ok_or(GenetradeError::EmptyPopulation)?;
    if population.len() % 2 != 0 {
        return Err(GenetradeError::OddPopulation(population.len()));
    }
    let gene_count = first.len();
    if gene_count == 0 {
        return Err(GenetradeError::EmptyAgent);
    }
    if let Some(agent) = population.iter().find(|a| a.len() != gene_count) {
        return Err(GenetradeError::GeneCountMismatch {
            expected: gene_count,
            actual: agent.len(),
        });
    }
    Ok(gene_count)
}

fn validate_rate(name: &str, rate: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GenetradeError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, rate
        )));
    }
    Ok(rate)
}

impl<F> GeneticAlgorithm<F> {
    /// Build an engine with the default operator settings.
    ///
    /// The mutation chance defaults to one expected mutation per agent.
    pub fn new(fitness_function: F, population: Vec<Agent>, rng: StdRng) -> Result<Self> {
        let gene_count = validate_population(&population)?;
        Ok(Self {
            fitness_function,
            population,
            mutation_chance: 1.0 / gene_count as f64,
            cross_rate: DEFAULT_CROSS_RATE,
            reset_rate: DEFAULT_RESET_RATE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            generation: 0,
            rng,
        })
    }

    /// Build an engine over an existing population using config settings
    pub fn with_config(fitness_function: F, population: Vec<Agent>, config: &EvolutionConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = Self::new(fitness_function, population, rng)?;
        engine.apply_config(config)?;
        Ok(engine)
    }

    /// Build an engine with a random initial population drawn from its own rng
    pub fn from_config(fitness_function: F, gene_count: usize, config: &EvolutionConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let population = random_population(config.population_size, gene_count, &mut rng);
        let mut engine = Self::new(fitness_function, population, rng)?;
        engine.apply_config(config)?;
        Ok(engine)
    }

    fn apply_config(&mut self, config: &EvolutionConfig) -> Result<()> {
        if let Some(chance) = config.mutation_chance {
            self.mutation_chance = validate_rate("Mutation chance", chance)?;
        }
        self.cross_rate = validate_rate("Cross rate", config.cross_rate)?;
        self.reset_rate = validate_rate("Reset rate", config.reset_rate)?;
        self.tournament_size = config.tournament_size;
        Ok(())
    }

    pub fn with_mutation_chance(mut self, mutation_chance: f64) -> Result<Self> {
        self.mutation_chance = validate_rate("Mutation chance", mutation_chance)?;
        Ok(self)
    }

    pub fn with_cross_rate(mut self, cross_rate: f64) -> Result<Self> {
        self.cross_rate = validate_rate("Cross rate", cross_rate)?;
        Ok(self)
    }

    pub fn with_reset_rate(mut self, reset_rate: f64) -> Result<Self> {
        self.reset_rate = validate_rate("Reset rate", reset_rate)?;
        Ok(self)
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    /// Replace the first agent, e.g. with one encoded from known-good parameters
    pub fn inject(&mut self, agent: Agent) -> Result<()> {
        let expected = self.population.first().map(Agent::len).unwrap_or(0);
        if agent.len() != expected {
            return Err(GenetradeError::GeneCountMismatch {
                expected,
                actual: agent.len(),
            });
        }
        self.population[0] = agent;
        Ok(())
    }

    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    /// Number of completed iterations
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn mutation_chance(&self) -> f64 {
        self.mutation_chance
    }

    pub fn cross_rate(&self) -> f64 {
        self.cross_rate
    }

    pub fn reset_rate(&self) -> f64 {
        self.reset_rate
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Select, recombine and mutate the scored population into the next one.
    /// Returns the replaced population with its scores.
    fn breed(&mut self, scores: Vec<f64>) -> Result<Generation> {
        let nan_count = scores.iter().filter(|s| s.is_nan()).count();
        if nan_count > 0 {
            log::warn!(
                "generation {}: {} agents scored NaN",
                self.generation,
                nan_count
            );
        }

        let mut parents = Vec::with_capacity(self.population.len());
        for _ in 0..self.population.len() {
            parents.push(tournament_selection(
                &self.population,
                &scores,
                self.tournament_size,
                &mut self.rng,
            )?);
        }

        let mut children = Vec::with_capacity(parents.len());
        for pair in parents.chunks_exact(2) {
            let (mut child1, mut child2) = crossover(&pair[0], &pair[1], self.cross_rate, &mut self.rng);

            mutate(&mut child1, self.mutation_chance, self.reset_rate, &mut self.rng);
            mutate(&mut child2, self.mutation_chance, self.reset_rate, &mut self.rng);

            children.push(child1);
            children.push(child2);
        }

        let previous = std::mem::replace(&mut self.population, children);
        self.generation += 1;

        Ok(Generation {
            agents: previous,
            scores,
        })
    }

    fn run_loop<C, S>(&mut self, iterations: usize, callback: &mut C, mut step: S) -> Result<Option<ScoredAgent>>
    where
        C: ProgressCallback,
        S: FnMut(&mut Self, &mut C) -> Result<Generation>,
    {
        let mut best: Option<ScoredAgent> = None;

        for _ in 0..iterations {
            let index = self.generation;
            callback.on_generation_start(index);

            let generation = step(&mut *self, &mut *callback)?;

            if let Some(candidate) = generation.best() {
                log::debug!(
                    "generation {}: best score {:.4} over {} agents",
                    index,
                    candidate.score,
                    generation.len()
                );
                callback.on_generation_complete(index, candidate.score, generation.len());

                let improved = match &best {
                    None => true,
                    Some(current) => cmp_score_nan_last(candidate.score, current.score) == Ordering::Greater,
                };
                if improved {
                    best = Some(candidate);
                }
            }
        }

        Ok(best)
    }
}

impl<F: FnMut(&Agent) -> f64> GeneticAlgorithm<F> {
    /// Score the current population, then replace it with the next generation.
    ///
    /// Returns the previous population and its scores; the new one is unscored.
    pub fn run_single_iteration(&mut self) -> Result<Generation> {
        self.evaluate_and_breed(&mut NoopProgressCallback)
    }

    /// Run `iterations` generations and return the best agent seen.
    ///
    /// `None` only when `iterations` is zero.
    pub fn run(&mut self, iterations: usize) -> Result<Option<ScoredAgent>> {
        self.run_with_callback(iterations, &mut NoopProgressCallback)
    }

    pub fn run_with_callback<C: ProgressCallback>(
        &mut self,
        iterations: usize,
        callback: &mut C,
    ) -> Result<Option<ScoredAgent>> {
        self.run_loop(iterations, callback, |engine, cb| engine.evaluate_and_breed(cb))
    }

    fn evaluate_and_breed<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<Generation> {
        let total = self.population.len();
        let mut scores = Vec::with_capacity(total);
        for (i, agent) in self.population.iter().enumerate() {
            scores.push((self.fitness_function)(agent));
            callback.on_agent_evaluated(i + 1, total);
        }
        self.breed(scores)
    }
}

impl<F: Fn(&Agent) -> f64 + Sync> GeneticAlgorithm<F> {
    /// Same as `run_single_iteration`, scoring agents on the rayon pool.
    ///
    /// Randomness is only drawn after scoring, so a fixed seed gives the same
    /// result as the sequential path.
    pub fn run_single_iteration_parallel(&mut self) -> Result<Generation> {
        self.evaluate_parallel_and_breed(&mut NoopProgressCallback)
    }

    pub fn run_parallel(&mut self, iterations: usize) -> Result<Option<ScoredAgent>> {
        self.run_parallel_with_callback(iterations, &mut NoopProgressCallback)
    }

    pub fn run_parallel_with_callback<C: ProgressCallback>(
        &mut self,
        iterations: usize,
        callback: &mut C,
    ) -> Result<Option<ScoredAgent>> {
        self.run_loop(iterations, callback, |engine, cb| engine.evaluate_parallel_and_breed(cb))
    }

    fn evaluate_parallel_and_breed<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<Generation> {
        let fitness = &self.fitness_function;
        let scores: Vec<f64> = self.population.par_iter().map(|agent| fitness(agent)).collect();

        let total = scores.len();
        for i in 0..total {
            callback.on_agent_evaluated(i + 1, total);
        }
        self.breed(scores)
    }
}
