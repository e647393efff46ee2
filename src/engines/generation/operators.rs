use crate::engines::generation::genome::{Agent, Gene};
use crate::error::{GenetradeError, Result};
use crate::utils::{mean, sample_std_dev};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;
pub const DEFAULT_CROSS_RATE: f64 = 0.9;
pub const DEFAULT_RESET_RATE: f64 = 0.1;

/// Compare two scores, treating NaN as lower than every number.
pub fn cmp_score_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Tournament selection: sample `tournament_size` distinct agents and return the best.
///
/// Ties go to the entry sampled last.
pub fn tournament_selection<R: Rng>(
    population: &[Agent],
    scores: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> Result<Agent> {
    if population.len() != scores.len() {
        return Err(GenetradeError::MisalignedScores {
            population: population.len(),
            scores: scores.len(),
        });
    }
    if tournament_size == 0 || tournament_size > population.len() {
        return Err(GenetradeError::InvalidTournamentSize {
            size: tournament_size,
            population: population.len(),
        });
    }

    let sampled = rand::seq::index::sample(rng, population.len(), tournament_size);

    let mut best_idx = None;
    for idx in sampled.iter() {
        best_idx = match best_idx {
            Some(best) if cmp_score_nan_last(scores[idx], scores[best]) == Ordering::Less => Some(best),
            _ => Some(idx),
        };
    }

    // tournament_size >= 1, so at least one index was sampled
    let winner = best_idx.ok_or(GenetradeError::EmptyPopulation)?;
    Ok(population[winner].clone())
}

/// Random selection: uniform pick, ignoring fitness
pub fn random_selection<R: Rng>(population: &[Agent], rng: &mut R) -> Option<Agent> {
    population.choose(rng).cloned()
}

/// Single-point crossover: with probability `cross_rate`, swap the genes before a
/// uniformly drawn point in `[0, len]`. Otherwise the children are plain copies.
pub fn crossover<R: Rng>(
    parent1: &Agent,
    parent2: &Agent,
    cross_rate: f64,
    rng: &mut R,
) -> (Agent, Agent) {
    if rng.gen::<f64>() < cross_rate {
        let len = parent1.len().min(parent2.len());
        let point = rng.gen_range(0..=len);
        log::trace!("crossover at point {}/{}", point, len);
        crossover_at(parent1, parent2, point)
    } else {
        (parent1.clone(), parent2.clone())
    }
}

/// Swap the genes at indices `[0, point)` between copies of both parents.
///
/// `point` is clamped to the shorter parent's length.
pub fn crossover_at(parent1: &Agent, parent2: &Agent, point: usize) -> (Agent, Agent) {
    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    let point = point.min(child1.len()).min(child2.len());
    child1.genes_mut()[..point].swap_with_slice(&mut child2.genes_mut()[..point]);

    (child1, child2)
}

/// Normal distribution fit from an agent's own gene values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneDistribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl GeneDistribution {
    /// Fit mean and sample standard deviation.
    ///
    /// A single-gene agent gets a zero spread; an empty one yields `None`.
    pub fn from_agent(agent: &Agent) -> Option<Self> {
        let values = agent.values();
        let mean = mean(&values)?;
        let std_dev = sample_std_dev(&values).unwrap_or(0.0);
        Some(Self { mean, std_dev })
    }

    /// Draw a gene. Zero (or non-finite) spread returns the mean.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Gene {
        if self.std_dev <= 0.0 || !self.std_dev.is_finite() {
            return Gene::new(self.mean);
        }
        match Normal::new(self.mean, self.std_dev) {
            Ok(normal) => Gene::new(normal.sample(rng)),
            Err(_) => Gene::new(self.mean),
        }
    }
}

/// Mutation: each gene is replaced with probability `mutation_chance`.
///
/// A replaced gene is a fresh uniform draw with probability `reset_rate`, else a
/// sample from the agent's own gene distribution. The distribution is snapshotted
/// before any gene of this pass changes. Returns how many genes were replaced.
pub fn mutate<R: Rng>(
    agent: &mut Agent,
    mutation_chance: f64,
    reset_rate: f64,
    rng: &mut R,
) -> usize {
    let distribution = match GeneDistribution::from_agent(agent) {
        Some(d) => d,
        None => return 0,
    };

    let mut replaced = 0;
    for gene in agent.genes_mut() {
        if rng.gen::<f64>() < mutation_chance {
            *gene = if rng.gen::<f64>() < reset_rate {
                Gene::random(rng)
            } else {
                distribution.sample(rng)
            };
            replaced += 1;
        }
    }

    if replaced > 0 {
        log::trace!("mutated {} of {} genes", replaced, agent.len());
    }
    replaced
}
