//! Genome representation for parameter tuning
//!
//! A `Gene` is a single normalized value in `[0, 1)`. An `Agent` is an ordered,
//! fixed-length sequence of genes, one per tunable strategy parameter. The
//! `Parameter` layer maps each gene onto a bounded real-world quantity:
//! - How long to hold a position
//! - Which candle granularity to use
//! - Any other bounded knob a strategy exposes
//!
//! # Why normalized genes?
//!
//! Genetic operators stay generic when every dimension lives in the same range:
//! - **Crossover**: Swapping gene segments is plain slice work
//! - **Mutation**: Resets and Gaussian resamples share one clamp
//! - **No invalid states**: Every agent decodes to an in-bounds configuration
//!
//! # Ownership
//!
//! Genes are plain values, so cloning an `Agent` is always a deep copy; no two
//! agents ever share a gene.
//!
//! # Example
//!
//! ```
//! use genetrade::Agent;
//!
//! let agent = Agent::from_values(&[0.1, 0.9]);
//! assert_eq!(agent.to_string(), "Agent([0.10, 0.90])");
//! ```

use crate::utils::clamp_half_open;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Gene(f64);

impl Gene {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    /// Build a gene, clamping into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        Self(clamp_half_open(value, Self::MIN, Self::MAX))
    }

    /// Uniform draw from `[0, 1)`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen::<f64>())
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Replace the value, clamping into `[0, 1)`.
    pub fn set(&mut self, value: f64) {
        *self = Self::new(value);
    }
}

impl Default for Gene {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<f64> for Gene {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Gene> for f64 {
    fn from(gene: Gene) -> Self {
        gene.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Agent {
    genes: Vec<Gene>,
}

impl Agent {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(Gene::new).collect())
    }

    pub fn random<R: Rng>(gene_count: usize, rng: &mut R) -> Self {
        Self::new((0..gene_count).map(|_| Gene::random(rng)).collect())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    pub fn gene(&self, index: usize) -> Option<&Gene> {
        self.genes.get(index)
    }

    pub fn gene_mut(&mut self, index: usize) -> Option<&mut Gene> {
        self.genes.get_mut(index)
    }

    pub fn values(&self) -> Vec<f64> {
        self.genes.iter().map(Gene::value).collect()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let genes = self
            .genes
            .iter()
            .map(|g| format!("{:.2}", g.value()))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Agent([{}])", genes)
    }
}

/// Generate a random population of `size` agents with `gene_count` genes each
pub fn random_population<R: Rng>(size: usize, gene_count: usize, rng: &mut R) -> Vec<Agent> {
    (0..size).map(|_| Agent::random(gene_count, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gene_clamps_into_half_open_range() {
        assert_eq!(Gene::new(-3.0).value(), 0.0);
        assert!(Gene::new(1.0).value() < 1.0);
        assert!(Gene::new(42.0).value() < 1.0);
        assert_eq!(Gene::new(0.3).value(), 0.3);

        let mut gene = Gene::new(0.5);
        gene.set(2.0);
        assert!(gene.value() < 1.0);
    }

    #[test]
    fn test_random_gene_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let g = Gene::random(&mut rng);
            assert!((0.0..1.0).contains(&g.value()));
        }
    }

    #[test]
    fn test_agent_clone_is_independent() {
        let original = Agent::from_values(&[0.1, 0.2, 0.3]);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.gene_mut(1).unwrap().set(0.9);
        assert_eq!(original.values(), vec![0.1, 0.2, 0.3]);
        assert_eq!(copy.values(), vec![0.1, 0.9, 0.3]);
    }

    #[test]
    fn test_agent_display() {
        let agent = Agent::from_values(&[0.123, 0.5]);
        assert_eq!(agent.to_string(), "Agent([0.12, 0.50])");
    }

    #[test]
    fn test_deserialized_genes_are_clamped() {
        let gene: Gene = serde_json::from_str("5.0").unwrap();
        assert!((0.0..1.0).contains(&gene.value()));

        let agent: Agent = serde_json::from_str(r#"{"genes":[-3.0, 2.5, 0.25]}"#).unwrap();
        let values = agent.values();
        assert_eq!(values[0], 0.0);
        assert!((0.0..1.0).contains(&values[1]));
        assert_eq!(values[2], 0.25);

        assert_eq!(serde_json::to_string(&Gene::new(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn test_random_population_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = random_population(6, 4, &mut rng);
        assert_eq!(population.len(), 6);
        assert!(population.iter().all(|a| a.len() == 4));
    }
}
