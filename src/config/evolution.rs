use super::traits::ConfigSection;
use crate::engines::generation::operators::{
    DEFAULT_CROSS_RATE, DEFAULT_RESET_RATE, DEFAULT_TOURNAMENT_SIZE,
};
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub iterations: usize,
    pub tournament_size: usize,
    pub cross_rate: f64,
    pub reset_rate: f64,
    /// `None` means one expected mutation per agent (1 / gene count)
    pub mutation_chance: Option<f64>,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            iterations: 1,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            cross_rate: DEFAULT_CROSS_RATE,
            reset_rate: DEFAULT_RESET_RATE,
            mutation_chance: None,
            seed: None,
            parallel_evaluation: false,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GenetradeError> {
        if self.population_size < 2 || self.population_size % 2 != 0 {
            return Err(GenetradeError::Configuration(
                "Population size must be even and at least 2".to_string()
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(GenetradeError::Configuration(format!(
                "Tournament size must be between 1 and {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.cross_rate) {
            return Err(GenetradeError::Configuration(
                "Cross rate must be between 0 and 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.reset_rate) {
            return Err(GenetradeError::Configuration(
                "Reset rate must be between 0 and 1".to_string()
            ));
        }
        if let Some(chance) = self.mutation_chance {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GenetradeError::Configuration(
                    "Mutation chance must be between 0 and 1".to_string()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_odd_population() {
        let config = EvolutionConfig {
            population_size: 7,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_tournament() {
        let config = EvolutionConfig {
            population_size: 4,
            tournament_size: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_rates() {
        let config = EvolutionConfig {
            cross_rate: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvolutionConfig {
            mutation_chance: Some(-0.1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
