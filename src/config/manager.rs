use super::{
    evolution::EvolutionConfig,
    parameters::ParametersConfig,
    traits::ConfigSection,
};
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `GENETRADE_EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "GENETRADE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub parameters: ParametersConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GenetradeError> {
        self.evolution.validate()?;
        self.parameters.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML or JSON file (by extension), then apply environment overrides
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenetradeError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GenetradeError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| GenetradeError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        log::debug!(
            "loaded config from {}: {} parameters",
            path.as_ref().display(),
            config.parameters.parameters.len()
        );

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenetradeError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GenetradeError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply `f` to a copy; the change is kept only if it validates
    pub fn update<F>(&self, f: F) -> Result<(), GenetradeError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = guard.clone();
        f(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(())
    }
}
