use super::parameter::{Parameter, ParameterKind, ParameterValue};
use crate::config::ParametersConfig;
use crate::engines::generation::{Agent, Gene};
use crate::error::{GenetradeError, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedParameter {
    pub name: String,
    pub parameter: Parameter,
    /// Current setting, as a gene
    pub gene: Gene,
}

impl NamedParameter {
    pub fn value(&self) -> ParameterValue {
        self.parameter.decode(&self.gene)
    }
}

/// Ordered, named strategy parameters.
///
/// Position `i` binds to gene `i` of every agent built from or decoded by this set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterSet {
    entries: Vec<NamedParameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ParametersConfig) -> Result<Self> {
        let mut set = Self::new();
        for spec in &config.parameters {
            set.add_initial(&spec.name, spec.initial, spec.min, spec.max, spec.kind)?;
        }
        Ok(set)
    }

    pub fn add(&mut self, name: &str, parameter: Parameter, gene: Gene) -> Result<()> {
        if self.get(name).is_some() {
            return Err(GenetradeError::Configuration(format!(
                "Duplicate parameter: {}",
                name
            )));
        }
        self.entries.push(NamedParameter {
            name: name.to_string(),
            parameter,
            gene,
        });
        Ok(())
    }

    /// Add a parameter built around an initial value (see `Parameter::from_initial`)
    pub fn add_initial(
        &mut self,
        name: &str,
        initial: f64,
        min: Option<f64>,
        max: Option<f64>,
        kind: ParameterKind,
    ) -> Result<()> {
        let (parameter, gene) = Parameter::from_initial(initial, min, max, kind)?;
        self.add(name, parameter, gene)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedParameter> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&NamedParameter> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn value(&self, name: &str) -> Result<ParameterValue> {
        self.get(name)
            .map(NamedParameter::value)
            .ok_or_else(|| GenetradeError::UnknownParameter(name.to_string()))
    }

    /// Agent carrying the current setting of every parameter
    pub fn to_agent(&self) -> Agent {
        Agent::new(self.entries.iter().map(|e| e.gene).collect())
    }

    /// Adopt an agent's genes as the current settings
    pub fn update_from_agent(&mut self, agent: &Agent) -> Result<()> {
        self.check_len(agent.len())?;
        for (entry, gene) in self.entries.iter_mut().zip(agent.genes()) {
            entry.gene = *gene;
        }
        Ok(())
    }

    /// Encode real-world values, one per parameter in order, into an agent
    pub fn encode(&self, values: &[f64]) -> Result<Agent> {
        self.check_len(values.len())?;
        let genes = self
            .entries
            .iter()
            .zip(values)
            .map(|(entry, &value)| entry.parameter.encode(value))
            .collect::<Result<Vec<Gene>>>()?;
        Ok(Agent::new(genes))
    }

    /// Decode an agent's genes, one value per parameter in order
    pub fn decode(&self, agent: &Agent) -> Result<Vec<ParameterValue>> {
        self.check_len(agent.len())?;
        Ok(self
            .entries
            .iter()
            .zip(agent.genes())
            .map(|(entry, gene)| entry.parameter.decode(gene))
            .collect())
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.entries.len() {
            return Err(GenetradeError::ParameterCountMismatch {
                expected: self.entries.len(),
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{:10.10}: {}", entry.name, entry.value())?;
        }
        Ok(())
    }
}
