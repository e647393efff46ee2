use super::traits::ConfigSection;
use crate::engines::parameters::{ParameterKind, ParameterSet};
use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};

/// One strategy parameter, described around its initial value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub initial: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub kind: ParameterKind,
}

/// Ordered parameter list; order fixes the gene position of each parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParametersConfig {
    pub parameters: Vec<ParameterSpec>,
}

impl ConfigSection for ParametersConfig {
    fn section_name() -> &'static str {
        "parameters"
    }

    fn validate(&self) -> Result<(), GenetradeError> {
        // Building the set checks bounds, round-trips and duplicate names
        ParameterSet::from_config(self).map(|_| ())
    }
}
