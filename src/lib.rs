pub mod config;
pub mod engines;
pub mod error;
pub mod utils;

pub use engines::generation::{Agent, Gene, GeneticAlgorithm, Generation, ScoredAgent};
pub use engines::parameters::{Parameter, ParameterKind, ParameterSet, ParameterValue};
pub use error::{GenetradeError, Result};
