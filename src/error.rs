use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenetradeError {
    #[error("Population is empty")]
    EmptyPopulation,

    #[error("Population has an odd number of agents: {0}")]
    OddPopulation(usize),

    #[error("Agents must carry at least one gene")]
    EmptyAgent,

    #[error("Gene count mismatch: expected {expected}, got {actual}")]
    GeneCountMismatch { expected: usize, actual: usize },

    #[error("Fitness scores misaligned: {population} agents, {scores} scores")]
    MisalignedScores { population: usize, scores: usize },

    #[error("Tournament size {size} outside [1, {population}]")]
    InvalidTournamentSize { size: usize, population: usize },

    #[error("Invalid parameter bounds: max ({max}) must be greater than min ({min})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Parameter does not round-trip: initial {initial}, decoded {decoded}")]
    RoundTrip { initial: f64, decoded: f64 },

    #[error("Parameter count mismatch: expected {expected}, got {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenetradeError>;
