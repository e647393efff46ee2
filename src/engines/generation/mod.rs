pub mod genome;
pub mod operators;
pub mod evolution_engine;
pub mod progress;

pub use genome::{random_population, Agent, Gene};
pub use operators::{
    crossover, crossover_at, mutate, random_selection, tournament_selection, GeneDistribution,
    DEFAULT_CROSS_RATE, DEFAULT_RESET_RATE, DEFAULT_TOURNAMENT_SIZE,
};
pub use evolution_engine::{GeneticAlgorithm, Generation, ProgressCallback, ScoredAgent};
pub use progress::{
    ChannelProgressCallback, LoggingProgressCallback, NoopProgressCallback, ProgressMessage,
};
