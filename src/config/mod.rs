pub mod traits;
pub mod evolution;
pub mod parameters;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use parameters::{ParametersConfig, ParameterSpec};
pub use traits::ConfigSection;
