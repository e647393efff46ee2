pub mod parameter;
pub mod set;

pub use parameter::{Parameter, ParameterKind, ParameterValue};
pub use set::{NamedParameter, ParameterSet};
