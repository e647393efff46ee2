pub mod generation;
pub mod parameters;
