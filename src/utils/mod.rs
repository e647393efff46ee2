pub mod math;

pub use math::{clamp_half_open, is_close, mean, next_down, sample_std_dev};
