mod hit_sample;
mod sample_bank;
mod sample_set;

pub use hit_sample::*;
pub use sample_bank::*;
pub use sample_set::*;
