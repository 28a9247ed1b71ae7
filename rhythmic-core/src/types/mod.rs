// rhythmic-core/src/types/mod.rs

pub mod params;
pub mod random;
pub mod step;
pub mod time;

pub use params::{RhythmComplexity, RhythmMode, RhythmParams, RhythmStyle};
pub use random::Random;
pub use step::{Sequence, Step};
pub use time::Time;
