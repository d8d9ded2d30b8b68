pub mod jwt;
pub mod media;
pub mod password;
pub mod sampling;

pub use jwt::*;
pub use media::MediaResolver;
pub use password::*;
pub use sampling::{EntropySource, RandomSource, SeededSource, sample_without_replacement};
