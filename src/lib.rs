//! Gravity Flip - a side-scrolling arcade game where the only control is
//! inverting gravity.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pillars, collisions, run state)
//! - `snapshot`: Read-only view handed to a renderer each frame
//! - `input`: Physical triggers mapped onto the three logical commands
//! - `session`: Host loop glue (clock, command queue, high score persistence)
//! - `highscores`: High score stores
//! - `platform`: Clocks and browser bindings
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod input;
pub mod platform;
pub mod session;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use session::Session;
pub use snapshot::Snapshot;
pub use tuning::{BonusPolicy, Tuning, TuningError};

use rand::Rng;

/// Uniform sample from `[min, max)`.
///
/// Unlike `Rng::random_range` this never panics: a collapsed or inverted
/// range simply yields a value between the two bounds.
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rand_range_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rand_range(&mut rng, 1.0, 1.4);
            assert!((1.0..1.4).contains(&v));
        }
    }

    #[test]
    fn test_rand_range_collapsed() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(rand_range(&mut rng, 5.0, 5.0), 5.0);

        // Inverted range stays between the bounds instead of panicking
        let v = rand_range(&mut rng, 10.0, 4.0);
        assert!((4.0..=10.0).contains(&v));
    }
}
