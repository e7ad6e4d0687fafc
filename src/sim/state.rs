//! Game state and core simulation types
//!
//! The whole world lives in one [`GameState`] value owned by the host. The
//! renderer reads it (through [`crate::snapshot::Snapshot`]); only the command
//! handlers and `update` in `tick.rs` mutate it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::rand_range;
use crate::tuning::Tuning;

/// Where a run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    /// Nothing started yet, waiting for the first reset
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Run ended; only a reset leaves this state
    Crashed,
}

/// Which boundary currently attracts the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gravity {
    /// Pulls toward the floor (sign +1)
    #[default]
    Down,
    /// Pulls toward the ceiling (sign -1)
    Up,
}

impl Gravity {
    /// +1.0 for floorward, -1.0 for ceilingward
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Gravity::Down => 1.0,
            Gravity::Up => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }
}

/// The player's box. `pos` is the top-left corner; x never changes during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive is downward)
    pub vy: f32,
    pub size: f32,
}

impl Player {
    /// Player resting on the floor, ready for a new run
    pub fn at_start(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.floor_surface()),
            vy: 0.0,
            size: tuning.player_size,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// One obstacle rectangle. Pillars come in top/bottom pairs around a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub rect: Rect,
    /// Hangs from the top edge (upper wall of the gap)
    pub is_top: bool,
}

/// What knocked the player out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Pillar,
    OutOfBounds,
}

/// Notable things that happened during a command or tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Flipped { gravity: Gravity },
    Paused,
    Resumed,
    PillarsSpawned { count: usize },
    PillarsCleared { count: usize },
    Crashed {
        score: f32,
        high_score: u64,
        new_record: bool,
        cause: CrashCause,
    },
}

/// Complete world state.
///
/// Generic over the random source so tests can inject any seeded generator;
/// the game itself uses `Pcg32`.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    /// Seed the RNG was created from (None when a generator was injected)
    pub seed: Option<u64>,
    pub tuning: Tuning,
    pub status: RunStatus,
    pub player: Player,
    pub gravity: Gravity,
    /// Scroll speed (pixels/s), only grows while running
    pub speed: f32,
    /// Seconds until the next pillar pair
    pub spawn_countdown: f32,
    /// Continuous score accumulator
    pub score: f32,
    /// Best whole score seen, loaded from and saved to the host's store
    pub high_score: u64,
    /// Pillars in spawn order, which is also left-to-right order
    pub pillars: Vec<Pillar>,
    /// Seconds of running time in the current run
    pub run_time: f32,
    /// Number of runs started since creation
    pub runs: u32,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: R,
}

impl GameState<Pcg32> {
    /// Create an idle game with a seeded generator
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::with_rng(Pcg32::seed_from_u64(seed), tuning);
        state.seed = Some(seed);
        state
    }
}

impl<R: Rng> GameState<R> {
    /// Create an idle game around an injected random source
    pub fn with_rng(mut rng: R, tuning: Tuning) -> Self {
        let spawn_countdown = rand_range(&mut rng, tuning.spawn_min, tuning.spawn_max);
        Self {
            seed: None,
            status: RunStatus::Idle,
            player: Player::at_start(&tuning),
            gravity: Gravity::Down,
            speed: tuning.speed_start,
            spawn_countdown,
            score: 0.0,
            high_score: 0,
            pillars: Vec::new(),
            run_time: 0.0,
            runs: 0,
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Seed the persisted best score (from the host's store)
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Whole points as shown on the HUD
    #[inline]
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_on_floor() {
        let tuning = Tuning::default();
        let state = GameState::new(1, tuning.clone());
        assert_eq!(state.status, RunStatus::Idle);
        assert_eq!(state.gravity, Gravity::Down);
        assert_eq!(state.player.pos, Vec2::new(80.0, 346.0));
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.speed, tuning.speed_start);
        assert!((tuning.spawn_min..tuning.spawn_max).contains(&state.spawn_countdown));
        assert!(state.pillars.is_empty());
        assert_eq!(state.seed, Some(1));
    }

    #[test]
    fn test_gravity_sign() {
        assert_eq!(Gravity::Down.sign(), 1.0);
        assert_eq!(Gravity::Up.sign(), -1.0);
        assert_eq!(Gravity::Down.flipped(), Gravity::Up);
        assert_eq!(Gravity::Up.flipped().flipped(), Gravity::Up);
    }

    #[test]
    fn test_display_score_floors() {
        let mut state = GameState::new(1, Tuning::default());
        state.score = 42.7;
        assert_eq!(state.display_score(), 42);
    }

    #[test]
    fn test_same_seed_same_countdown() {
        let a = GameState::new(99, Tuning::default());
        let b = GameState::new(99, Tuning::default());
        assert_eq!(a.spawn_countdown, b.spawn_countdown);
    }
}
