//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied, clamped timestep only
//! - Seeded RNG only
//! - Stable iteration order (pillars stay in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Rect, overlaps};
pub use physics::{flip_velocity, integrate, is_grounded};
pub use spawn::{GapSample, PillarPair, pillars_for_gap, sample_gap, spawn_pair};
pub use state::{CrashCause, GameEvent, GameState, Gravity, Pillar, Player, RunStatus};
pub use tick::{Command, TickInput, tick};
