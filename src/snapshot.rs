//! Read-only view of the world for a renderer
//!
//! A renderer never touches [`GameState`] directly. Each frame it takes a
//! [`Snapshot`], which is plain data and serialises to JSON for hosts that
//! draw outside Rust.

use rand::Rng;
use serde::Serialize;

use crate::sim::{GameState, Gravity, Pillar, Rect, RunStatus, is_grounded};

pub const TEXT_IDLE: &str = "Press Space or Start to Play";
pub const TEXT_PAUSED: &str = "Paused";
pub const TEXT_CRASHED: &str = "Crashed — Press Space or R to Restart";

/// Centre-screen message for a run status
pub fn status_text(status: RunStatus) -> Option<&'static str> {
    match status {
        RunStatus::Idle => Some(TEXT_IDLE),
        RunStatus::Paused => Some(TEXT_PAUSED),
        RunStatus::Crashed => Some(TEXT_CRASHED),
        RunStatus::Running => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: RunStatus,
    pub paused: bool,
    pub crashed: bool,
    pub status_text: Option<&'static str>,

    pub world_width: f32,
    pub world_height: f32,
    pub ceiling_y: f32,
    pub floor_y: f32,

    pub player: Rect,
    /// Which way the player faces (and falls)
    pub gravity: Gravity,
    /// Resting on the surface gravity points at (idle animation)
    pub grounded: bool,
    /// Left to right
    pub pillars: Vec<Pillar>,

    pub score: f32,
    /// Score as shown on the HUD (whole points)
    pub score_display: u64,
    pub high_score: u64,
}

impl Snapshot {
    pub fn capture<R: Rng>(state: &GameState<R>) -> Self {
        let tuning = &state.tuning;
        Self {
            status: state.status,
            paused: state.status == RunStatus::Paused,
            crashed: state.status == RunStatus::Crashed,
            status_text: status_text(state.status),
            world_width: tuning.world_width,
            world_height: tuning.world_height,
            ceiling_y: tuning.ceiling_y,
            floor_y: tuning.floor_y,
            player: state.player.rect(),
            gravity: state.gravity,
            grounded: is_grounded(&state.player, state.gravity, tuning),
            pillars: state.pillars.clone(),
            score: state.score,
            score_display: state.display_score(),
            high_score: state.high_score,
        }
    }

    /// JSON for non-Rust renderers
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("Snapshot serialisation failed: {}", e);
            String::from("{}")
        })
    }
}
