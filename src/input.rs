//! Physical triggers mapped onto logical commands
//!
//! The simulation only understands `Flip`, `TogglePause` and `Reset`. This
//! module decides which one a key press, pointer press or on-screen button
//! means in the current run state.

use serde::{Deserialize, Serialize};

use crate::sim::{Command, RunStatus};

/// Something the player pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Space: start, flip, or restart after the cooldown
    PrimaryKey,
    /// P
    PauseKey,
    /// R
    RestartKey,
    /// Click or tap on the play field
    Pointer,
    StartButton,
    PauseButton,
    RestartButton,
}

impl Trigger {
    /// Map a keyboard key name (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            " " | "space" | "spacebar" => Some(Trigger::PrimaryKey),
            "p" => Some(Trigger::PauseKey),
            "r" => Some(Trigger::RestartKey),
            _ => None,
        }
    }

    /// Map a control name used by web hosts ("start", "pause", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pointer" | "tap" | "click" => Some(Trigger::Pointer),
            "start" => Some(Trigger::StartButton),
            "pause" => Some(Trigger::PauseButton),
            "restart" => Some(Trigger::RestartButton),
            other => Self::from_key(other),
        }
    }
}

/// Decide what a trigger means right now.
///
/// `restart_ready` gates the primary key after a crash so a player mashing
/// flip does not instantly start a new run. The shipped browser game restarts
/// on the first Space after a crash; the cooldown is a deliberate change.
pub fn resolve(trigger: Trigger, status: RunStatus, restart_ready: bool) -> Option<Command> {
    use RunStatus::*;

    match trigger {
        Trigger::PrimaryKey => match status {
            Idle => Some(Command::Reset),
            Crashed if restart_ready => Some(Command::Reset),
            Crashed => None,
            Running | Paused => Some(Command::Flip),
        },
        Trigger::Pointer => match status {
            Idle | Crashed => Some(Command::Reset),
            Running | Paused => Some(Command::Flip),
        },
        Trigger::PauseKey | Trigger::PauseButton => match status {
            Running | Paused => Some(Command::TogglePause),
            Idle | Crashed => None,
        },
        Trigger::StartButton => match status {
            Idle | Crashed => Some(Command::Reset),
            Running | Paused => None,
        },
        Trigger::RestartKey | Trigger::RestartButton => Some(Command::Reset),
    }
}
