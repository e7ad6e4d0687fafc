//! Run state machine and per-frame world update
//!
//! Commands (`flip`, `toggle_pause`, `reset_run`) are applied between frames;
//! `update` advances the world by one clamped step. Commands arriving in a
//! state where they make no sense are ignored.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics;
use super::spawn::spawn_pair;
use super::state::{CrashCause, GameEvent, GameState, Gravity, Player, RunStatus};
use crate::rand_range;
use crate::tuning::BonusPolicy;

/// The three logical commands an input source can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Flip,
    TogglePause,
    Reset,
}

/// Commands for a single tick, applied in order before the step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn with(command: Command) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

impl<R: Rng> GameState<R> {
    /// Start a fresh run from any state
    pub fn reset_run(&mut self) {
        let tuning = &self.tuning;
        self.player = Player::at_start(tuning);
        self.gravity = Gravity::Down;
        self.speed = tuning.speed_start;
        self.spawn_countdown = rand_range(&mut self.rng, tuning.spawn_min, tuning.spawn_max);
        self.pillars.clear();
        self.score = 0.0;
        self.run_time = 0.0;
        self.status = RunStatus::Running;
        self.runs += 1;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run {} started", self.runs);
    }

    /// Invert gravity. Only legal while running.
    pub fn flip(&mut self) {
        if self.status != RunStatus::Running {
            return;
        }
        self.gravity = self.gravity.flipped();
        self.player.vy = physics::flip_velocity(self.gravity, &self.tuning);
        self.events.push(GameEvent::Flipped {
            gravity: self.gravity,
        });
    }

    /// Switch between Running and Paused. Ignored from Idle or Crashed.
    pub fn toggle_pause(&mut self) {
        match self.status {
            RunStatus::Running => {
                self.status = RunStatus::Paused;
                self.events.push(GameEvent::Paused);
            }
            RunStatus::Paused => {
                self.status = RunStatus::Running;
                self.events.push(GameEvent::Resumed);
            }
            RunStatus::Idle | RunStatus::Crashed => {}
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Flip => self.flip(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset_run(),
        }
    }

    /// End the run and fold the score into the high score
    fn crash(&mut self, cause: CrashCause) {
        if self.status != RunStatus::Running {
            return;
        }
        self.status = RunStatus::Crashed;
        let whole = self.display_score();
        let new_record = whole > self.high_score;
        self.high_score = self.high_score.max(whole);
        log::info!(
            "Crashed ({:?}) with score {} (best {})",
            cause,
            whole,
            self.high_score
        );
        self.events.push(GameEvent::Crashed {
            score: self.score,
            high_score: self.high_score,
            new_record,
            cause,
        });
    }

    /// Advance the world by `dt` seconds (already clamped by the host).
    ///
    /// Does nothing unless the run is active.
    pub fn update(&mut self, dt: f32) {
        if self.status != RunStatus::Running {
            return;
        }
        let dt = dt.max(0.0);
        self.run_time += dt;

        // Difficulty and distance score
        self.speed += self.tuning.speed_ramp * dt;
        self.score += (self.speed / self.tuning.score_divisor) * dt;

        self.player = physics::integrate(self.player, self.gravity, dt, &self.tuning);

        self.spawn_countdown -= dt;
        if self.spawn_countdown <= 0.0 {
            let pair = spawn_pair(&mut self.rng, &self.tuning);
            if !pair.is_empty() {
                self.events.push(GameEvent::PillarsSpawned { count: pair.len() });
            }
            self.pillars.extend(pair.iter());
            self.spawn_countdown =
                rand_range(&mut self.rng, self.tuning.spawn_min, self.tuning.spawn_max);
        }

        let shift = self.speed * dt;
        for pillar in &mut self.pillars {
            pillar.rect.x -= shift;
        }

        let before = self.pillars.len();
        let limit = -self.tuning.despawn_epsilon;
        self.pillars.retain(|p| p.rect.right() > limit);
        let removed = before - self.pillars.len();
        if removed > 0 {
            self.score += match self.tuning.bonus_policy {
                BonusPolicy::PerPillar => self.tuning.despawn_bonus * removed as f32,
                BonusPolicy::PerFrame => self.tuning.despawn_bonus,
            };
            self.events.push(GameEvent::PillarsCleared { count: removed });
        }

        let player_rect = self.player.rect();
        if self.pillars.iter().any(|p| p.rect.overlaps(&player_rect)) {
            self.crash(CrashCause::Pillar);
            return;
        }

        // Written as a negated range check so a NaN position also crashes
        let y = self.player.pos.y;
        if !(y >= 0.0 && y <= self.tuning.max_player_y()) {
            self.crash(CrashCause::OutOfBounds);
        }
    }
}

/// Apply queued commands, then advance one step
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    for &command in &input.commands {
        state.apply(command);
    }
    state.update(dt);
}
