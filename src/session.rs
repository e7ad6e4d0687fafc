//! Host loop glue
//!
//! A [`Session`] sits between the platform and the simulation: it turns
//! timestamps into clamped steps, queues commands so they land between
//! frames, persists the high score when a run crashes, and keeps the short
//! cooldown before the primary key may restart.

use crate::highscores::HighScoreStore;
use crate::input::{Trigger, resolve};
use crate::sim::{Command, GameEvent, GameState, RunStatus, TickInput, tick};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;

/// Clamp a raw frame delta to `[0, max]`; garbage becomes 0
#[inline]
pub fn clamp_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max) } else { 0.0 }
}

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    pending: Vec<Command>,
    last_ms: Option<f64>,
    restart_timer: f32,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Session<S> {
    /// Create an idle session, reading the persisted high score
    pub fn new(seed: u64, tuning: Tuning, mut store: S) -> Self {
        let high_score = store.load();
        Self {
            state: GameState::new(seed, tuning).with_high_score(high_score),
            store,
            pending: Vec::new(),
            last_ms: None,
            restart_timer: 0.0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    /// Queue a command for the start of the next frame
    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Interpret a physical trigger and queue the resulting command
    pub fn trigger(&mut self, trigger: Trigger) -> Option<Command> {
        let command = resolve(trigger, self.state.status, self.restart_ready())?;
        self.push(command);
        Some(command)
    }

    /// Whether the crash cooldown has elapsed
    pub fn restart_ready(&self) -> bool {
        self.restart_timer <= 0.0
    }

    /// Advance to timestamp `now_ms` (milliseconds, monotonic).
    ///
    /// The timestamp is always recorded, so time spent idle or paused never
    /// turns into a catch-up step later. Returns the step actually taken.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let raw = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.advance(raw)
    }

    /// Apply queued commands, then advance by `dt` seconds (clamped)
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = clamp_dt(dt, self.state.tuning.max_frame_dt);

        if self.state.status == RunStatus::Crashed {
            self.restart_timer = (self.restart_timer - dt).max(0.0);
        }

        let input = TickInput {
            commands: std::mem::take(&mut self.pending),
        };
        tick(&mut self.state, &input, dt);
        self.handle_events();
        dt
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            match &event {
                GameEvent::Crashed { high_score, .. } => {
                    self.store.save(*high_score);
                    self.restart_timer = self.state.tuning.restart_cooldown;
                }
                GameEvent::RunStarted => self.restart_timer = 0.0,
                _ => {}
            }
            self.events.push(event);
        }
    }

    /// Take everything that happened since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::{Pillar, Rect};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session(store: MemoryStore) -> Session<MemoryStore> {
        Session::new(11, Tuning::default(), store)
    }

    /// Drop a pillar onto the resting player so the next step crashes
    fn doom(session: &mut Session<MemoryStore>, score: f32) {
        let state = session.state_mut();
        state.spawn_countdown = 10.0;
        state.score = score;
        state.pillars.push(Pillar {
            rect: Rect::new(90.0, 300.0, 26.0, 100.0),
            is_top: false,
        });
    }

    #[test]
    fn test_loads_high_score_on_creation() {
        let s = session(MemoryStore::with_value(40));
        assert_eq!(s.state().high_score, 40);
        assert_eq!(s.status(), RunStatus::Idle);
    }

    #[test]
    fn test_crash_persists_floored_max() {
        let mut s = session(MemoryStore::with_value(40));
        s.push(Command::Reset);
        s.advance(0.0);
        doom(&mut s, 42.7);
        s.advance(1.0 / 60.0);

        assert_eq!(s.status(), RunStatus::Crashed);
        assert_eq!(s.store().value, Some(42));

        s.push(Command::Reset);
        s.advance(0.0);
        doom(&mut s, 30.0);
        s.advance(1.0 / 60.0);
        assert_eq!(s.status(), RunStatus::Crashed);
        assert_eq!(s.store().value, Some(42));
        assert_eq!(s.state().high_score, 42);
    }

    #[test]
    fn test_frame_clamps_large_gaps() {
        let mut s = session(MemoryStore::new());
        assert_eq!(s.frame(0.0), 0.0);
        s.trigger(Trigger::PrimaryKey);
        // A two second hitch becomes one max-size step
        let dt = s.frame(2000.0);
        assert_eq!(dt, Tuning::default().max_frame_dt);
        assert_eq!(s.status(), RunStatus::Running);

        // Clock going backwards is a zero step
        assert_eq!(s.frame(1500.0), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.033), 0.0);
    }

    #[test]
    fn test_pause_does_not_bank_time() {
        let mut s = session(MemoryStore::new());
        s.trigger(Trigger::StartButton);
        s.frame(0.0);
        s.frame(FRAME_MS);
        s.trigger(Trigger::PauseKey);
        s.frame(2.0 * FRAME_MS);
        assert_eq!(s.status(), RunStatus::Paused);

        let score = s.state().score;
        s.frame(10_000.0);
        assert_eq!(s.state().score, score);

        s.trigger(Trigger::PauseKey);
        let dt = s.frame(10_000.0 + FRAME_MS);
        assert!((dt - (FRAME_MS / 1000.0) as f32).abs() < 1e-6);
        assert!(s.state().score > score);
    }

    #[test]
    fn test_restart_cooldown_gates_primary_key() {
        let mut s = session(MemoryStore::new());
        s.push(Command::Reset);
        s.advance(0.0);
        doom(&mut s, 5.0);
        s.advance(1.0 / 60.0);
        assert_eq!(s.status(), RunStatus::Crashed);
        assert!(!s.restart_ready());

        // Mashing space right after the crash does nothing
        assert_eq!(s.trigger(Trigger::PrimaryKey), None);
        for _ in 0..40 {
            s.advance(0.033);
        }
        assert!(s.restart_ready());
        assert_eq!(s.trigger(Trigger::PrimaryKey), Some(Command::Reset));
        s.advance(0.0);
        assert_eq!(s.status(), RunStatus::Running);
    }

    #[test]
    fn test_restart_key_ignores_cooldown() {
        let mut s = session(MemoryStore::new());
        s.push(Command::Reset);
        s.advance(0.0);
        doom(&mut s, 1.0);
        s.advance(1.0 / 60.0);
        assert_eq!(s.trigger(Trigger::RestartKey), Some(Command::Reset));
        s.advance(0.0);
        assert_eq!(s.status(), RunStatus::Running);
    }

    #[test]
    fn test_events_are_forwarded() {
        let mut s = session(MemoryStore::new());
        s.push(Command::Reset);
        s.push(Command::Flip);
        s.advance(0.0);
        let events = s.drain_events();
        assert_eq!(events[0], GameEvent::RunStarted);
        assert!(matches!(events[1], GameEvent::Flipped { .. }));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_toggle_pause_while_crashed_is_noop() {
        let mut s = session(MemoryStore::new());
        s.push(Command::Reset);
        s.advance(0.0);
        doom(&mut s, 1.0);
        s.advance(1.0 / 60.0);
        s.push(Command::TogglePause);
        s.advance(0.0);
        assert_eq!(s.status(), RunStatus::Crashed);
    }
}
