//! Demo controller that plays the game by issuing flips
//!
//! Aims the player at the centre of the next gap: gravity should pull toward
//! the gap, and once inside the band it pulls against the current motion so
//! the player weaves around the centre line. A minimum hold time between
//! flips stops it from chattering every frame.

use rand::Rng;

use super::state::{GameState, Gravity};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Minimum seconds between two flips
    pub hold_time: f32,
    /// Half-height of the band around the gap centre treated as "on target"
    pub margin: f32,
    since_flip: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            hold_time: 0.12,
            margin: 14.0,
            since_flip: f32::INFINITY,
        }
    }
}

impl Autopilot {
    pub fn new(hold_time: f32, margin: f32) -> Self {
        Self {
            hold_time,
            margin,
            ..Default::default()
        }
    }

    /// Vertical span (top, bottom) of the next gap the player has not passed
    pub fn next_gap<R: Rng>(state: &GameState<R>) -> Option<(f32, f32)> {
        let player_x = state.player.pos.x;
        let lead = state
            .pillars
            .iter()
            .find(|p| p.rect.right() >= player_x)?;
        let x = lead.rect.x;

        let mut top = 0.0f32;
        let mut bottom = state.tuning.world_height;
        for p in state.pillars.iter().filter(|p| p.rect.x == x) {
            if p.is_top {
                top = top.max(p.rect.bottom());
            } else {
                bottom = bottom.min(p.rect.y);
            }
        }
        Some((top, bottom))
    }

    /// Gravity direction that steers toward the next gap, if any
    pub fn desired_gravity<R: Rng>(&self, state: &GameState<R>) -> Option<Gravity> {
        let (top, bottom) = Self::next_gap(state)?;
        let target = (top + bottom) * 0.5;
        let center = state.player.rect().center().y;

        if center < target - self.margin {
            Some(Gravity::Down)
        } else if center > target + self.margin {
            Some(Gravity::Up)
        } else if state.player.vy > 0.0 {
            Some(Gravity::Up)
        } else if state.player.vy < 0.0 {
            Some(Gravity::Down)
        } else {
            None
        }
    }

    /// Whether to flip this frame. Call once per frame with the frame's dt.
    pub fn decide<R: Rng>(&mut self, state: &GameState<R>, dt: f32) -> bool {
        self.since_flip += dt;
        if !state.is_running() || self.since_flip < self.hold_time {
            return false;
        }
        match self.desired_gravity(state) {
            Some(want) if want != state.gravity => {
                self.since_flip = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Forget flip timing (call when a new run starts)
    pub fn reset(&mut self) {
        self.since_flip = f32::INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use crate::sim::state::{Pillar, RunStatus};
    use crate::tuning::Tuning;

    fn with_gap(top_h: f32, bottom_y: f32) -> GameState {
        let mut state = GameState::new(1, Tuning::default());
        state.reset_run();
        state.pillars.push(Pillar {
            rect: Rect::new(300.0, 0.0, 26.0, top_h),
            is_top: true,
        });
        state.pillars.push(Pillar {
            rect: Rect::new(300.0, bottom_y, 26.0, 400.0 - bottom_y),
            is_top: false,
        });
        state
    }

    #[test]
    fn test_next_gap_skips_passed_pillars() {
        let mut state = with_gap(60.0, 180.0);
        state.pillars.insert(
            0,
            Pillar {
                rect: Rect::new(20.0, 0.0, 26.0, 250.0),
                is_top: true,
            },
        );
        assert_eq!(Autopilot::next_gap(&state), Some((60.0, 180.0)));
    }

    #[test]
    fn test_flips_toward_high_gap() {
        let state = with_gap(60.0, 180.0);
        let mut pilot = Autopilot::default();
        // Resting on the floor with gravity down, gap is far above
        assert!(pilot.decide(&state, 1.0 / 60.0));
    }

    #[test]
    fn test_keeps_gravity_when_already_heading_there() {
        let mut state = with_gap(60.0, 180.0);
        state.gravity = Gravity::Up;
        let mut pilot = Autopilot::default();
        assert!(!pilot.decide(&state, 1.0 / 60.0));
    }

    #[test]
    fn test_hold_time_throttles_flips() {
        let mut state = with_gap(60.0, 180.0);
        let mut pilot = Autopilot::new(0.2, 10.0);
        assert!(pilot.decide(&state, 1.0 / 60.0));

        // Pretend the flip never happened: still wants to flip but must wait
        assert!(!pilot.decide(&state, 0.1));
        assert!(pilot.decide(&state, 0.1));

        state.status = RunStatus::Paused;
        pilot.reset();
        assert!(!pilot.decide(&state, 1.0));
    }

    #[test]
    fn test_no_pillars_no_flip() {
        let mut state = GameState::new(1, Tuning::default());
        state.reset_run();
        let mut pilot = Autopilot::default();
        assert!(!pilot.decide(&state, 1.0));
    }
}
