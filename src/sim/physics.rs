//! Player physics: signed gravity, surface resting, and the flip kick

use super::state::{Gravity, Player};
use crate::tuning::Tuning;

/// Advance the player one step under gravity.
///
/// Semi-implicit Euler: velocity first, then position with the new velocity.
/// The surface gravity currently points at acts as ground: the player lands
/// there with zero velocity instead of passing through. The opposite surface
/// is not clamped here; the out-of-bounds check in `update` handles that.
pub fn integrate(player: Player, gravity: Gravity, dt: f32, tuning: &Tuning) -> Player {
    let mut next = player;
    next.vy += tuning.gravity * gravity.sign() * dt;
    next.pos.y += next.vy * dt;

    match gravity {
        Gravity::Down => {
            let floor = tuning.floor_y - next.size;
            if next.pos.y >= floor {
                next.pos.y = floor;
                next.vy = 0.0;
            }
        }
        Gravity::Up => {
            let ceiling = tuning.ceiling_surface();
            if next.pos.y <= ceiling {
                next.pos.y = ceiling;
                next.vy = 0.0;
            }
        }
    }

    next
}

/// Velocity assigned right after gravity becomes `new_gravity`.
///
/// This replaces the current velocity rather than adding to it.
#[inline]
pub fn flip_velocity(new_gravity: Gravity, tuning: &Tuning) -> f32 {
    tuning.flip_bounce * new_gravity.sign()
}

/// True when the player rests on the surface `gravity` points at
pub fn is_grounded(player: &Player, gravity: Gravity, tuning: &Tuning) -> bool {
    player.vy == 0.0
        && match gravity {
            Gravity::Down => player.pos.y == tuning.floor_y - player.size,
            Gravity::Up => player.pos.y == tuning.ceiling_surface(),
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_falls_under_gravity() {
        let t = tuning();
        let player = Player {
            pos: Vec2::new(80.0, 100.0),
            vy: 0.0,
            size: 24.0,
        };
        let next = integrate(player, Gravity::Down, 0.01, &t);
        assert!((next.vy - 18.0).abs() < 1e-4);
        assert!((next.pos.y - 100.18).abs() < 1e-4);
        assert_eq!(next.pos.x, 80.0);
    }

    #[test]
    fn test_lands_on_floor_without_bounce() {
        let t = tuning();
        let player = Player {
            pos: Vec2::new(80.0, 340.0),
            vy: 900.0,
            size: 24.0,
        };
        let next = integrate(player, Gravity::Down, 0.033, &t);
        assert_eq!(next.pos.y, t.floor_surface());
        assert_eq!(next.vy, 0.0);
        assert!(is_grounded(&next, Gravity::Down, &t));
    }

    #[test]
    fn test_lands_on_ceiling_when_inverted() {
        let t = tuning();
        let player = Player {
            pos: Vec2::new(80.0, 40.0),
            vy: -500.0,
            size: 24.0,
        };
        let next = integrate(player, Gravity::Up, 0.033, &t);
        assert_eq!(next.pos.y, t.ceiling_y);
        assert_eq!(next.vy, 0.0);
        assert!(is_grounded(&next, Gravity::Up, &t));
    }

    #[test]
    fn test_flip_from_floor_kicks_downward_then_rises() {
        let t = tuning();
        // Gravity was down; after the flip it points up (sign -1)
        let vy = flip_velocity(Gravity::Up, &t);
        assert_eq!(vy, 180.0);

        // The kick is soon overcome by the inverted pull
        let mut player = Player::at_start(&t);
        player.vy = vy;
        let start_y = player.pos.y;
        for _ in 0..30 {
            player = integrate(player, Gravity::Up, 1.0 / 60.0, &t);
        }
        assert!(player.pos.y < start_y);
    }

    #[test]
    fn test_rest_holds_for_tiny_steps() {
        // Displacement this small rounds away in f32; velocity must still reset
        let t = tuning();
        let dt = 2.3916766e-6;
        let next = integrate(Player::at_start(&t), Gravity::Down, dt, &t);
        assert_eq!(next.pos.y, t.floor_surface());
        assert_eq!(next.vy, 0.0);

        let top = Player {
            pos: Vec2::new(80.0, t.ceiling_y),
            vy: 0.0,
            size: 24.0,
        };
        let next = integrate(top, Gravity::Up, dt, &t);
        assert_eq!(next.pos.y, t.ceiling_y);
        assert_eq!(next.vy, 0.0);
    }

    #[test]
    fn test_flip_back_down() {
        let t = tuning();
        assert_eq!(flip_velocity(Gravity::Down, &t), -180.0);
    }

    proptest! {
        #[test]
        fn prop_floor_rest_is_idempotent(dt in 0.0f32..0.05) {
            let t = tuning();
            let player = Player::at_start(&t);
            let next = integrate(player, Gravity::Down, dt, &t);
            prop_assert_eq!(next.pos.y, t.floor_surface());
            prop_assert_eq!(next.vy, 0.0);
        }

        #[test]
        fn prop_ceiling_rest_is_idempotent(dt in 0.0f32..0.05) {
            let t = tuning();
            let player = Player { pos: Vec2::new(80.0, t.ceiling_y), vy: 0.0, size: 24.0 };
            let next = integrate(player, Gravity::Up, dt, &t);
            prop_assert_eq!(next.pos.y, t.ceiling_y);
            prop_assert_eq!(next.vy, 0.0);
        }

        #[test]
        fn prop_flip_opposes_new_pull(up in any::<bool>()) {
            let t = tuning();
            let new_gravity = if up { Gravity::Up } else { Gravity::Down };
            let vy = flip_velocity(new_gravity, &t);
            prop_assert_eq!(vy.abs(), t.flip_bounce.abs());
            // Kick points away from the direction the new gravity pulls
            prop_assert!(vy * new_gravity.sign() < 0.0);
        }

        #[test]
        fn prop_never_passes_the_pulled_surface(
            y in 30.0f32..346.0,
            vy in -2000.0f32..2000.0,
            dt in 0.0f32..0.033,
            up in any::<bool>(),
        ) {
            let t = tuning();
            let gravity = if up { Gravity::Up } else { Gravity::Down };
            let player = Player { pos: Vec2::new(80.0, y), vy, size: 24.0 };
            let next = integrate(player, gravity, dt, &t);
            match gravity {
                Gravity::Down => prop_assert!(next.pos.y <= t.floor_surface()),
                Gravity::Up => prop_assert!(next.pos.y >= t.ceiling_y),
            }
        }
    }
}
