//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults match the
//! shipped game; a JSON file can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How the despawn bonus is credited when pillars scroll off the left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BonusPolicy {
    /// One bonus per pillar removed (a pair leaving together pays twice)
    #[default]
    PerPillar,
    /// One bonus per frame in which anything was removed
    PerFrame,
}

/// Reasons a tuning table is rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("world must have positive width and height (got {width}x{height})")]
    WorldSize { width: f32, height: f32 },
    #[error("ceiling line {ceiling} must lie above floor line {floor} inside the world")]
    Boundaries { ceiling: f32, floor: f32 },
    #[error("player size must be positive and fit between ceiling and floor")]
    PlayerSize,
    #[error("gap range [{min}, {max}] is empty or negative")]
    GapRange { min: f32, max: f32 },
    #[error("largest gap {gap_max} leaves no room for lips (corridor {corridor}, lip {lip})")]
    GapTooLarge { gap_max: f32, corridor: f32, lip: f32 },
    #[error("spawn interval [{min}, {max}] is empty or non-positive")]
    SpawnInterval { min: f32, max: f32 },
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Ceiling boundary line (y, pixels from top)
    pub ceiling_y: f32,
    /// Floor boundary line (y, pixels from top)
    pub floor_y: f32,

    // === Player ===
    /// Fixed horizontal position of the player's left edge
    pub player_x: f32,
    /// Side length of the player's square bounding box
    pub player_size: f32,
    /// Gravity acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity assigned on flip, multiplied by the new gravity sign
    pub flip_bounce: f32,

    // === Scrolling & scoring ===
    pub speed_start: f32,
    /// Speed gained per second of running (pixels/s²)
    pub speed_ramp: f32,
    /// Score per second is `speed / score_divisor`
    pub score_divisor: f32,
    /// Score added when a pillar leaves the screen
    pub despawn_bonus: f32,
    pub bonus_policy: BonusPolicy,

    // === Pillars ===
    pub spawn_min: f32,
    pub spawn_max: f32,
    pub pillar_width: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    /// Minimum clearance between a gap edge and the ceiling/floor line
    pub lip: f32,
    /// Pillars spawn this far beyond the right edge
    pub spawn_margin: f32,
    /// Pillars are removed once `x + width <= -despawn_epsilon`
    pub despawn_epsilon: f32,

    // === Host ===
    /// Upper bound on a single frame step (seconds)
    pub max_frame_dt: f32,
    /// Seconds after a crash before the primary key restarts
    pub restart_cooldown: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        let world_height = 400.0;
        Self {
            world_width: 800.0,
            world_height,
            ceiling_y: 30.0,
            floor_y: world_height - 30.0,

            player_x: 80.0,
            player_size: 24.0,
            gravity: 1800.0,
            flip_bounce: -180.0,

            speed_start: 220.0,
            speed_ramp: 22.0,
            score_divisor: 160.0,
            despawn_bonus: 0.5,
            bonus_policy: BonusPolicy::PerPillar,

            spawn_min: 1.0,
            spawn_max: 1.4,
            pillar_width: 26.0,
            gap_min: 100.0,
            gap_max: 150.0,
            lip: 12.0,
            spawn_margin: 40.0,
            despawn_epsilon: 5.0,

            max_frame_dt: 0.033,
            restart_cooldown: 1.0,
        }
    }
}

impl Tuning {
    /// Resting y for the player's top edge when gravity pulls down
    #[inline]
    pub fn floor_surface(&self) -> f32 {
        self.floor_y - self.player_size
    }

    /// Resting y for the player's top edge when gravity pulls up
    #[inline]
    pub fn ceiling_surface(&self) -> f32 {
        self.ceiling_y
    }

    /// Largest legal y for the player's top edge before it counts as out of bounds
    #[inline]
    pub fn max_player_y(&self) -> f32 {
        self.world_height - self.player_size
    }

    /// Name of the first field holding NaN or an infinity
    fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ceiling_y", self.ceiling_y),
            ("floor_y", self.floor_y),
            ("player_x", self.player_x),
            ("player_size", self.player_size),
            ("gravity", self.gravity),
            ("flip_bounce", self.flip_bounce),
            ("speed_start", self.speed_start),
            ("speed_ramp", self.speed_ramp),
            ("score_divisor", self.score_divisor),
            ("despawn_bonus", self.despawn_bonus),
            ("spawn_min", self.spawn_min),
            ("spawn_max", self.spawn_max),
            ("pillar_width", self.pillar_width),
            ("gap_min", self.gap_min),
            ("gap_max", self.gap_max),
            ("lip", self.lip),
            ("spawn_margin", self.spawn_margin),
            ("despawn_epsilon", self.despawn_epsilon),
            ("max_frame_dt", self.max_frame_dt),
            ("restart_cooldown", self.restart_cooldown),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }

    /// Check that the table describes a playable world
    pub fn validate(&self) -> Result<(), TuningError> {
        if let Some(name) = self.first_non_finite() {
            return Err(TuningError::NotFinite(name));
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(TuningError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.ceiling_y < 0.0 || self.floor_y > self.world_height || self.ceiling_y >= self.floor_y {
            return Err(TuningError::Boundaries {
                ceiling: self.ceiling_y,
                floor: self.floor_y,
            });
        }
        if self.player_size <= 0.0 || self.player_size > self.floor_y - self.ceiling_y {
            return Err(TuningError::PlayerSize);
        }
        if self.gap_min <= 0.0 || self.gap_min > self.gap_max {
            return Err(TuningError::GapRange {
                min: self.gap_min,
                max: self.gap_max,
            });
        }
        let corridor = self.floor_y - self.ceiling_y;
        if self.lip < 0.0 || self.gap_max >= corridor - 2.0 * self.lip {
            return Err(TuningError::GapTooLarge {
                gap_max: self.gap_max,
                corridor,
                lip: self.lip,
            });
        }
        if self.spawn_min <= 0.0 || self.spawn_min > self.spawn_max {
            return Err(TuningError::SpawnInterval {
                min: self.spawn_min,
                max: self.spawn_max,
            });
        }
        if self.pillar_width <= 0.0 {
            return Err(TuningError::NotPositive("pillar_width"));
        }
        if self.score_divisor <= 0.0 {
            return Err(TuningError::NotPositive("score_divisor"));
        }
        if self.max_frame_dt <= 0.0 {
            return Err(TuningError::NotPositive("max_frame_dt"));
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file, reporting why it could not be used
    pub fn read(path: &Path) -> Result<Self, TuningError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load a tuning file; fall back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
