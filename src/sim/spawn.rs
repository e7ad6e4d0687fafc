//! Procedural pillar generation
//!
//! Each spawn event draws one gap and builds the pillar above it and the
//! pillar below it. Gaps are always at least `gap_min` tall and keep a `lip`
//! of clearance from both the ceiling and floor lines, so every gap can be
//! flown through.

use rand::Rng;

use super::collision::Rect;
use super::state::Pillar;
use crate::rand_range;
use crate::tuning::Tuning;

/// A sampled gap before rounding: height and the y of its upper edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSample {
    pub gap: f32,
    pub gap_top: f32,
}

/// The pillars produced by one spawn event. Either side may be absent when
/// its height rounds to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PillarPair {
    pub top: Option<Pillar>,
    pub bottom: Option<Pillar>,
}

impl PillarPair {
    /// Iterate the present pillars, top first
    pub fn iter(&self) -> impl Iterator<Item = Pillar> + '_ {
        self.top.iter().chain(self.bottom.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.top.is_some() as usize + self.bottom.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Draw a gap height, then a gap position that respects both lips
pub fn sample_gap<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> GapSample {
    let gap = rand_range(rng, tuning.gap_min, tuning.gap_max);
    let gap_top = rand_range(
        rng,
        tuning.ceiling_y + tuning.lip,
        tuning.floor_y - tuning.lip - gap,
    );
    GapSample { gap, gap_top }
}

/// Build the pillar rectangles around a sampled gap.
///
/// Coordinates are rounded to whole pixels. The top pillar runs from the
/// world's top edge down to the gap; the bottom pillar runs from the gap to
/// the world's bottom edge (past the floor line). Heights are clamped at zero
/// and a zero-height pillar is not emitted.
pub fn pillars_for_gap(sample: GapSample, tuning: &Tuning) -> PillarPair {
    let x = (tuning.world_width + tuning.spawn_margin).round();
    let w = tuning.pillar_width.round();

    let gap_top = sample.gap_top.round();
    let bottom_y = (sample.gap_top + sample.gap).round();

    let top_h = gap_top.max(0.0);
    let top = (top_h > 0.0).then(|| Pillar {
        rect: Rect::new(x, 0.0, w, top_h),
        is_top: true,
    });

    let bottom_h = (tuning.world_height - bottom_y).round().max(0.0);
    let bottom = (bottom_h > 0.0).then(|| Pillar {
        rect: Rect::new(x, bottom_y, w, bottom_h),
        is_top: false,
    });

    PillarPair { top, bottom }
}

/// Generate the next pillar pair just beyond the right edge
pub fn spawn_pair<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> PillarPair {
    let sample = sample_gap(rng, tuning);
    let pair = pillars_for_gap(sample, tuning);
    log::debug!(
        "Spawned pillars: gap {:.1} at y {:.1} ({} rects)",
        sample.gap,
        sample.gap_top,
        pair.len()
    );
    pair
}
