//! Periodic obstacle spawning
//!
//! Each spawn places an upper and lower obstacle symmetrically about a random
//! vertical offset, with an invisible gap sensor between them, all just past
//! the right edge of the view. All three scroll left together and are removed
//! by the host when their script ends.

use glam::Vec2;
use rand::Rng;

use super::category::CollisionFilter;
use super::region::{MotionScript, RegionKind, RegionSpec};
use super::scene::Scene;
use super::state::SpawnedPair;
use crate::Settings;
use crate::consts::SIM_DT;

/// Repeating timer driven by frame time
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    period: f32,
    elapsed: f32,
    running: bool,
}

impl SpawnTimer {
    /// Positive periods shorter than one simulation step are raised to
    /// `SIM_DT`; non-positive periods never fire.
    pub fn new(period: f32) -> Self {
        let period = if period > 0.0 { period.max(SIM_DT) } else { period };
        Self {
            period,
            elapsed: 0.0,
            running: false,
        }
    }

    /// Start from zero; the first fire comes one full period later
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt` and return how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let fires = (self.elapsed / self.period).floor();
        self.elapsed = (self.elapsed - fires * self.period).max(0.0);
        fires as u32
    }
}

/// Shift a raw draw in `[0, h/2)` to `[-h/4, h/4)`
#[inline]
pub fn recenter_offset(raw: u32, view_height: f32) -> f32 {
    raw as f32 - view_height / 4.0
}

/// Draw a vertical offset for the next obstacle pair
pub fn draw_offset<R: Rng>(rng: &mut R, view_height: f32) -> f32 {
    let span = (view_height / 2.0) as u32;
    let raw = if span == 0 { 0 } else { rng.random_range(0..span) };
    recenter_offset(raw, view_height)
}

/// Regions and motion for one spawn
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnLayout {
    pub upper: RegionSpec,
    pub lower: RegionSpec,
    pub gap: RegionSpec,
    pub script: MotionScript,
    pub offset: f32,
}

impl SpawnLayout {
    /// Place an obstacle pair for the given vertical offset
    pub fn new(settings: &Settings, offset: f32) -> Self {
        let view = &settings.viewport;
        let obstacle = settings.obstacles.size;
        let gap_height = settings.gap_height();
        let x = view.mid_x() + view.width();
        let center_y = view.mid_y() + offset;

        let upper = RegionSpec::rect(
            RegionKind::UpperObstacle,
            Vec2::new(x, center_y + gap_height / 2.0 + obstacle.y / 2.0),
            obstacle,
        )
        .with_z(-1.0);
        let lower = RegionSpec::rect(
            RegionKind::LowerObstacle,
            Vec2::new(x, center_y - gap_height / 2.0 - obstacle.y / 2.0),
            obstacle,
        )
        .with_z(-1.0);
        let gap = RegionSpec::rect(
            RegionKind::Gap,
            Vec2::new(x, center_y),
            Vec2::new(obstacle.x, gap_height),
        );

        let script = MotionScript::MoveThenRemove {
            delta: Vec2::new(-settings.obstacles.travel_widths * view.width(), 0.0),
            duration: settings.scroll_duration(),
        };

        Self {
            upper,
            lower,
            gap,
            script,
            offset,
        }
    }

    /// Add the three regions to the scene, tag them and start their motion
    pub fn spawn<S: Scene + ?Sized>(self, scene: &mut S) -> SpawnedPair {
        let upper = scene.add_region(self.upper);
        scene.set_filter(upper, CollisionFilter::OBSTACLE);
        scene.run_script(upper, self.script);

        let lower = scene.add_region(self.lower);
        scene.set_filter(lower, CollisionFilter::OBSTACLE);
        scene.run_script(lower, self.script);

        let gap = scene.add_region(self.gap);
        scene.set_filter(gap, CollisionFilter::GAP);
        scene.run_script(gap, self.script);

        SpawnedPair { upper, lower, gap }
    }
}
