//! Flappy Clone - a single-screen tap-to-flap arcade game
//!
//! Core modules:
//! - `sim`: Round controller (spawning, contact routing, round state)
//! - `platform`: Host scene abstraction plus a headless reference host
//! - `settings`: Data-driven game tuning
//! - `highscores`: Session leaderboard
//! - `autopilot`: Unattended play for the native binary

pub mod autopilot;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Seconds between obstacle spawns
    pub const SPAWN_PERIOD: f32 = 3.0;
    /// Gap height as a multiple of the player sprite height
    pub const GAP_PLAYER_MULTIPLE: f32 = 4.0;
    /// Obstacles cross `viewWidth / SPEED_DIVISOR` seconds per traversal
    pub const SPEED_DIVISOR: f32 = 100.0;
    /// Obstacles travel this many viewport widths before removal
    pub const TRAVEL_WIDTHS: f32 = 2.0;
    /// Upward impulse applied on each tap
    pub const FLAP_IMPULSE: f32 = 50.0;

    /// Backdrop tiles laid side by side
    pub const BACKDROP_TILES: u32 = 3;
    /// Seconds for one backdrop tile to scroll its own width
    pub const BACKDROP_LOOP_SECS: f32 = 5.0;

    /// Label styling
    pub const FONT_NAME: &str = "Helvetica";
    pub const SCORE_FONT_SIZE: f32 = 60.0;
    pub const GAME_OVER_FONT_SIZE: f32 = 40.0;
    /// Distance of the score label below the top edge
    pub const SCORE_TOP_MARGIN: f32 = 70.0;

    pub const GAME_OVER_TEXT: &str = "Game Over! Tap to play again.";
}

/// Visible area of the scene, in scene units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Vec2,
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            size: Vec2::new(750.0, 1334.0),
        }
    }
}

impl Viewport {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.center.x
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.center.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    /// Y coordinate of the top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }
}
