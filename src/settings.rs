//! Game settings and tuning
//!
//! Loaded from an optional JSON file by the native binary. Every section has
//! defaults matching the stock game, so a partial file only overrides what it
//! names.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Viewport;
use crate::consts::*;

/// Player sprite and flap tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Sprite size; the collision circle radius is half the height
    pub sprite_size: Vec2,
    /// Body mass used to turn impulses into velocity
    pub mass: f32,
    /// Vertical impulse applied on each tap
    pub flap_impulse: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            sprite_size: Vec2::new(68.0, 48.0),
            mass: 0.1,
            flap_impulse: FLAP_IMPULSE,
        }
    }
}

/// Obstacle spawning and scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSettings {
    /// Size of a single obstacle (both upper and lower)
    pub size: Vec2,
    /// Gap height as a multiple of the player sprite height
    pub gap_multiple: f32,
    /// Seconds between spawns
    pub spawn_period: f32,
    /// Scroll duration is `viewport width / speed_divisor`
    pub speed_divisor: f32,
    /// Distance scrolled before removal, in viewport widths
    pub travel_widths: f32,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            size: Vec2::new(104.0, 800.0),
            gap_multiple: GAP_PLAYER_MULTIPLE,
            spawn_period: SPAWN_PERIOD,
            speed_divisor: SPEED_DIVISOR,
            travel_widths: TRAVEL_WIDTHS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: Vec2,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -980.0),
        }
    }
}

/// Scrolling backdrop tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropSettings {
    pub tile_width: f32,
    pub tiles: u32,
    pub loop_secs: f32,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            tile_width: 1080.0,
            tiles: BACKDROP_TILES,
            loop_secs: BACKDROP_LOOP_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Score each gap region at most once, even if the host reports repeats
    pub dedupe_gap_contacts: bool,
    /// Entries kept on the session leaderboard
    pub high_score_slots: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            dedupe_gap_contacts: true,
            high_score_slots: 10,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewport: Viewport,
    pub player: PlayerSettings,
    pub obstacles: ObstacleSettings,
    pub physics: PhysicsSettings,
    pub backdrop: BackdropSettings,
    pub scoring: ScoringSettings,
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                for warning in settings.validate() {
                    log::warn!("settings: {warning}");
                }
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Height of the opening between an obstacle pair
    pub fn gap_height(&self) -> f32 {
        self.player.sprite_size.y * self.obstacles.gap_multiple
    }

    /// Seconds an obstacle pair takes to scroll out and be removed
    pub fn scroll_duration(&self) -> f32 {
        self.viewport.width() / self.obstacles.speed_divisor
    }

    /// Non-fatal warnings for values that parse but make no sense
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.viewport.width() <= 0.0 || self.viewport.height() <= 0.0 {
            warnings.push(format!(
                "viewport.size must be positive (got {}x{})",
                self.viewport.width(),
                self.viewport.height()
            ));
        }
        if self.player.sprite_size.min_element() <= 0.0 {
            warnings.push("player.sprite_size must be positive".to_string());
        }
        if self.player.mass <= 0.0 {
            warnings.push(format!("player.mass must be positive (got {})", self.player.mass));
        }
        if self.obstacles.size.min_element() <= 0.0 {
            warnings.push("obstacles.size must be positive".to_string());
        }
        if self.obstacles.spawn_period < SIM_DT {
            warnings.push(format!(
                "obstacles.spawn_period must be at least one step of {SIM_DT}s (got {})",
                self.obstacles.spawn_period
            ));
        }
        if self.obstacles.speed_divisor <= 0.0 {
            warnings.push("obstacles.speed_divisor must be positive".to_string());
        }
        if self.obstacles.travel_widths < 1.0 {
            warnings.push(format!(
                "obstacles.travel_widths below 1 removes obstacles on screen (got {})",
                self.obstacles.travel_widths
            ));
        }
        if self.gap_height() >= self.viewport.height() {
            warnings.push("gap height exceeds the viewport; obstacles will never block".to_string());
        }
        if self.physics.gravity.y >= 0.0 {
            warnings.push("physics.gravity.y should point down".to_string());
        }
        if self.backdrop.loop_secs <= 0.0 {
            warnings.push("backdrop.loop_secs must be positive".to_string());
        }

        warnings
    }
}
