//! Scene regions, scripted motion and labels
//!
//! These are the values the round controller hands to the host scene. The
//! host owns the regions once added; the controller only keeps their ids.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Host-assigned handle for a region. Ids increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

/// What a region represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    Player,
    Ground,
    UpperObstacle,
    LowerObstacle,
    Gap,
    Backdrop,
}

/// Collision envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

/// Everything the host needs to create a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub kind: RegionKind,
    pub shape: Shape,
    /// Centre of the region
    pub position: Vec2,
    /// Draw order (lower is further back)
    pub z: f32,
    /// Starts responding to gravity when true
    pub dynamic: bool,
}

impl RegionSpec {
    pub fn rect(kind: RegionKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            shape: Shape::Rect { size },
            position,
            z: 0.0,
            dynamic: false,
        }
    }

    pub fn circle(kind: RegionKind, position: Vec2, radius: f32) -> Self {
        Self {
            kind,
            shape: Shape::Circle { radius },
            position,
            z: 0.0,
            dynamic: false,
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    /// Bottom edge of a rectangular region
    pub fn bottom(&self) -> f32 {
        match self.shape {
            Shape::Rect { size } => self.position.y - size.y / 2.0,
            Shape::Circle { radius } => self.position.y - radius,
        }
    }

    /// Top edge of a rectangular region
    pub fn top(&self) -> f32 {
        match self.shape {
            Shape::Rect { size } => self.position.y + size.y / 2.0,
            Shape::Circle { radius } => self.position.y + radius,
        }
    }
}

/// Time-bounded motion interpreted by the host's scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionScript {
    /// Translate by `delta` over `duration` seconds, then remove the region
    MoveThenRemove { delta: Vec2, duration: f32 },
    /// Translate by `delta` over `duration`, snap back, repeat forever
    LoopShift { delta: Vec2, duration: f32 },
}

/// On-screen text slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
    Score,
    GameOver,
}

/// A text label placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
    pub position: Vec2,
    pub font_name: String,
    pub font_size: f32,
}
