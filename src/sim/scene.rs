//! Host scene interface
//!
//! The round controller never integrates physics or draws anything itself.
//! It drives a host through this trait: adding regions, tagging them with
//! collision filters, scheduling scripted motion, toggling gravity, applying
//! impulses, pausing, and placing labels. The host reports contacts back from
//! [`Scene::step`].

use glam::Vec2;

use super::category::{CollisionFilter, ContactEvent};
use super::region::{Label, MotionScript, RegionId, RegionSpec};

pub trait Scene {
    /// Add a region to the active scene
    fn add_region(&mut self, spec: RegionSpec) -> RegionId;

    /// Attach a category triple to a region
    fn set_filter(&mut self, id: RegionId, filter: CollisionFilter);

    /// Schedule scripted motion on a region
    fn run_script(&mut self, id: RegionId, script: MotionScript);

    /// Enable or disable gravity response
    fn set_dynamic(&mut self, id: RegionId, dynamic: bool);

    fn set_velocity(&mut self, id: RegionId, velocity: Vec2);

    /// Apply an instantaneous impulse
    fn apply_impulse(&mut self, id: RegionId, impulse: Vec2);

    /// Freeze or resume all scripted motion and physics
    fn set_paused(&mut self, paused: bool);

    /// Place or replace the label of the same kind
    fn set_label(&mut self, label: Label);

    /// Remove every region and label
    fn clear(&mut self);

    /// Current centre of a region, if it is still in the scene
    fn position(&self, id: RegionId) -> Option<Vec2>;

    /// Advance the host by `dt` seconds and return the contacts that began,
    /// in detection order
    fn step(&mut self, dt: f32) -> Vec<ContactEvent>;
}
