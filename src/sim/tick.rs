//! One frame of play
//!
//! Input first, then the host step with contact routing, then the spawn timer.

use super::controller::RoundController;
use super::scene::Scene;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap / click / space this frame
    pub tap: bool,
}

/// Advance the round and its host scene by one frame
pub fn tick<S: Scene + ?Sized>(
    round: &mut RoundController,
    scene: &mut S,
    input: &TickInput,
    dt: f32,
) {
    if input.tap {
        round.handle_tap(scene);
    }

    for contact in scene.step(dt) {
        round.handle_contact(scene, contact);
    }

    round.update(scene, dt);
}
