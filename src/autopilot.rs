//! Unattended play
//!
//! Picks taps from positions alone: aim for the centre of the next gap the
//! player has not yet cleared, and flap whenever the player sinks too far
//! below it. Good enough to keep the native binary busy, not to win.

use crate::sim::{RoundController, RoundPhase, Scene};

/// How far below the target height the player may sink before flapping,
/// as a fraction of the gap height
const SINK_FRACTION: f32 = 0.3;

/// Height the autopilot is currently steering toward
pub fn target_height<S: Scene + ?Sized>(round: &RoundController, scene: &S) -> f32 {
    let settings = round.settings();
    let fallback = settings.viewport.mid_y();
    let Some(player_x) = round.player().and_then(|p| scene.position(p)).map(|p| p.x) else {
        return fallback;
    };
    let clearance = settings.obstacles.size.x / 2.0 + settings.player.sprite_size.y / 2.0;

    round
        .active_obstacles()
        .iter()
        .filter_map(|pair| scene.position(pair.gap))
        .find(|gap| gap.x + clearance >= player_x)
        .map(|gap| gap.y)
        .unwrap_or(fallback)
}

/// Whether to tap this frame. Never restarts a finished round.
pub fn should_tap<S: Scene + ?Sized>(round: &RoundController, scene: &S) -> bool {
    match round.phase() {
        RoundPhase::Idle => true,
        RoundPhase::Over => false,
        RoundPhase::Active => {
            let Some(player_y) = round.player().and_then(|p| scene.position(p)).map(|p| p.y) else {
                return false;
            };
            let sink = round.settings().gap_height() * SINK_FRACTION;
            player_y < target_height(round, scene) - sink
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::platform::HeadlessScene;

    #[test]
    fn test_taps_to_start_and_not_to_restart() {
        let settings = Settings::default();
        let mut scene = HeadlessScene::new(&settings);
        let mut round = RoundController::new(settings, 5);
        round.setup(&mut scene);
        assert!(should_tap(&round, &scene));

        round.handle_tap(&mut scene);
        assert_eq!(round.phase(), RoundPhase::Active);
        assert!(!should_tap(&round, &scene), "player sits at the target");
    }

    #[test]
    fn test_targets_next_uncleared_gap() {
        let settings = Settings::default();
        let mut scene = HeadlessScene::new(&settings);
        let mut round = RoundController::new(settings, 5);
        round.setup(&mut scene);
        round.handle_tap(&mut scene);

        assert_eq!(target_height(&round, &scene), 0.0);
        let pair = round.spawn(&mut scene);
        let gap_y = scene.position(pair.gap).unwrap().y;
        assert_eq!(target_height(&round, &scene), gap_y);
    }
}
