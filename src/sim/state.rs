//! Round state and events
//!
//! Everything the round controller owns exclusively lives here.

use serde::{Deserialize, Serialize};

use super::region::RegionId;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Player is on screen but inert, waiting for the first tap
    #[default]
    Idle,
    /// Gravity on, obstacles spawning, contacts live
    Active,
    /// Everything frozen until the next tap
    Over,
}

/// Score and game-over flag for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u32,
    pub is_over: bool,
}

impl RoundState {
    /// Add one point. Ignored once the round is over.
    pub fn add_point(&mut self) -> bool {
        if self.is_over {
            return false;
        }
        self.score += 1;
        true
    }

    /// End the round. Returns false if it was already over.
    pub fn finish(&mut self) -> bool {
        if self.is_over {
            return false;
        }
        self.is_over = true;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Regions created by one spawn tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedPair {
    pub upper: RegionId,
    pub lower: RegionId,
    pub gap: RegionId,
}

/// Notable things that happened during a frame, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First tap of a round: gravity enabled
    Activated,
    /// Tap while active
    Flapped,
    /// An obstacle pair and its gap entered the scene
    Spawned { pair: SpawnedPair, offset: f32 },
    /// The player passed a gap
    Scored { score: u32 },
    /// A repeat contact with a gap that already scored
    DuplicateGap { gap: RegionId },
    /// The round ended
    GameOver { score: u32 },
    /// Scene rebuilt after game over
    Restarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_frozen_after_finish() {
        let mut state = RoundState::default();
        assert!(state.add_point());
        assert!(state.add_point());
        assert!(state.finish());
        assert!(!state.add_point());
        assert!(!state.finish());
        assert_eq!(state.score, 2);
        assert!(state.is_over);

        state.reset();
        assert_eq!(state, RoundState::default());
    }
}
