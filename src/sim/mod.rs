//! Round simulation
//!
//! All game-state logic lives here. This module must stay host-agnostic:
//! - The host is reached only through the [`Scene`] trait
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod category;
pub mod controller;
pub mod region;
pub mod scene;
pub mod spawner;
pub mod state;
pub mod tick;

pub use category::{
    ALLOWED_CONTACTS, Category, CategorySet, CollisionFilter, ContactBody, ContactEvent,
    ContactKind, contact_allowed,
};
pub use controller::RoundController;
pub use region::{Label, LabelKind, MotionScript, RegionId, RegionKind, RegionSpec, Shape};
pub use scene::Scene;
pub use spawner::{SpawnLayout, SpawnTimer, draw_offset, recenter_offset};
pub use state::{GameEvent, RoundPhase, RoundState, SpawnedPair};
pub use tick::{TickInput, tick};
