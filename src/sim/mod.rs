//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep for physics, scoring and spawn cadence
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The host shell drives it with [`tick::fixed_step`] / [`tick::variable_step`]
//! and drains [`state::GameEvent`]s once per frame.

pub mod camera;
pub mod collision;
pub mod player;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use camera::CameraRig;
pub use collision::{Contact, gather_contacts, player_overlaps_platform};
pub use player::{Player, Pose};
pub use spawner::{PlatformSpawner, SpawnCursor};
pub use state::{
    EffectKind, EndOutcome, GameEvent, GamePhase, GameState, LevelProgress, Platform,
    PlatformKind, SurfaceTag, Viewport,
};
pub use tick::{TickInput, fixed_step, variable_step};
