//! Session state and core simulation types
//!
//! Everything the host shell reads between frames lives here.

use glam::Vec2;

use super::camera::CameraRig;
use super::player::{Player, Pose};
use super::spawner::PlatformSpawner;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::tuning::Tuning;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    /// Player reached the winning platform
    Victory,
    /// Player left the screen while the run was live
    Defeat,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Between sessions, waiting for a start
    Idle,
    /// Active climb
    Playing,
    /// Run over; terminal side effects have fired exactly once
    Ended(EndOutcome),
}

impl GamePhase {
    /// Terminal-transition guard: once ended, end processing is a no-op
    pub fn is_ended(&self) -> bool {
        matches!(self, GamePhase::Ended(_))
    }
}

/// Surface categories reported by the collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTag {
    Ground,
    WinPlatform,
}

/// Platform kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Normal,
    Winning,
}

impl PlatformKind {
    pub fn surface_tag(self) -> SurfaceTag {
        match self {
            PlatformKind::Normal => SurfaceTag::Ground,
            PlatformKind::Winning => SurfaceTag::WinPlatform,
        }
    }
}

/// A platform entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub pos: Vec2,
    pub width: f32,
}

impl Platform {
    /// World Y where a landing player's position snaps to
    pub fn top_y(&self) -> f32 {
        self.pos.y + PLATFORM_HEIGHT * PLATFORM_TOP_FACTOR
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, PLATFORM_HEIGHT / 2.0)
    }
}

/// Particle effects the host instantiates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Puff under the feet on every jump
    JumpDust,
    /// Kicked up when a grounded run reverses to the right
    RunDustLeft,
    /// Kicked up when a grounded run reverses to the left
    RunDustRight,
}

/// Side effects for the host shell, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Play a sound cue through the host mixer
    Sound(SoundCue),
    /// Fire a named animation trigger
    Pose(Pose),
    /// Instantiate a particle effect at a world position
    Effect { kind: EffectKind, pos: Vec2 },
    /// A platform entity came into existence
    PlatformSpawned { id: u32, kind: PlatformKind, pos: Vec2 },
    /// All spawned platform entities were destroyed
    PlatformsCleared,
}

/// Screen/viewport mapper between world and screen coordinates.
/// Screen origin is bottom-left, y up, matching the host's convention.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Height of the visible world slice in world units
    pub world_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, world_height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0 && world_height > 0.0,
            "viewport dimensions must be positive"
        );
        Self {
            width,
            height,
            world_height,
        }
    }

    /// Width of the visible world slice, from the screen aspect ratio
    pub fn world_width(&self) -> f32 {
        self.world_height * self.width / self.height
    }

    pub fn world_to_screen(&self, world: Vec2, camera: Vec2) -> Vec2 {
        Vec2::new(
            ((world.x - camera.x) / self.world_width() + 0.5) * self.width,
            ((world.y - camera.y) / self.world_height + 0.5) * self.height,
        )
    }

    pub fn screen_to_world(&self, screen: Vec2, camera: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x / self.width - 0.5) * self.world_width() + camera.x,
            (screen.y / self.height - 0.5) * self.world_height + camera.y,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0, 10.0)
    }
}

/// Level and altitude tracking across a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    /// 1-based level counter; advances on victory + continue
    pub current_level: u32,
    /// Platform budget for the current session
    pub platform_count_max: u32,
    /// Best altitude reached this level (world units above the start)
    pub highest_altitude: f32,
}

/// Fixed scene layout: the launch platform and the player's spawn on it
const LAUNCH_PLATFORM_POS: Vec2 = Vec2::new(0.0, -3.0);
const PLAYER_START: Vec2 = Vec2::new(0.0, -2.8);

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible platform layouts
    pub seed: u64,
    /// Fixed-tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Survives the reset gap so the continue-flow can scale the next session
    pub(crate) was_victory: bool,
    /// A reset sequence is waiting on the camera return tween
    pub(crate) reset_pending: bool,
    pub progress: LevelProgress,
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub player: Player,
    pub camera: CameraRig,
    pub spawner: PlatformSpawner,
    /// Scene-fixed launch platform; never destroyed by spawner resets
    pub launch_platform: Platform,
    /// Trigger overlaps active last tick, diffed for enter/exit delivery
    pub(crate) contacts: Vec<(u32, SurfaceTag)>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session. Panics on invalid wiring (bad tuning or viewport);
    /// a session that cannot run is a construction bug, not a runtime case.
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        tuning.validate();

        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Idle,
            was_victory: false,
            reset_pending: false,
            progress: LevelProgress {
                current_level: 1,
                platform_count_max: tuning.spawn.starting_platform_count,
                highest_altitude: 0.0,
            },
            viewport,
            tuning,
            player: Player::new(PLAYER_START),
            camera: CameraRig::new(Vec2::ZERO),
            spawner: PlatformSpawner::new(
                seed,
                tuning.spawn.camera_delta_threshold,
                0.0,
                tuning.spawn.starting_platform_count,
            ),
            launch_platform: Platform {
                id: 0,
                kind: PlatformKind::Normal,
                pos: LAUNCH_PLATFORM_POS,
                width: LAUNCH_PLATFORM_WIDTH,
            },
            contacts: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Drain the events accumulated since the last drain
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// All live platforms: the launch platform plus everything spawned
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        std::iter::once(&self.launch_platform).chain(self.spawner.platforms().iter())
    }
}
