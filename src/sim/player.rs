//! Player movement model
//!
//! Converts movement intent plus gravity into velocity and integrates it.
//! Grounding is resolved through surface enter/exit calls delivered by the
//! collision pass; poses and dust effects are derived here and emitted as
//! events for the host's animator and particle systems.

use glam::Vec2;

use super::state::{EffectKind, GameEvent, SurfaceTag};
use crate::audio::SoundCue;
use crate::move_toward;
use crate::tuning::PlayerTuning;

/// Named animation triggers the host animator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Walk,
    Jump,
    Fall,
    Hurt,
}

impl Pose {
    /// Trigger name as the host animator knows it
    pub fn trigger_name(&self) -> &'static str {
        match self {
            Pose::Idle => "Idle",
            Pose::Walk => "Walk",
            Pose::Jump => "Jump",
            Pose::Fall => "Fall",
            Pose::Hurt => "Hurt",
        }
    }
}

/// Rigid-body facade: the sim writes velocity, the integrator honors it
/// only while simulation is active
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub velocity: Vec2,
    pub simulated: bool,
}

/// Jump dust spawns under the feet
const JUMP_DUST_OFFSET: Vec2 = Vec2::new(0.0, -0.45);
/// Run dust kicks up behind the reversal point
const RUN_DUST_OFFSET: Vec2 = Vec2::new(0.3, -0.4);

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    start_pos: Vec2,
    pub body: Body,
    /// Ramped movement direction; x persists across airborne frames
    pub move_dir: Vec2,
    /// Input intent for the current frame
    pub target_move_dir: Vec2,
    /// Previous tick's move direction, for run-dust reversal detection
    prev_move_dir: Vec2,
    pub grounded: bool,
    pub moving_down: bool,
    pub can_double_jump: bool,
    pub can_move: bool,
    dead: bool,
    /// When off, the collision pass skips this body entirely
    pub collision_enabled: bool,
    pub visible: bool,
    /// Sprite flip the host renderer reads
    pub facing_left: bool,
    pose: Pose,
}

impl Player {
    pub fn new(start_pos: Vec2) -> Self {
        Self {
            pos: start_pos,
            start_pos,
            body: Body {
                velocity: Vec2::ZERO,
                simulated: true,
            },
            move_dir: Vec2::ZERO,
            target_move_dir: Vec2::ZERO,
            prev_move_dir: Vec2::ZERO,
            grounded: false,
            moving_down: false,
            can_double_jump: false,
            can_move: false,
            dead: false,
            collision_enabled: true,
            visible: true,
            facing_left: false,
            pose: Pose::Idle,
        }
    }

    pub fn start_pos(&self) -> Vec2 {
        self.start_pos
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn set_can_move(&mut self, state: bool) {
        self.can_move = state;
    }

    pub fn set_visible(&mut self, state: bool) {
        self.visible = state;
    }

    /// Back to the spawn point with movement and collision restored.
    /// Does not touch `grounded`; the next contact pass settles it.
    pub fn reset(&mut self) {
        self.pos = self.start_pos;
        self.reset_move_dir();
        self.dead = false;
        self.collision_enabled = true;
    }

    pub fn reset_move_dir(&mut self) {
        self.target_move_dir = Vec2::ZERO;
        self.move_dir = Vec2::ZERO;
    }

    /// Victory flourish: upward hop, then gravity takes over
    pub fn win(&mut self, jump_power: f32) {
        self.reset_move_dir();
        self.move_dir.y = jump_power;
        self.grounded = false;
    }

    /// Death flourish: upward hop with collision response off so the body
    /// falls past geometry
    pub fn die(&mut self, jump_power: f32) {
        self.reset_move_dir();
        self.move_dir.y = jump_power;
        self.dead = true;
        self.collision_enabled = false;
    }

    /// Apply already-polled input intent for this frame
    pub fn apply_input(
        &mut self,
        move_x: f32,
        jump: bool,
        tuning: &PlayerTuning,
        events: &mut Vec<GameEvent>,
    ) {
        self.target_move_dir.x = 0.0;
        if !self.can_move {
            return;
        }

        self.target_move_dir.x = move_x.clamp(-1.0, 1.0);

        if jump && (self.grounded || self.can_double_jump) {
            if self.can_double_jump {
                self.jump(true, tuning, events);
                self.can_double_jump = false;
            } else {
                self.jump(false, tuning, events);
            }
        }
    }

    fn jump(&mut self, double: bool, tuning: &PlayerTuning, events: &mut Vec<GameEvent>) {
        if double {
            self.move_dir.y = tuning.jump_power * tuning.double_jump_mult;
            events.push(GameEvent::Sound(SoundCue::DoubleJump));
        } else {
            self.move_dir.y = tuning.jump_power;
            events.push(GameEvent::Sound(SoundCue::Jump));
        }

        events.push(GameEvent::Effect {
            kind: EffectKind::JumpDust,
            pos: self.pos + JUMP_DUST_OFFSET,
        });
    }

    /// One fixed physics step: gravity or grounded ramp, then integrate
    pub fn integrate(&mut self, dt: f32, tuning: &PlayerTuning) {
        if !self.body.simulated {
            return;
        }

        if !self.grounded {
            self.move_dir.y -= tuning.gravity * dt;
        } else {
            self.move_dir.x = move_toward(
                self.move_dir.x,
                self.target_move_dir.x,
                tuning.acceleration * dt,
            );
        }

        self.body.velocity = Vec2::new(self.move_dir.x * tuning.move_speed, self.move_dir.y);
        self.pos += self.body.velocity * dt;
        self.moving_down = self.body.velocity.y < 0.0;
    }

    /// Surface contact began. Only a descending player lands; returns true
    /// when the landing surface is the winning platform.
    pub fn surface_enter(&mut self, tag: SurfaceTag, surface_top_y: f32) -> bool {
        if !self.moving_down {
            return false;
        }

        self.grounded = true;
        self.can_double_jump = false;
        self.move_dir.y = 0.0;
        self.pos.y = surface_top_y;

        tag == SurfaceTag::WinPlatform
    }

    /// Surface contact ended. Leaving ground arms the double jump.
    pub fn surface_exit(&mut self, tag: SurfaceTag) {
        if tag == SurfaceTag::Ground {
            self.grounded = false;
            self.can_double_jump = true;
        }
    }

    /// Derive pose and dust effects from the post-physics state. Triggers
    /// fire only on pose change.
    pub fn process_graphics(&mut self, events: &mut Vec<GameEvent>) {
        if self.dead {
            self.set_pose(Pose::Hurt, events);
        } else if self.grounded {
            if self.move_dir.x > 0.0 && self.prev_move_dir.x <= 0.0 {
                events.push(GameEvent::Effect {
                    kind: EffectKind::RunDustLeft,
                    pos: self.pos + Vec2::new(RUN_DUST_OFFSET.x, RUN_DUST_OFFSET.y),
                });
            } else if self.move_dir.x < 0.0 && self.prev_move_dir.x >= 0.0 {
                events.push(GameEvent::Effect {
                    kind: EffectKind::RunDustRight,
                    pos: self.pos + Vec2::new(-RUN_DUST_OFFSET.x, RUN_DUST_OFFSET.y),
                });
            }

            if self.target_move_dir.x != 0.0 {
                self.facing_left = self.target_move_dir.x < 0.0;
                self.set_pose(Pose::Walk, events);
            } else {
                self.set_pose(Pose::Idle, events);
            }
        } else if self.moving_down {
            self.set_pose(Pose::Fall, events);
        } else {
            self.set_pose(Pose::Jump, events);
        }

        self.prev_move_dir = self.move_dir;
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose, events: &mut Vec<GameEvent>) {
        if self.pose != pose {
            self.pose = pose;
            events.push(GameEvent::Pose(pose));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player() -> (Player, PlayerTuning) {
        let mut player = Player::new(Vec2::ZERO);
        player.can_move = true;
        player.moving_down = true;
        player.surface_enter(SurfaceTag::Ground, 0.0);
        (player, PlayerTuning::default())
    }

    #[test]
    fn test_double_jump_allowance() {
        let (mut player, tuning) = grounded_player();
        let mut events = Vec::new();

        // First jump from the ground: full power
        player.apply_input(0.0, true, &tuning, &mut events);
        assert_eq!(player.move_dir.y, tuning.jump_power);

        // Leaving the ground arms the double jump
        player.surface_exit(SurfaceTag::Ground);
        assert!(player.can_double_jump);

        // Second jump mid-air: scaled power, allowance consumed
        player.apply_input(0.0, true, &tuning, &mut events);
        assert_eq!(
            player.move_dir.y,
            tuning.jump_power * tuning.double_jump_mult
        );
        assert!(!player.can_double_jump);

        // Third attempt before re-grounding: no effect
        player.move_dir.y = -1.25;
        player.apply_input(0.0, true, &tuning, &mut events);
        assert_eq!(player.move_dir.y, -1.25);
    }

    #[test]
    fn test_landing_restores_full_jump() {
        let (mut player, tuning) = grounded_player();
        let mut events = Vec::new();

        player.apply_input(0.0, true, &tuning, &mut events);
        player.surface_exit(SurfaceTag::Ground);
        player.moving_down = true;
        player.surface_enter(SurfaceTag::Ground, 3.0);

        assert!(player.grounded);
        assert!(!player.can_double_jump);
        assert_eq!(player.pos.y, 3.0);
        assert_eq!(player.move_dir.y, 0.0);

        // Grounded again: next jump is full power
        player.apply_input(0.0, true, &tuning, &mut events);
        assert_eq!(player.move_dir.y, tuning.jump_power);
    }

    #[test]
    fn test_enter_while_rising_does_not_ground() {
        let mut player = Player::new(Vec2::ZERO);
        player.moving_down = false;
        let won = player.surface_enter(SurfaceTag::WinPlatform, 5.0);
        assert!(!won);
        assert!(!player.grounded);
        assert_ne!(player.pos.y, 5.0);
    }

    #[test]
    fn test_airborne_horizontal_frozen() {
        let (mut player, tuning) = grounded_player();
        let mut events = Vec::new();
        let dt = 0.02;

        // Ramp up toward the right while grounded
        player.apply_input(1.0, false, &tuning, &mut events);
        for _ in 0..10 {
            player.integrate(dt, &tuning);
        }
        let grounded_x = player.move_dir.x;
        assert!(grounded_x > 0.0);

        // Airborne: opposite input must not change the ramped value
        player.surface_exit(SurfaceTag::Ground);
        player.apply_input(-1.0, false, &tuning, &mut events);
        for _ in 0..10 {
            player.integrate(dt, &tuning);
        }
        assert_eq!(player.move_dir.x, grounded_x);
        // Gravity acted instead
        assert!(player.move_dir.y < 0.0);
    }

    #[test]
    fn test_die_disables_collision_and_sets_hurt_pose() {
        let (mut player, tuning) = grounded_player();
        let mut events = Vec::new();

        player.die(tuning.jump_power);
        assert!(player.is_dead());
        assert!(!player.collision_enabled);
        assert_eq!(player.move_dir.y, tuning.jump_power);

        player.process_graphics(&mut events);
        assert_eq!(player.pose(), Pose::Hurt);
        assert!(events.contains(&GameEvent::Pose(Pose::Hurt)));
    }

    #[test]
    fn test_pose_triggers_fire_once() {
        let (mut player, _tuning) = grounded_player();
        let mut events = Vec::new();

        player.process_graphics(&mut events);
        player.process_graphics(&mut events);

        let pose_count = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Pose(_)))
            .count();
        assert_eq!(pose_count, 1);
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let start = Vec2::new(0.0, -2.8);
        let mut player = Player::new(start);
        player.die(8.0);
        player.pos = Vec2::new(4.0, -30.0);

        player.reset();
        assert_eq!(player.pos, start);
        assert!(!player.is_dead());
        assert!(player.collision_enabled);
        assert_eq!(player.move_dir, Vec2::ZERO);
    }

    #[test]
    fn test_input_ignored_while_movement_disabled() {
        let (mut player, tuning) = grounded_player();
        player.can_move = false;
        let mut events = Vec::new();

        player.apply_input(1.0, true, &tuning, &mut events);
        assert_eq!(player.target_move_dir.x, 0.0);
        assert_eq!(player.move_dir.y, 0.0);
        assert!(events.is_empty());
    }
}
