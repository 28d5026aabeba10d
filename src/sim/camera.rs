//! Camera rig: auto-scroll, parallax layers, sky darkening, return tween
//!
//! The rig owns the scroll position and the Y coordinates of two parallax
//! sky layers. The host renderer reads positions and the sky color scalar;
//! nothing here draws.

use glam::Vec2;

use crate::tuning::CameraTuning;
use crate::{lerp, smooth_step};

/// Return-to-start tween: a normalized parameter advanced once per frame.
/// Captures the departure Ys so easing stays stable over the whole flight.
#[derive(Debug, Clone, Copy)]
struct ReturnTween {
    progress: f32,
    camera_from: f32,
    sky2_from: f32,
    sky3_from: f32,
}

/// Scrolling camera plus parallax sky layers
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub pos: Vec2,
    start_pos: Vec2,
    pub sky2_y: f32,
    sky2_start_y: f32,
    pub sky3_y: f32,
    sky3_start_y: f32,
    pub scroll_enabled: bool,
    tween: Option<ReturnTween>,
}

impl CameraRig {
    pub fn new(start_pos: Vec2) -> Self {
        Self {
            pos: start_pos,
            start_pos,
            sky2_y: start_pos.y,
            sky2_start_y: start_pos.y,
            sky3_y: start_pos.y,
            sky3_start_y: start_pos.y,
            scroll_enabled: false,
            tween: None,
        }
    }

    pub fn start_pos(&self) -> Vec2 {
        self.start_pos
    }

    pub fn set_scroll_enabled(&mut self, state: bool) {
        self.scroll_enabled = state;
    }

    /// Per-frame scroll: camera up at full speed, sky layers at their
    /// parallax fractions (near layer faster than far layer)
    pub fn tick(&mut self, dt: f32, tuning: &CameraTuning) {
        if !self.scroll_enabled {
            return;
        }
        self.pos.y += tuning.scroll_speed * dt;
        self.sky2_y += tuning.scroll_speed * tuning.sky2_mult * dt;
        self.sky3_y += tuning.scroll_speed * tuning.sky3_mult * dt;
    }

    /// Channel value the host applies uniformly to R,G,B of the nearest sky
    /// layer: 1.0 at the start altitude, fading to the dark value over
    /// `darken_distance`
    pub fn sky_color_value(&self, tuning: &CameraTuning) -> f32 {
        let t = ((self.pos.y - self.start_pos.y) / tuning.darken_distance).clamp(0.0, 1.0);
        lerp(1.0, tuning.dark_color_value, t)
    }

    /// Begin the return-to-start tween. A tween already in flight keeps
    /// running; it always completes once started.
    pub fn return_to_start(&mut self) {
        if self.tween.is_none() {
            self.tween = Some(ReturnTween {
                progress: 0.0,
                camera_from: self.pos.y,
                sky2_from: self.sky2_y,
                sky3_from: self.sky3_y,
            });
        }
    }

    pub fn returning(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the return tween by one frame. Returns true exactly once,
    /// on the frame the camera snaps to its start position.
    pub fn advance_return(&mut self, dt: f32, rate: f32) -> bool {
        let Some(tween) = &mut self.tween else {
            return false;
        };

        tween.progress += rate * dt;
        if tween.progress >= 1.0 {
            // Snap exactly; smoothstep convergence leaves float residue
            self.pos.y = self.start_pos.y;
            self.sky2_y = self.sky2_start_y;
            self.sky3_y = self.sky3_start_y;
            self.tween = None;
            return true;
        }

        self.pos.y = smooth_step(tween.camera_from, self.start_pos.y, tween.progress);
        self.sky2_y = smooth_step(tween.sky2_from, self.sky2_start_y, tween.progress);
        self.sky3_y = smooth_step(tween.sky3_from, self.sky3_start_y, tween.progress);
        false
    }
}
