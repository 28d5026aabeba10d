//! Session sequencing
//!
//! Start, terminal transitions and the ordered reset flow, plus the
//! per-fixed-tick score and bounds evaluation. Terminal side effects fire
//! exactly once per ended run; the phase itself is the guard.

use glam::Vec2;

use super::state::{EndOutcome, GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;
use crate::consts::*;

impl GameState {
    /// Begin (or, after a victory, continue) a session. A continue advances
    /// the level and scales the platform budget linearly with it. Calling
    /// this while Playing is prevented by the host UI, not re-validated
    /// here.
    pub fn start_game(&mut self) {
        if self.was_victory {
            self.progress.current_level += 1;
            self.progress.platform_count_max =
                self.tuning.spawn.starting_platform_count * self.progress.current_level;
            self.progress.highest_altitude = 0.0;
        }

        self.spawner.configure(self.progress.platform_count_max);
        self.camera.set_scroll_enabled(true);
        self.player.set_can_move(true);
        self.phase = GamePhase::Playing;
        self.was_victory = false;

        log::info!(
            "session start: level {}, platform budget {}",
            self.progress.current_level,
            self.progress.platform_count_max
        );
    }

    /// Terminal transition. Idempotent: a second call, with either outcome,
    /// changes nothing and emits nothing.
    pub fn process_game_end(&mut self, victory: bool) {
        if self.phase.is_ended() {
            return;
        }

        self.camera.set_scroll_enabled(false);
        let jump_power = self.tuning.player.jump_power;

        let outcome = if victory {
            self.player.win(jump_power);
            self.player.set_can_move(false);
            self.events.push(GameEvent::Sound(SoundCue::Win));
            EndOutcome::Victory
        } else {
            if !self.player.is_dead() {
                self.player.die(jump_power);
                self.player.set_can_move(false);
            }
            self.events.push(GameEvent::Sound(SoundCue::Fail));
            EndOutcome::Defeat
        };

        self.phase = GamePhase::Ended(outcome);
        self.was_victory = victory;

        log::info!(
            "session end: {:?} at level {}, best altitude {:.1}",
            outcome,
            self.progress.current_level,
            self.progress.highest_altitude
        );
    }

    /// Begin the ordered reset flow: the camera flies back first; platforms
    /// and the player are only touched once it has settled (see
    /// `finish_reset`). A no-op while a reset is already in flight.
    pub fn reset_game(&mut self) {
        if self.reset_pending || self.camera.returning() {
            return;
        }

        self.reset_pending = true;
        self.camera.return_to_start();
        log::info!("reset: camera returning to start");
    }

    /// Second half of the reset flow, run on the frame the camera reports
    /// its return complete.
    pub(crate) fn finish_reset(&mut self) {
        self.spawner.reset(self.tuning.spawn.camera_delta_threshold);
        self.events.push(GameEvent::PlatformsCleared);
        self.contacts.clear();

        self.player.reset();
        self.player.set_visible(true);

        self.reset_pending = false;
        self.phase = GamePhase::Idle;
        log::info!("reset complete");
    }

    /// Altitude tracking; frozen once the run has ended
    pub(crate) fn process_score(&mut self) {
        if !self.phase.is_ended() {
            let altitude = self.player.pos.y - self.player.start_pos().y;
            if altitude > self.progress.highest_altitude {
                self.progress.highest_altitude = altitude;
            }
        }
    }

    /// Screen-space bounds rules. Live run: leaving the viewport on any side
    /// is a defeat. Ended run: once the player has sunk far enough below the
    /// viewport it is hidden and repositioned - cleanup, not a transition.
    pub(crate) fn process_player_bounds(&mut self) {
        let screen = self
            .viewport
            .world_to_screen(self.player.pos, self.camera.pos);

        if !self.phase.is_ended() {
            let off_screen = screen.x < 0.0
                || screen.x > self.viewport.width
                || screen.y < 0.0
                || screen.y > self.viewport.height;
            if off_screen {
                self.process_game_end(false);
            }
        } else {
            let cleanup_line =
                self.viewport.height - self.viewport.height * OFFSCREEN_CLEANUP_FACTOR;
            if screen.y < cleanup_line {
                self.player.set_visible(false);
                self.player.reset();
            }
        }
    }

    /// World position for the host's best-altitude marker: pinned to the
    /// right edge of the screen at the best altitude reached.
    pub fn altitude_marker_pos(&self) -> Vec2 {
        let edge = self.viewport.screen_to_world(
            Vec2::new(self.viewport.width * ALTITUDE_MARKER_X_FACTOR, 0.0),
            self.camera.pos,
        );
        Vec2::new(edge.x, self.player.start_pos().y + self.progress.highest_altitude)
    }
}
