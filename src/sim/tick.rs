//! Driver-invoked step functions
//!
//! The host loop owns the cadence: `fixed_step` at [`crate::consts::SIM_DT`]
//! for physics, collision delivery, spawn cadence and scoring;
//! `variable_step` once per rendered frame for input intent and visual
//! interpolation. Single-threaded by construction - the only suspension is
//! the camera return tween, polled one step per frame.

use super::collision::{Contact, gather_contacts};
use super::state::GameState;

/// Input intent for one frame, already polled by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal intent in [-1, 1]
    pub move_x: f32,
    /// Jump was pressed this frame (edge, not level)
    pub jump: bool,
}

/// Advance physics, collision, spawn cadence and scoring by one fixed step
pub fn fixed_step(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;

    state.player.integrate(dt, &state.tuning.player);

    // Collision pass: overlaps diffed into synchronous enter/exit calls.
    // Skipped entirely while the body ignores geometry (death flight).
    if state.player.collision_enabled {
        let mut current: Vec<Contact> = Vec::new();
        gather_contacts(state.player.pos, state.platforms(), &mut current);

        let mut landed_on_win = false;
        for contact in &current {
            let is_new = !state
                .contacts
                .iter()
                .any(|(id, _)| *id == contact.platform_id);
            if is_new && state.player.surface_enter(contact.tag, contact.top_y) {
                landed_on_win = true;
            }
        }
        for (id, tag) in &state.contacts {
            if !current.iter().any(|c| c.platform_id == *id) {
                state.player.surface_exit(*tag);
            }
        }
        state.contacts = current.iter().map(|c| (c.platform_id, c.tag)).collect();

        if landed_on_win {
            state.process_game_end(true);
        }
    } else {
        // Turning collision response off ends every live contact, so the
        // grounded flag releases and gravity takes the body
        for (_, tag) in std::mem::take(&mut state.contacts) {
            state.player.surface_exit(tag);
        }
    }

    // Spawn cadence polls camera displacement each fixed step
    let camera_pos = state.camera.pos;
    state
        .spawner
        .tick(camera_pos, &state.viewport, &state.tuning.spawn, &mut state.events);

    // Scoring and bounds run after the physics/collision pass, never before
    state.process_score();
    state.process_player_bounds();

    state.player.process_graphics(&mut state.events);
}

/// Apply input intent and advance visual interpolation by one frame
pub fn variable_step(state: &mut GameState, input: &TickInput, dt: f32) {
    state
        .player
        .apply_input(input.move_x, input.jump, &state.tuning.player, &mut state.events);

    state.camera.tick(dt, &state.tuning.camera);

    // The return tween completing releases a pending reset sequence
    let rate = state.tuning.camera.return_rate;
    if state.camera.advance_return(dt, rate) && state.reset_pending {
        state.finish_reset();
    }
}
