//! Sky Hopper entry point
//!
//! Headless demo driver: a scripted pilot plays a few sessions at the fixed
//! cadence while the event stream goes to the log. Useful for soak-testing
//! the sim without a host engine attached.

use sky_hopper::consts::SIM_DT;
use sky_hopper::sim::{
    EndOutcome, GameEvent, GamePhase, GameState, PlatformKind, TickInput, Viewport, fixed_step,
    variable_step,
};
use sky_hopper::{AudioMixer, Tuning};

/// Give up on a session after this much simulated time
const MAX_SESSION_SECS: f32 = 180.0;
/// Frame cap for the reset flight; the tween finishes far sooner
const MAX_RESET_FRAMES: u32 = 10_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mixer = AudioMixer::new();
    let mut state = GameState::new(seed, Tuning::default(), Viewport::default());
    log::info!("demo run, seed {seed}");

    for session in 1..=3u32 {
        state.start_game();
        let mut elapsed = 0.0;

        while !state.phase.is_ended() && elapsed < MAX_SESSION_SECS {
            let input = autopilot(&state);
            variable_step(&mut state, &input, SIM_DT);
            fixed_step(&mut state, SIM_DT);
            drain_events(&mut state, &mixer);
            elapsed += SIM_DT;
        }

        let GamePhase::Ended(outcome) = state.phase else {
            log::warn!("session {session} hit the time cap, aborting demo");
            break;
        };
        log::info!(
            "session {session}: {:?} after {elapsed:.1}s, level {}, best altitude {:.1}",
            outcome,
            state.progress.current_level,
            state.progress.highest_altitude
        );

        // Victory continues seamlessly on the next start; defeat flies the
        // camera home and rebuilds the scene first
        if outcome == EndOutcome::Defeat {
            state.reset_game();
            let mut frames = 0;
            while state.phase != GamePhase::Idle && frames < MAX_RESET_FRAMES {
                variable_step(&mut state, &TickInput::default(), SIM_DT);
                fixed_step(&mut state, SIM_DT);
                frames += 1;
            }
            drain_events(&mut state, &mixer);
        }
    }
}

/// Scripted pilot: steer toward the next platform overhead and hop whenever
/// possible, spending the double jump on the way down.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;

    let target = state
        .platforms()
        .filter(|p| p.top_y() > player.pos.y)
        .min_by(|a, b| {
            a.top_y()
                .partial_cmp(&b.top_y())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let move_x = target
        .map(|p| (p.pos.x - player.pos.x).clamp(-1.0, 1.0))
        .unwrap_or(0.0);
    // Press, don't hold: skip frames where the previous hop is still rising
    let jump = (player.grounded && player.body.velocity.y <= 0.0)
        || (player.moving_down && player.can_double_jump);

    TickInput { move_x, jump }
}

fn drain_events(state: &mut GameState, mixer: &AudioMixer) {
    for event in state.take_events() {
        match event {
            GameEvent::Sound(cue) => {
                log::debug!("cue {cue:?} at gain {:.2}", mixer.effective_volume());
            }
            GameEvent::Pose(pose) => log::trace!("pose -> {}", pose.trigger_name()),
            GameEvent::Effect { kind, pos } => {
                log::trace!("effect {kind:?} at ({:.1}, {:.1})", pos.x, pos.y);
            }
            GameEvent::PlatformSpawned { id, kind, pos } => {
                if kind == PlatformKind::Winning {
                    log::info!("winning platform #{id} at ({:.1}, {:.1})", pos.x, pos.y);
                }
            }
            GameEvent::PlatformsCleared => log::debug!("platforms cleared"),
        }
    }
}
