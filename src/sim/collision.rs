//! Player/platform trigger detection
//!
//! A minimal axis-aligned overlap pass standing in for the host physics
//! notifier. Overlaps gathered here are diffed against the previous tick's
//! set to produce synchronous surface enter/exit deliveries.

use glam::Vec2;

use super::state::{Platform, SurfaceTag};
use crate::consts::*;

/// An active player/platform overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub platform_id: u32,
    pub tag: SurfaceTag,
    /// Y the player snaps to when landing on this surface
    pub top_y: f32,
}

/// Box-vs-box overlap between the player and one platform
pub fn player_overlaps_platform(player_pos: Vec2, platform: &Platform) -> bool {
    let half = platform.half_extents();
    (player_pos.x - platform.pos.x).abs() <= PLAYER_HALF_WIDTH + half.x
        && (player_pos.y - platform.pos.y).abs() <= PLAYER_HALF_HEIGHT + half.y
}

/// Collect every platform currently overlapping the player
pub fn gather_contacts<'a>(
    player_pos: Vec2,
    platforms: impl Iterator<Item = &'a Platform>,
    out: &mut Vec<Contact>,
) {
    out.clear();
    for platform in platforms {
        if player_overlaps_platform(player_pos, platform) {
            out.push(Contact {
                platform_id: platform.id,
                tag: platform.kind.surface_tag(),
                top_y: platform.top_y(),
            });
        }
    }
}
