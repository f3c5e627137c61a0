//! Bird vs. pipe collision tests
//!
//! Axis-aligned boxes only. A pipe is lethal where the bird overlaps it
//! horizontally and any part of the bird sticks out of the gap. The surface
//! edges are never lethal.

use super::state::{Avatar, Obstacle};

/// Whether the bird touches either segment of the pipe
pub fn collides(avatar: &Avatar, obstacle: &Obstacle, surface_height: f32) -> bool {
    let overlaps_x =
        avatar.pos.x < obstacle.x + obstacle.width && avatar.pos.x + avatar.width > obstacle.x;
    if !overlaps_x {
        return false;
    }

    let above_gap = avatar.pos.y < obstacle.top;
    let below_gap = avatar.pos.y + avatar.height > surface_height - obstacle.bottom;
    above_gap || below_gap
}

/// Index of the first live pipe the bird hits, checking every one
pub fn first_collision<'a>(
    avatar: &Avatar,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    surface_height: f32,
) -> Option<usize> {
    obstacles
        .into_iter()
        .position(|obstacle| collides(avatar, obstacle, surface_height))
}
