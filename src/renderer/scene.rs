//! Turns a simulation snapshot into a triangle list
//!
//! Pure projection of state: no game logic, no GPU access.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::TILT_PER_VELOCITY;
use crate::sim::{Avatar, Obstacle, Snapshot};

const PIPE_OUTLINE_WIDTH: f32 = 5.0;
const BIRD_OUTLINE_WIDTH: f32 = 2.0;
const BIRD_SEGMENTS: u32 = 32;
const BEAK_LENGTH: f32 = 10.0;
const EYE_RADIUS: f32 = 3.0;

/// Build all geometry for one frame: pipes first, bird on top
pub fn build_scene(snapshot: &Snapshot<'_>) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(snapshot.obstacles.len() * 60 + 400);
    for pipe in snapshot.obstacles {
        vertices.extend(pipe_vertices(pipe, snapshot.surface.height));
    }
    vertices.extend(bird_vertices(snapshot.avatar));
    vertices
}

/// Top segment hangs from y=0, bottom segment stands on the surface floor
pub fn pipe_vertices(pipe: &Obstacle, surface_height: f32) -> Vec<Vertex> {
    let top_origin = Vec2::new(pipe.x, 0.0);
    let top_size = Vec2::new(pipe.width, pipe.top);
    let bottom_origin = Vec2::new(pipe.x, surface_height - pipe.bottom);
    let bottom_size = Vec2::new(pipe.width, pipe.bottom);

    let mut vertices = shapes::rect(top_origin, top_size, colors::PIPE_FILL);
    vertices.extend(shapes::rect_outline(
        top_origin,
        top_size,
        PIPE_OUTLINE_WIDTH,
        colors::PIPE_OUTLINE,
    ));
    vertices.extend(shapes::rect(bottom_origin, bottom_size, colors::PIPE_FILL));
    vertices.extend(shapes::rect_outline(
        bottom_origin,
        bottom_size,
        PIPE_OUTLINE_WIDTH,
        colors::PIPE_OUTLINE,
    ));
    vertices
}

/// Body, beak and eye, tilted with vertical speed about the bird's corner
pub fn bird_vertices(avatar: &Avatar) -> Vec<Vertex> {
    let (w, h) = (avatar.width, avatar.height);
    let center = Vec2::new(w / 2.0, h / 2.0);

    // Built in bird-local space, then moved into place
    let mut vertices = shapes::ellipse(center, center, colors::BIRD_BODY, BIRD_SEGMENTS);
    vertices.extend(shapes::ellipse_outline(
        center,
        center,
        BIRD_OUTLINE_WIDTH,
        colors::BIRD_OUTLINE,
        BIRD_SEGMENTS,
    ));
    vertices.extend(shapes::triangle(
        Vec2::new(w, h / 2.0),
        Vec2::new(w + BEAK_LENGTH, h / 2.0 - 5.0),
        Vec2::new(w + BEAK_LENGTH, h / 2.0 + 5.0),
        colors::BIRD_BEAK,
    ));
    vertices.extend(shapes::circle(
        Vec2::new(w * 0.75, h / 3.0),
        EYE_RADIUS,
        colors::BIRD_EYE,
        12,
    ));

    shapes::rotate_about(&mut vertices, Vec2::ZERO, avatar.velocity * TILT_PER_VELOCITY);
    shapes::translate(&mut vertices, avatar.pos);
    vertices
}
