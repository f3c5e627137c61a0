//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in surface pixels
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);

    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a rectangle outline centered on the rectangle's edges
pub fn rect_outline(origin: Vec2, size: Vec2, line_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let half = line_width / 2.0;
    let outer = origin - Vec2::splat(half);
    let outer_size = size + Vec2::splat(line_width);

    let mut vertices = Vec::with_capacity(24);
    // Top and bottom bands span the full outer width
    vertices.extend(rect(outer, Vec2::new(outer_size.x, line_width), color));
    vertices.extend(rect(
        Vec2::new(outer.x, origin.y + size.y - half),
        Vec2::new(outer_size.x, line_width),
        color,
    ));
    // Left and right bands fill between them
    let inner_height = outer_size.y - 2.0 * line_width;
    vertices.extend(rect(
        Vec2::new(outer.x, outer.y + line_width),
        Vec2::new(line_width, inner_height),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x + size.x - half, outer.y + line_width),
        Vec2::new(line_width, inner_height),
        color,
    ));
    vertices
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for an elliptical ring of constant `line_width`
pub fn ellipse_outline(
    center: Vec2,
    radii: Vec2,
    line_width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let half = line_width / 2.0;
    let inner_radii = (radii - Vec2::splat(half)).max(Vec2::ZERO);
    let outer_radii = radii + Vec2::splat(half);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + inner_radii * dir1;
        let outer1 = center + outer_radii * dir1;
        let inner2 = center + inner_radii * dir2;
        let outer2 = center + outer_radii * dir2;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Rotate vertices in place by `angle` radians about `pivot`
/// (positive = clockwise on screen, since y points down)
pub fn rotate_about(vertices: &mut [Vertex], pivot: Vec2, angle: f32) {
    if angle == 0.0 {
        return;
    }
    let rotation = Vec2::from_angle(angle);
    for v in vertices {
        let p = Vec2::from(v.position) - pivot;
        let rotated = pivot + rotation.rotate(p);
        v.position = rotated.into();
    }
}

/// Offset vertices in place
pub fn translate(vertices: &mut [Vertex], offset: Vec2) {
    for v in vertices {
        v.position = (Vec2::from(v.position) + offset).into();
    }
}
