//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Flat-colored 2D vertex; position is in surface pixels until upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same vertex moved to another position
    pub const fn with_position(self, x: f32, y: f32) -> Self {
        Self::new(x, y, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const BIRD_BODY: [f32; 4] = [1.0, 0.843, 0.0, 1.0]; // Gold
    pub const BIRD_OUTLINE: [f32; 4] = [0.855, 0.647, 0.125, 1.0]; // Goldenrod
    pub const BIRD_BEAK: [f32; 4] = [1.0, 0.647, 0.0, 1.0]; // Orange
    pub const BIRD_EYE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PIPE_FILL: [f32; 4] = [0.0, 0.502, 0.0, 1.0];
    pub const PIPE_OUTLINE: [f32; 4] = [0.0, 0.392, 0.0, 1.0];
}
