//! WebGPU rendering module
//!
//! Snapshots are tessellated on the CPU into flat-colored triangles
//! (`scene`) and drawn by a single pipeline (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;
