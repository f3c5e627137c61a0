//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per call)
//! - Injected, seedable RNG only
//! - No rendering, scheduling or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{collides, first_collision};
pub use obstacles::{ObstacleField, pipe_segments};
pub use physics::{flap, integrate};
pub use state::{Avatar, GameState, Obstacle, SessionState, Snapshot, Surface};
pub use tick::{TickInput, TickOutcome, tick};
