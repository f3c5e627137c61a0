//! Platform abstraction layer
//!
//! Handles browser/native differences for tick scheduling:
//! - `ManualScheduler`: deterministic, driven by tests and the native runner
//! - `AnimationFrameScheduler`: `requestAnimationFrame` in the browser

pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::{ManualScheduler, ScheduleError, TickHandle, TickScheduler};
#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;
