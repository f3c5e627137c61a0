//! Flappy Pipes - flap a bird through an endless stream of pipes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle field, collisions)
//! - `clock`: Frame-driven game loop and session state machine
//! - `platform`: Tick scheduling (manual for tests/native, animation frames in the browser)
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `config`: Data-driven game tuning

pub mod clock;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use clock::{ClockState, GameClock};
pub use config::{ConfigError, GameConfig};
pub use platform::{ManualScheduler, ScheduleError, TickHandle, TickScheduler};
pub use sim::{Avatar, GameState, Obstacle, ObstacleField, SessionState, Snapshot, Surface};

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Downward acceleration added to the bird's velocity every tick
    pub const GRAVITY: f32 = 0.8;
    /// Velocity set by a flap (negative = upward)
    pub const LIFT: f32 = -12.0;

    /// Bird geometry
    pub const AVATAR_X: f32 = 50.0;
    pub const AVATAR_WIDTH: f32 = 40.0;
    pub const AVATAR_HEIGHT: f32 = 30.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_GAP: f32 = 180.0;
    /// Horizontal distance a pipe travels per tick
    pub const PIPE_SPEED: f32 = 6.0;
    /// A new pipe appears every this many ticks
    pub const SPAWN_INTERVAL: u64 = 50;
    /// Shortest allowed top or bottom segment
    pub const MIN_SEGMENT: f32 = 50.0;

    /// Bird tilt per unit of vertical velocity (radians)
    pub const TILT_PER_VELOCITY: f32 = 0.05;
}
