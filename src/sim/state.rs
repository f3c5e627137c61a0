//! Game state and core simulation types
//!
//! One `GameState` is one explicit session object owned by its caller.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use crate::config::GameConfig;

/// Whether the current session is still in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    /// A pipe was hit; nothing moves until an explicit reset
    Over,
}

/// Drawing surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; x never changes during a session
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity in pixels per tick (positive = down)
    pub velocity: f32,
    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity set by a flap
    pub lift: f32,
}

impl Avatar {
    /// Fresh bird for a new session, vertically centered on the surface
    pub fn spawn(config: &GameConfig, surface: Surface) -> Self {
        Self {
            pos: Vec2::new(config.avatar_x, surface.height / 2.0),
            width: config.avatar_width,
            height: config.avatar_height,
            velocity: 0.0,
            gravity: config.gravity,
            lift: config.lift,
        }
    }

    /// Lowest allowed y (top edge) for a surface of this height
    #[inline]
    pub fn max_y(&self, surface_height: f32) -> f32 {
        (surface_height - self.height).max(0.0)
    }
}

/// A pipe pair: top segment hanging from y=0, bottom segment standing on y=H
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top segment
    pub top: f32,
    /// Height of the bottom segment
    pub bottom: f32,
    pub width: f32,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical opening between the segments on a surface of this height
    #[inline]
    pub fn gap(&self, surface_height: f32) -> f32 {
        surface_height - self.top - self.bottom
    }

    /// Entirely past the left edge of the surface
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Borrowed per-frame view handed to render and game-over callbacks
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub avatar: &'a Avatar,
    /// Oldest (leftmost) first
    pub obstacles: &'a VecDeque<Obstacle>,
    pub session: SessionState,
    pub surface: Surface,
    /// Ticks survived this session
    pub frame: u64,
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: GameConfig,
    pub surface: Surface,
    pub avatar: Avatar,
    pub field: ObstacleField<R>,
    /// Simulation tick counter; drives the spawn cadence
    pub frame: u64,
    pub session: SessionState,
}

impl GameState<Pcg32> {
    /// Create a new session with a seeded pipe generator
    pub fn new(config: GameConfig, surface: Surface, seed: u64) -> Self {
        Self::with_rng(config, surface, Pcg32::seed_from_u64(seed))
    }
}

impl<R> GameState<R> {
    /// Create a new session drawing pipe heights from `rng`
    pub fn with_rng(config: GameConfig, surface: Surface, rng: R) -> Self {
        Self {
            avatar: Avatar::spawn(&config, surface),
            field: ObstacleField::new(rng),
            frame: 0,
            session: SessionState::Running,
            config,
            surface,
        }
    }

    /// Back to the initial bird and an empty field.
    ///
    /// The RNG keeps its position so each session gets a new pipe layout.
    pub fn reset(&mut self) {
        self.avatar = Avatar::spawn(&self.config, self.surface);
        self.field.clear();
        self.frame = 0;
        self.session = SessionState::Running;
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            avatar: &self.avatar,
            obstacles: self.field.obstacles(),
            session: self.session,
            surface: self.surface,
            frame: self.frame,
        }
    }
}
