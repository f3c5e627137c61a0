//! Obstacle field: spawns pipes on a fixed cadence, scrolls them left and
//! retires them once they leave the surface.
//!
//! Pipes are kept in creation order. Every pipe moves at the same speed, so
//! creation order is also left-to-right order and the oldest pipe is always
//! the first to leave: retirement only ever pops from the front.

use std::collections::VecDeque;

use rand::Rng;

use super::state::{Obstacle, Surface};
use crate::config::GameConfig;

/// Ordered pipe sequence plus the random source for pipe heights
#[derive(Debug, Clone)]
pub struct ObstacleField<R> {
    obstacles: VecDeque<Obstacle>,
    rng: R,
}

impl<R> ObstacleField<R> {
    pub fn new(rng: R) -> Self {
        Self {
            obstacles: VecDeque::new(),
            rng,
        }
    }

    /// Live pipes, oldest (leftmost) first
    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        &self.obstacles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop every pipe (session reset)
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Move every pipe left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for pipe in &mut self.obstacles {
            pipe.x -= speed;
        }
    }

    /// Pop pipes off the front while they are fully past the left edge.
    /// Returns how many were removed.
    pub fn retire(&mut self) -> usize {
        let mut removed = 0;
        while self.obstacles.front().is_some_and(Obstacle::is_offscreen) {
            self.obstacles.pop_front();
            removed += 1;
        }
        if removed > 0 {
            log::debug!("Retired {} pipe(s), {} live", removed, self.obstacles.len());
        }
        removed
    }
}

impl<R: Rng> ObstacleField<R> {
    /// One simulation step: spawn on cadence, scroll, retire
    pub fn tick(&mut self, config: &GameConfig, surface: Surface, frame: u64) {
        if frame % config.spawn_interval == 0 {
            self.spawn(config, surface);
        }
        self.advance(config.pipe_speed);
        self.retire();
    }

    /// Append a new pipe at the right edge of the surface
    pub fn spawn(&mut self, config: &GameConfig, surface: Surface) -> &Obstacle {
        let (top, bottom) = pipe_segments(&mut self.rng, config, surface.height);
        self.obstacles.push_back(Obstacle {
            x: surface.width,
            top,
            bottom,
            width: config.pipe_width,
        });
        log::debug!(
            "Spawned pipe top={:.1} bottom={:.1} at x={}",
            top,
            bottom,
            surface.width
        );
        &self.obstacles[self.obstacles.len() - 1]
    }
}

/// Pick the (top, bottom) segment heights for a new pipe.
///
/// `top` is uniform in `[min_segment, H - gap - min_segment]`. When the
/// surface is too short for that range the pipe is split evenly around the
/// gap instead and no segment goes below zero.
pub fn pipe_segments<R: Rng>(rng: &mut R, config: &GameConfig, surface_height: f32) -> (f32, f32) {
    let gap = config.pipe_gap;
    let lo = config.min_segment;
    let hi = surface_height - gap - config.min_segment;

    let top = if hi >= lo {
        rng.random_range(lo..=hi).clamp(lo, hi)
    } else {
        log::warn!(
            "Surface height {} too short for gap {} with {} segments; clamping pipe",
            surface_height,
            gap,
            lo
        );
        ((surface_height - gap) / 2.0).max(0.0)
    };
    let bottom = (surface_height - top - gap).max(0.0);
    (top, bottom)
}
