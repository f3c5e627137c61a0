//! Abstract "run the next tick later" capability

use std::collections::VecDeque;

use thiserror::Error;

/// Identifies one requested tick. Handles are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("no window to schedule animation frames on")]
    NoWindow,
    #[error("requestAnimationFrame failed: {0}")]
    Request(String),
}

/// Something that can call back into the loop once per frame.
///
/// The scheduler only hands out handles; delivering a fired handle to
/// `GameClock::on_frame` is up to the platform glue. A cancelled handle may
/// still be delivered late and must be ignored by the receiver.
pub trait TickScheduler {
    /// Ask for one more tick
    fn request(&mut self) -> Result<TickHandle, ScheduleError>;

    /// Withdraw a previously requested tick
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler that only records requests; the caller fires them by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: VecDeque<TickHandle>,
    cancelled: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest request that has not been cancelled
    pub fn next_due(&mut self) -> Option<TickHandle> {
        while let Some(handle) = self.queue.pop_front() {
            match self.cancelled.iter().position(|c| *c == handle) {
                Some(i) => {
                    self.cancelled.swap_remove(i);
                }
                None => return Some(handle),
            }
        }
        None
    }

    /// Requests still waiting to fire
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|h| !self.cancelled.contains(h))
            .count()
    }

    pub fn was_cancelled(&self, handle: TickHandle) -> bool {
        self.cancelled.contains(&handle)
    }
}

impl TickScheduler for ManualScheduler {
    fn request(&mut self) -> Result<TickHandle, ScheduleError> {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        self.queue.push_back(handle);
        Ok(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.queue.contains(&handle) && !self.cancelled.contains(&handle) {
            self.cancelled.push(handle);
        }
    }
}
