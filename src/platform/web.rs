//! Browser tick scheduling on top of `requestAnimationFrame`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::scheduler::{ScheduleError, TickHandle, TickScheduler};

type FrameHandler = Box<dyn FnMut(TickHandle)>;

/// Fires one tick per display refresh
pub struct AnimationFrameScheduler {
    window: web_sys::Window,
    /// Receives every fired handle; shared with the in-flight JS callbacks
    handler: Rc<RefCell<Option<FrameHandler>>>,
    next_id: u64,
    /// Last request and its browser-side id, for cancellation
    in_flight: Option<(TickHandle, i32)>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Result<Self, ScheduleError> {
        let window = web_sys::window().ok_or(ScheduleError::NoWindow)?;
        Ok(Self {
            window,
            handler: Rc::new(RefCell::new(None)),
            next_id: 0,
            in_flight: None,
        })
    }

    /// Install the receiver for fired handles (normally forwards to `GameClock::on_frame`).
    ///
    /// Must not be called from inside the handler itself.
    pub fn set_frame_handler(&self, handler: impl FnMut(TickHandle) + 'static) {
        *self.handler.borrow_mut() = Some(Box::new(handler));
    }
}

impl TickScheduler for AnimationFrameScheduler {
    fn request(&mut self) -> Result<TickHandle, ScheduleError> {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);

        let handler = Rc::clone(&self.handler);
        // Frees itself after the single call
        let callback = Closure::once_into_js(move |_time: f64| {
            if let Some(handler) = handler.borrow_mut().as_mut() {
                handler(handle);
            }
        });

        let raf_id = self
            .window
            .request_animation_frame(callback.unchecked_ref())
            .map_err(|e| ScheduleError::Request(format!("{:?}", e)))?;
        self.in_flight = Some((handle, raf_id));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some((pending, raf_id)) = self.in_flight {
            if pending == handle {
                if let Err(e) = self.window.cancel_animation_frame(raf_id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
                self.in_flight = None;
            }
        }
    }
}
