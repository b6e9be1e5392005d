use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spacebg_core::{LoopError, LoopGuard};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// `requestAnimationFrame` loop with a deterministic stop.
///
/// The scheduled callback only holds a `Weak` to the loop state, so dropping
/// the `FrameLoop` releases the callback, the tick closure and everything it
/// captured.
pub struct FrameLoop {
    inner: Rc<LoopInner>,
}

struct LoopInner {
    guard: RefCell<LoopGuard>,
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    /// Runs once per frame; returning false stops the loop.
    tick: RefCell<Box<dyn FnMut() -> bool>>,
}

impl FrameLoop {
    pub fn new(tick: impl FnMut() -> bool + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            guard: RefCell::new(LoopGuard::new()),
            request_id: Cell::new(None),
            callback: RefCell::new(None),
            tick: RefCell::new(Box::new(tick)),
        });

        let weak = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame();
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.callback.borrow_mut() = Some(callback);

        Self { inner }
    }

    pub fn start(&self) -> Result<(), LoopError> {
        let starts = {
            let mut guard = self.inner.guard.borrow_mut();
            guard.try_start()?;
            guard.starts()
        };
        log::info!("Frame loop started (start #{starts})");
        self.inner.schedule();
        Ok(())
    }

    /// Cancel the pending frame. Returns whether the loop was running.
    pub fn stop(&self) -> bool {
        self.inner.stop()
    }

    pub fn is_running(&self) -> bool {
        self.inner.guard.borrow().is_running()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

impl LoopInner {
    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping frame loop");
            self.guard.borrow_mut().stop();
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.request_id.set(Some(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                self.guard.borrow_mut().stop();
            }
        }
    }

    fn on_frame(&self) {
        self.request_id.set(None);
        if !self.guard.borrow().is_running() {
            return;
        }

        let keep_going = (self.tick.borrow_mut())();

        if keep_going && self.guard.borrow().is_running() {
            self.schedule();
        } else {
            self.stop();
        }
    }

    fn stop(&self) -> bool {
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        let was_running = self.guard.borrow_mut().stop();
        if was_running {
            log::info!("Frame loop stopped");
        }
        was_running
    }
}
