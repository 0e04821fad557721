//! Animation-frame measure scheduler
//!
//! Wraps a [`BatchScheduler`] so that queuing the first task after a flush
//! requests an animation frame, and that frame flushes the batch.

use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use zos_viewport::BatchScheduler;

/// Create a scheduler flushed once per animation frame of `window`
pub fn animation_frame_scheduler(window: web_sys::Window) -> Rc<BatchScheduler> {
    Rc::new_cyclic(|weak: &Weak<BatchScheduler>| {
        let weak = weak.clone();
        BatchScheduler::with_wakeup(move || request_flush(&window, weak.clone()))
    })
}

fn request_flush(window: &web_sys::Window, batch: Weak<BatchScheduler>) {
    let callback = Closure::once_into_js(move || {
        if let Some(batch) = batch.upgrade() {
            batch.flush();
        }
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::warn!(target: "viewport", "requestAnimationFrame failed: {:?}", e);
    }
}
