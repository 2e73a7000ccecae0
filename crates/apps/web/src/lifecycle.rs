//! Frame loop and DOM listener ownership shared by the background handles.
//!
//! Both types release everything they registered when stopped or dropped, so
//! a handle can be started and stopped any number of times without leaking
//! callbacks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

/// `requestAnimationFrame` loop that reschedules itself until stopped.
#[derive(Default)]
pub(crate) struct AnimationLoop {
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    pub(crate) fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// No-op when already running.
    pub(crate) fn start(&self, mut on_frame: impl FnMut() + 'static) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }
        let pending = self.pending.clone();
        // The closure holds a handle to itself to reschedule; `stop` breaks the cycle.
        let this = self.callback.clone();
        *self.callback.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
            on_frame();
            let next = this.borrow().as_ref().and_then(request_frame);
            pending.set(next);
        }));

        let first = self.callback.borrow().as_ref().and_then(request_frame);
        if first.is_none() {
            self.callback.borrow_mut().take();
            return Err(JsValue::from_str("requestAnimationFrame unavailable"));
        }
        self.pending.set(first);
        Ok(())
    }

    /// Cancels the pending frame. No-op when stopped.
    pub(crate) fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// An event listener that unregisters itself on drop.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
pub(crate) struct Listeners {
    active: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub(crate) fn push(&mut self, listener: Listener) {
        self.active.push(listener);
    }

    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }
}
