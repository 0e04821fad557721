//! Per-document viewport runtime
//!
//! Owns the document's single binding, drives its lifecycle and applies
//! viewer chrome changes to it. Each hosted document gets its own runtime;
//! nothing here is global.

use crate::binding::ViewportBinding;
use crate::config::ViewportConfig;
use crate::measure::Measurement;
use crate::viewer::ViewerEvent;

const TAG: &str = "viewport";

pub struct ViewportRuntime {
    binding: Box<dyn ViewportBinding>,
    padding_top: i32,
    last_padding_top: i32,
    lightbox: bool,
}

impl ViewportRuntime {
    /// Take ownership of `binding`. Nothing is attached until `start`.
    pub fn new(binding: Box<dyn ViewportBinding>, config: &ViewportConfig) -> Self {
        Self {
            binding,
            padding_top: config.initial_padding_top,
            last_padding_top: 0,
            lightbox: false,
        }
    }

    /// Connect the binding and reserve the initial chrome padding
    pub fn start(&mut self) {
        self.binding.connect();
        self.binding.ensure_ready_for_elements();
        self.binding.update_padding_top(self.padding_top);
        log::debug!(target: TAG, "runtime started, paddingTop={}", self.padding_top);
    }

    /// Apply a viewer chrome change
    ///
    /// Returns the binding's completion signal when the change affects
    /// lightbox mode.
    pub fn apply_viewer_event(&mut self, event: ViewerEvent) -> Option<Measurement<()>> {
        match event {
            ViewerEvent::Viewport {
                padding_top,
                transient,
            } => {
                self.update_padding(padding_top, transient);
                None
            }
            ViewerEvent::Lightbox { enabled } => self.update_lightbox(enabled),
        }
    }

    fn update_padding(&mut self, padding_top: i32, transient: bool) {
        if padding_top == self.padding_top {
            return;
        }
        self.last_padding_top = self.padding_top;
        self.padding_top = padding_top;
        if self.padding_top < self.last_padding_top {
            self.binding
                .hide_viewer_header(transient, self.last_padding_top);
        } else {
            self.binding.show_viewer_header(transient, self.padding_top);
        }
    }

    fn update_lightbox(&mut self, enabled: bool) -> Option<Measurement<()>> {
        if enabled == self.lightbox {
            return None;
        }
        self.lightbox = enabled;
        if enabled {
            self.binding.disable_scroll();
        } else {
            self.binding.reset_scroll();
        }
        log::debug!(target: TAG, "lightbox mode {}", if enabled { "on" } else { "off" });
        Some(self.binding.update_lightbox_mode(enabled))
    }

    /// Disconnect the binding. The runtime cannot be restarted.
    pub fn shutdown(self) {
        self.binding.disconnect();
    }

    #[inline]
    pub fn binding(&self) -> &dyn ViewportBinding {
        self.binding.as_ref()
    }

    /// Current chrome padding
    #[inline]
    pub fn padding_top(&self) -> i32 {
        self.padding_top
    }

    /// Chrome padding before the last change
    #[inline]
    pub fn last_padding_top(&self) -> i32 {
        self.last_padding_top
    }

    #[inline]
    pub fn is_lightbox(&self) -> bool {
        self.lightbox
    }
}
