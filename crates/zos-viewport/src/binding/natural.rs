//! Natural viewport binding
//!
//! Backed directly by the native window: its scroll and resize events are
//! the document's events and `getBoundingClientRect`-style measurement is
//! accurate. Applies to a standalone document or an iframe with a fixed
//! size.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ViewportConfig;
use crate::error::ViewportError;
use crate::host::{DocumentRoot, ElementRef, HostEvent, HostWindow, ListenerId, Platform};
use crate::math::{LayoutRect, Size};
use crate::measure::{measure_promise, MeasureScheduler, Measurement};
use crate::observable::{Observable, Unlisten};

use super::{DocumentView, Lifecycle, LifecycleState, ViewportBinding};

const TAG: &str = "viewport";

/// Binding over the document's own native scrolling viewport
pub struct NaturalViewportBinding {
    view: DocumentView,
    scheduler: Rc<dyn MeasureScheduler>,
    config: ViewportConfig,
    lifecycle: Lifecycle,
    scroll_observable: Observable,
    resize_observable: Observable,
    /// Native listeners registered by `connect`
    listeners: RefCell<Vec<(HostEvent, ListenerId)>>,
}

impl NaturalViewportBinding {
    pub fn new(
        window: Rc<dyn HostWindow>,
        root: Rc<dyn DocumentRoot>,
        platform: Rc<dyn Platform>,
        scheduler: Rc<dyn MeasureScheduler>,
        config: ViewportConfig,
    ) -> Self {
        log::debug!(target: TAG, "initialized natural viewport");
        Self {
            view: DocumentView::new(window, root, platform),
            scheduler,
            config,
            lifecycle: Lifecycle::new(),
            scroll_observable: Observable::new(),
            resize_observable: Observable::new(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    #[inline]
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Document reads backing this binding
    #[inline]
    pub fn view(&self) -> &DocumentView {
        &self.view
    }

    /// Subscribers of `on_scroll`
    #[inline]
    pub fn scroll_observable(&self) -> &Observable {
        &self.scroll_observable
    }

    /// Subscribers of `on_resize`
    #[inline]
    pub fn resize_observable(&self) -> &Observable {
        &self.resize_observable
    }

    /// Element currently holding the document's scroll offset
    pub fn scrolling_element(&self) -> ElementRef {
        self.view.scrolling_element()
    }

    fn listen(&self, event: HostEvent, observable: &Observable) {
        let observable = observable.clone();
        let id = self
            .view
            .window()
            .add_event_listener(event, Rc::new(move || observable.fire(&())));
        self.listeners.borrow_mut().push((event, id));
    }

    /// Caller broke the connect/disconnect ordering
    fn contract_violation(&self, err: ViewportError) {
        if self.config.strict_lifecycle {
            panic!("viewport binding misuse: {err}");
        }
        log::warn!(target: TAG, "ignoring call: {err}");
    }
}

impl ViewportBinding for NaturalViewportBinding {
    fn connect(&self) {
        if let Err(err) = self.lifecycle.connect() {
            self.contract_violation(err);
            return;
        }
        self.listen(HostEvent::Scroll, &self.scroll_observable);
        self.listen(HostEvent::Resize, &self.resize_observable);
        log::debug!(target: TAG, "natural viewport connected");
    }

    fn disconnect(&self) {
        if let Err(err) = self.lifecycle.disconnect() {
            self.contract_violation(err);
            return;
        }
        let window = self.view.window();
        for (event, id) in self.listeners.borrow_mut().drain(..) {
            window.remove_event_listener(event, id);
        }
        log::debug!(target: TAG, "natural viewport disconnected");
    }

    fn ensure_ready_for_elements(&self) {}

    fn border_top(&self) -> i32 {
        0
    }

    fn requires_fixed_layer_transfer(&self) -> bool {
        false
    }

    fn on_scroll(&self, handler: Box<dyn Fn()>) -> Unlisten {
        self.scroll_observable.add(move |_| handler())
    }

    fn on_resize(&self, handler: Box<dyn Fn()>) -> Unlisten {
        self.resize_observable.add(move |_| handler())
    }

    fn update_padding_top(&self, padding_top: i32) {
        self.view
            .root_element()
            .set_style("padding-top", &format!("{padding_top}px"));
    }

    fn hide_viewer_header(&self, transient: bool, _last_padding_top: i32) {
        if !transient {
            self.update_padding_top(0);
        }
    }

    fn show_viewer_header(&self, transient: bool, padding_top: i32) {
        if !transient {
            self.update_padding_top(padding_top);
        }
    }

    fn disable_scroll(&self) {
        self.view
            .root_element()
            .add_class(&self.config.scroll_disabled_class);
    }

    fn reset_scroll(&self) {
        self.view
            .root_element()
            .remove_class(&self.config.scroll_disabled_class);
    }

    fn update_lightbox_mode(&self, _lightbox: bool) -> Measurement<()> {
        // Native measurements stay accurate in lightbox mode.
        Measurement::ready(())
    }

    fn size(&self) -> Size {
        self.view.size()
    }

    fn scroll_top(&self) -> f64 {
        self.view.scroll_top()
    }

    fn scroll_left(&self) -> f64 {
        self.view.scroll_left()
    }

    fn scroll_width(&self) -> i32 {
        self.view.scroll_width()
    }

    fn scroll_height(&self) -> i32 {
        self.view.scroll_height()
    }

    fn layout_rect(
        &self,
        element: &ElementRef,
        scroll_left: Option<f64>,
        scroll_top: Option<f64>,
    ) -> LayoutRect {
        self.view.layout_rect(element, scroll_left, scroll_top)
    }

    fn layout_rect_async(
        &self,
        element: &ElementRef,
        scroll_left: Option<f64>,
        scroll_top: Option<f64>,
    ) -> Measurement<LayoutRect> {
        let view = self.view.clone();
        let element = Rc::clone(element);
        measure_promise(self.scheduler.as_ref(), move || {
            view.layout_rect(&element, scroll_left, scroll_top)
        })
    }

    fn set_scroll_top(&self, scroll_top: f64) {
        self.view.set_scroll_top(scroll_top);
    }
}
