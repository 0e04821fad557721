//! WASM exports for the natural viewport
//!
//! Wraps the document's `ViewportRuntime` with a JS-friendly API. One
//! controller per hosted document.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use zos_viewport::{
    DocumentRoot, HostWindow, LayoutRect, MeasureScheduler, NaturalViewportBinding, Platform,
    Unlisten, ViewerEvent, ViewportBinding, ViewportConfig, ViewportRuntime,
};

use crate::host::{UserAgentPlatform, WebElement, WebRoot, WebWindow};
use crate::logger::init_logging;
use crate::scheduler::animation_frame_scheduler;

fn js_error(msg: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&msg.to_string())
}

fn rect_json(rect: &LayoutRect) -> Result<JsValue, JsValue> {
    serde_json::to_string(rect)
        .map(|json| JsValue::from_str(&json))
        .map_err(js_error)
}

/// Registration returned by `on_scroll`/`on_resize`
#[wasm_bindgen]
pub struct Subscription {
    unlisten: Option<Unlisten>,
}

#[wasm_bindgen]
impl Subscription {
    /// Stop calling the callback. Later calls do nothing.
    #[wasm_bindgen]
    pub fn unlisten(&mut self) {
        if let Some(unlisten) = self.unlisten.take() {
            unlisten.unlisten();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.unlisten.is_some()
    }
}

impl From<Unlisten> for Subscription {
    fn from(unlisten: Unlisten) -> Self {
        Self {
            unlisten: Some(unlisten),
        }
    }
}

fn js_callback(callback: js_sys::Function) -> Box<dyn Fn()> {
    Box::new(move || {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!(target: "viewport", "viewport callback threw: {:?}", e);
        }
    })
}

/// Natural viewport controller for the current window's document
#[wasm_bindgen]
pub struct ViewportController {
    /// `None` once disposed
    runtime: Option<ViewportRuntime>,
}

#[wasm_bindgen]
impl ViewportController {
    /// Connect a natural binding to the current window
    ///
    /// `config_json` is an optional `ViewportConfig` in JSON form. `root` is
    /// the node the document is rendered under; pass the shadow root when the
    /// document is hosted inside one. Defaults to the window's document.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        root: Option<web_sys::Node>,
    ) -> Result<ViewportController, JsValue> {
        // Set up panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        init_logging(log::LevelFilter::Info);

        let config = match config_json {
            Some(json) => ViewportConfig::from_json(&json).map_err(js_error)?,
            None => ViewportConfig::default(),
        };

        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        let platform = UserAgentPlatform::from_window(&window);
        let scheduler = animation_frame_scheduler(window.clone());
        let host = WebWindow::new(window).ok_or_else(|| js_error("window has no document"))?;
        let root = match root {
            Some(node) => WebRoot::new(node),
            None => match host.web_document().document().document_element() {
                Some(element) => WebRoot::containing(&element),
                None => return Err(js_error("document has no root element")),
            },
        };

        let binding = NaturalViewportBinding::new(
            Rc::new(host) as Rc<dyn HostWindow>,
            Rc::new(root) as Rc<dyn DocumentRoot>,
            Rc::new(platform) as Rc<dyn Platform>,
            scheduler as Rc<dyn MeasureScheduler>,
            config.clone(),
        );
        let mut runtime = ViewportRuntime::new(Box::new(binding), &config);
        runtime.start();

        Ok(Self {
            runtime: Some(runtime),
        })
    }

    fn binding(&self) -> Result<&dyn ViewportBinding, JsValue> {
        self.runtime
            .as_ref()
            .map(ViewportRuntime::binding)
            .ok_or_else(|| js_error("viewport controller disposed"))
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    #[wasm_bindgen]
    pub fn scroll_top(&self) -> Result<f64, JsValue> {
        Ok(self.binding()?.scroll_top())
    }

    #[wasm_bindgen]
    pub fn set_scroll_top(&self, scroll_top: f64) -> Result<(), JsValue> {
        self.binding()?.set_scroll_top(scroll_top);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn scroll_height(&self) -> Result<i32, JsValue> {
        Ok(self.binding()?.scroll_height())
    }

    /// Viewport size as `{"width":..,"height":..}` JSON
    #[wasm_bindgen]
    pub fn size(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.binding()?.size()).map_err(js_error)
    }

    /// Page-relative rect of `element` as JSON
    #[wasm_bindgen]
    pub fn layout_rect(&self, element: web_sys::Element) -> Result<JsValue, JsValue> {
        let rect = self
            .binding()?
            .layout_rect(&WebElement::handle(element), None, None);
        rect_json(&rect)
    }

    /// Promise resolving to the rect JSON on the next animation frame
    #[wasm_bindgen]
    pub fn layout_rect_async(&self, element: web_sys::Element) -> Result<js_sys::Promise, JsValue> {
        let pending = self
            .binding()?
            .layout_rect_async(&WebElement::handle(element), None, None);
        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let rect = pending.await.map_err(js_error)?;
            rect_json(&rect)
        }))
    }

    // =========================================================================
    // Events and chrome
    // =========================================================================

    /// Call `callback` on every scroll of the document
    #[wasm_bindgen]
    pub fn on_scroll(&self, callback: js_sys::Function) -> Result<Subscription, JsValue> {
        Ok(self.binding()?.on_scroll(js_callback(callback)).into())
    }

    /// Call `callback` on every resize of the window
    #[wasm_bindgen]
    pub fn on_resize(&self, callback: js_sys::Function) -> Result<Subscription, JsValue> {
        Ok(self.binding()?.on_resize(js_callback(callback)).into())
    }

    /// Apply a viewer chrome message
    ///
    /// Returns a promise for lightbox changes, `undefined` otherwise.
    #[wasm_bindgen]
    pub fn handle_viewer_message(&mut self, json: &str) -> Result<Option<js_sys::Promise>, JsValue> {
        let event = ViewerEvent::from_json(json).map_err(js_error)?;
        let runtime = self
            .runtime
            .as_mut()
            .ok_or_else(|| js_error("viewport controller disposed"))?;
        Ok(runtime.apply_viewer_event(event).map(|done| {
            wasm_bindgen_futures::future_to_promise(async move {
                done.await.map_err(js_error)?;
                Ok(JsValue::UNDEFINED)
            })
        }))
    }

    /// Disconnect from the window. Further calls fail.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown();
        }
    }
}
