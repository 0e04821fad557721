//! DOM implementation of the viewport host traits
//!
//! DOM calls that can throw are logged and skipped; the bindings expect an
//! infallible host.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, ShadowRoot};
use zos_viewport::{
    ClientRect, DocumentRoot, ElementRef, HostDocument, HostElement, HostEvent, HostWindow,
    ListenerId, Platform,
};

const TAG: &str = "viewport";

// =============================================================================
// Element
// =============================================================================

/// A DOM element
pub struct WebElement {
    element: Element,
}

impl WebElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Wrap `element` as the handle bindings take
    pub fn handle(element: Element) -> ElementRef {
        Rc::new(Self::new(element))
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.element.dyn_ref::<HtmlElement>()
    }
}

impl HostElement for WebElement {
    fn scroll_top(&self) -> f64 {
        f64::from(self.element.scroll_top())
    }

    fn set_scroll_top(&self, value: f64) {
        self.element.set_scroll_top(value.round() as i32);
    }

    fn scroll_width(&self) -> i32 {
        self.element.scroll_width()
    }

    fn scroll_height(&self) -> i32 {
        self.element.scroll_height()
    }

    fn client_width(&self) -> i32 {
        self.element.client_width()
    }

    fn client_height(&self) -> i32 {
        self.element.client_height()
    }

    fn offset_top(&self) -> i32 {
        self.html().map(HtmlElement::offset_top).unwrap_or(0)
    }

    fn bounding_client_rect(&self) -> ClientRect {
        let rect = self.element.get_bounding_client_rect();
        ClientRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else {
            log::warn!(target: TAG, "set_style({property}) on a non-HTML element");
            return;
        };
        if let Err(e) = html.style().set_property(property, value) {
            log::warn!(target: TAG, "set_style({property}) failed: {:?}", e);
        }
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().add_1(class) {
            log::warn!(target: TAG, "classList.add({class}) failed: {:?}", e);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().remove_1(class) {
            log::warn!(target: TAG, "classList.remove({class}) failed: {:?}", e);
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// The window's document
pub struct WebDocument {
    document: web_sys::Document,
    /// `documentElement` at construction, used if the document loses it
    root_element: Element,
}

impl WebDocument {
    /// Returns `None` for a document without a root element
    pub fn new(document: web_sys::Document) -> Option<Self> {
        let root_element = document.document_element()?;
        Some(Self {
            document,
            root_element,
        })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl HostDocument for WebDocument {
    fn scrolling_element(&self) -> Option<ElementRef> {
        self.document.scrolling_element().map(WebElement::handle)
    }

    fn body(&self) -> Option<ElementRef> {
        self.document
            .body()
            .map(|body| WebElement::handle(body.into()))
    }

    fn document_element(&self) -> ElementRef {
        let element = self
            .document
            .document_element()
            .unwrap_or_else(|| self.root_element.clone());
        WebElement::handle(element)
    }
}

// =============================================================================
// Window
// =============================================================================

/// The native window, with listener bookkeeping
pub struct WebWindow {
    window: web_sys::Window,
    document: Rc<WebDocument>,
    next_listener_id: Cell<ListenerId>,
    /// Closures must be kept alive while registered
    listeners: RefCell<HashMap<ListenerId, Closure<dyn Fn()>>>,
}

impl WebWindow {
    /// Returns `None` when the window has no usable document
    pub fn new(window: web_sys::Window) -> Option<Self> {
        let document = WebDocument::new(window.document()?)?;
        Some(Self {
            window,
            document: Rc::new(document),
            next_listener_id: Cell::new(1),
            listeners: RefCell::new(HashMap::new()),
        })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    pub fn web_document(&self) -> &Rc<WebDocument> {
        &self.document
    }
}

impl HostWindow for WebWindow {
    fn inner_width(&self) -> Option<f64> {
        self.window.inner_width().ok().and_then(|v| v.as_f64())
    }

    fn inner_height(&self) -> Option<f64> {
        self.window.inner_height().ok().and_then(|v| v.as_f64())
    }

    fn page_y_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn document(&self) -> Rc<dyn HostDocument> {
        Rc::clone(&self.document) as Rc<dyn HostDocument>
    }

    fn add_event_listener(&self, event: HostEvent, listener: Rc<dyn Fn()>) -> ListenerId {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);

        let closure = Closure::wrap(Box::new(move || listener()) as Box<dyn Fn()>);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(event.name(), closure.as_ref().unchecked_ref())
        {
            log::warn!(target: TAG, "addEventListener({}) failed: {:?}", event.name(), e);
        }
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_event_listener(&self, event: HostEvent, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(event.name(), closure.as_ref().unchecked_ref())
        {
            log::warn!(target: TAG, "removeEventListener({}) failed: {:?}", event.name(), e);
        }
    }
}

// =============================================================================
// Root node
// =============================================================================

/// Root node of a hosted document: the document itself or a shadow root
pub struct WebRoot {
    node: Node,
}

impl WebRoot {
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// Root of the tree `element` lives in
    pub fn containing(element: &Element) -> Self {
        Self::new(element.get_root_node())
    }
}

impl DocumentRoot for WebRoot {
    fn host(&self) -> Option<ElementRef> {
        self.node
            .dyn_ref::<ShadowRoot>()
            .map(|shadow| WebElement::handle(shadow.host()))
    }
}

// =============================================================================
// Platform
// =============================================================================

/// Engine detection from the user agent string
pub struct UserAgentPlatform {
    webkit: bool,
}

impl UserAgentPlatform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        // Legacy Edge advertises WebKit in its user agent.
        let user_agent = user_agent.to_ascii_lowercase();
        let webkit = user_agent.contains("webkit") && !user_agent.contains("edge/");
        Self { webkit }
    }

    pub fn from_window(window: &web_sys::Window) -> Self {
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        Self::from_user_agent(&user_agent)
    }
}

impl Platform for UserAgentPlatform {
    fn is_webkit(&self) -> bool {
        self.webkit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_safari_is_webkit() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 \
                  (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";
        assert!(UserAgentPlatform::from_user_agent(ua).is_webkit());
    }

    #[test]
    fn test_user_agent_firefox_not_webkit() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";
        assert!(!UserAgentPlatform::from_user_agent(ua).is_webkit());
    }

    #[test]
    fn test_user_agent_legacy_edge_not_webkit() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/64.0.3282.140 Safari/537.36 Edge/18.17763";
        assert!(!UserAgentPlatform::from_user_agent(ua).is_webkit());
    }

    #[test]
    fn test_user_agent_edge_match_ignores_case() {
        let ua = "mozilla/5.0 (windows nt 10.0) applewebkit/537.36 (khtml, like gecko) \
                  chrome/64.0 safari/537.36 EDGE/18.17763";
        assert!(!UserAgentPlatform::from_user_agent(ua).is_webkit());
    }

    #[test]
    fn test_user_agent_chromium_edge_is_webkit() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
        assert!(UserAgentPlatform::from_user_agent(ua).is_webkit());
    }
}
