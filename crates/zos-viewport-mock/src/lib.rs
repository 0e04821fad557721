//! In-memory host for testing Zero OS viewport bindings
//!
//! Provides a mock window, document, elements, document root and platform
//! that implement the `zos-viewport` host traits, so bindings can be driven
//! without a browser. Every property is settable and every mutation the
//! binding performs is recorded for inspection.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use zos_viewport::{
    BatchScheduler, ClientRect, DocumentRoot, ElementRef, HostDocument, HostElement, HostEvent,
    HostWindow, ListenerId, MeasureScheduler, NaturalViewportBinding, Platform, ViewportConfig,
};

// =============================================================================
// Element
// =============================================================================

/// Mock DOM element
pub struct MockElement {
    name: String,
    scroll_top: Cell<f64>,
    scroll_width: Cell<i32>,
    scroll_height: Cell<i32>,
    client_width: Cell<i32>,
    client_height: Cell<i32>,
    offset_top: Cell<i32>,
    rect: Cell<ClientRect>,
    styles: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    /// Number of `set_style` calls
    style_writes: Cell<usize>,
    /// Number of `bounding_client_rect` calls
    rect_reads: Cell<usize>,
}

impl MockElement {
    /// Create an element with all metrics zeroed
    pub fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: String::from(name),
            scroll_top: Cell::new(0.0),
            scroll_width: Cell::new(0),
            scroll_height: Cell::new(0),
            client_width: Cell::new(0),
            client_height: Cell::new(0),
            offset_top: Cell::new(0),
            rect: Cell::new(ClientRect::default()),
            styles: RefCell::new(BTreeMap::new()),
            classes: RefCell::new(Vec::new()),
            style_writes: Cell::new(0),
            rect_reads: Cell::new(0),
        })
    }

    /// Create an element reporting the given bounding client rect
    pub fn with_rect(name: &str, left: f64, top: f64, width: f64, height: f64) -> Rc<Self> {
        let el = Self::new(name);
        el.set_rect(ClientRect::new(left, top, width, height));
        el
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_rect(&self, rect: ClientRect) {
        self.rect.set(rect);
    }

    pub fn set_scroll_size(&self, width: i32, height: i32) {
        self.scroll_width.set(width);
        self.scroll_height.set(height);
    }

    pub fn set_client_size(&self, width: i32, height: i32) {
        self.client_width.set(width);
        self.client_height.set(height);
    }

    pub fn set_offset_top(&self, offset_top: i32) {
        self.offset_top.set(offset_top);
    }

    /// Current value of an inline style property
    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub fn style_write_count(&self) -> usize {
        self.style_writes.get()
    }

    pub fn rect_read_count(&self) -> usize {
        self.rect_reads.get()
    }
}

impl HostElement for MockElement {
    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn set_scroll_top(&self, value: f64) {
        self.scroll_top.set(value);
    }

    fn scroll_width(&self) -> i32 {
        self.scroll_width.get()
    }

    fn scroll_height(&self) -> i32 {
        self.scroll_height.get()
    }

    fn client_width(&self) -> i32 {
        self.client_width.get()
    }

    fn client_height(&self) -> i32 {
        self.client_height.get()
    }

    fn offset_top(&self) -> i32 {
        self.offset_top.get()
    }

    fn bounding_client_rect(&self) -> ClientRect {
        self.rect_reads.set(self.rect_reads.get() + 1);
        self.rect.get()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.style_writes.set(self.style_writes.get() + 1);
        self.styles
            .borrow_mut()
            .insert(String::from(property), String::from(value));
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(String::from(class));
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }
}

/// Trait-object handle for a mock element, as the bindings take it
pub fn element_ref(el: &Rc<MockElement>) -> ElementRef {
    Rc::clone(el) as ElementRef
}

// =============================================================================
// Document
// =============================================================================

/// Mock document with an `<html>` element and an optional body and
/// scrolling element
pub struct MockDocument {
    document_element: Rc<MockElement>,
    body: RefCell<Option<Rc<MockElement>>>,
    scrolling_element: RefCell<Option<Rc<MockElement>>>,
}

impl MockDocument {
    /// Document from an engine without `document.scrollingElement`
    pub fn legacy() -> Rc<Self> {
        Rc::new(Self {
            document_element: MockElement::new("html"),
            body: RefCell::new(Some(MockElement::new("body"))),
            scrolling_element: RefCell::new(None),
        })
    }

    /// Document whose `scrollingElement` is the `<html>` element
    pub fn standard() -> Rc<Self> {
        let doc = Self::legacy();
        let html = Rc::clone(&doc.document_element);
        doc.set_scrolling_element(Some(html));
        doc
    }

    pub fn html(&self) -> Rc<MockElement> {
        Rc::clone(&self.document_element)
    }

    pub fn body_element(&self) -> Option<Rc<MockElement>> {
        self.body.borrow().clone()
    }

    pub fn set_body(&self, body: Option<Rc<MockElement>>) {
        *self.body.borrow_mut() = body;
    }

    pub fn set_scrolling_element(&self, el: Option<Rc<MockElement>>) {
        *self.scrolling_element.borrow_mut() = el;
    }
}

impl HostDocument for MockDocument {
    fn scrolling_element(&self) -> Option<ElementRef> {
        self.scrolling_element
            .borrow()
            .as_ref()
            .map(|el| Rc::clone(el) as ElementRef)
    }

    fn body(&self) -> Option<ElementRef> {
        self.body.borrow().as_ref().map(|el| Rc::clone(el) as ElementRef)
    }

    fn document_element(&self) -> ElementRef {
        Rc::clone(&self.document_element) as ElementRef
    }
}

// =============================================================================
// Window
// =============================================================================

struct MockListener {
    id: ListenerId,
    event: HostEvent,
    callback: Rc<dyn Fn()>,
}

/// Mock native window with simulated scroll and resize events
pub struct MockWindow {
    document: Rc<MockDocument>,
    inner_width: Cell<Option<f64>>,
    inner_height: Cell<Option<f64>>,
    page_y_offset: Cell<f64>,
    next_listener_id: Cell<ListenerId>,
    listeners: RefCell<Vec<MockListener>>,
}

impl MockWindow {
    /// Create a window around `document` with a 1024x768 inner size
    pub fn new(document: Rc<MockDocument>) -> Rc<Self> {
        Rc::new(Self {
            document,
            inner_width: Cell::new(Some(1024.0)),
            inner_height: Cell::new(Some(768.0)),
            page_y_offset: Cell::new(0.0),
            next_listener_id: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn mock_document(&self) -> Rc<MockDocument> {
        Rc::clone(&self.document)
    }

    pub fn set_inner_size(&self, width: Option<f64>, height: Option<f64>) {
        self.inner_width.set(width);
        self.inner_height.set(height);
    }

    pub fn set_page_y_offset(&self, offset: f64) {
        self.page_y_offset.set(offset);
    }

    /// Number of registered native listeners for `event`
    pub fn listener_count(&self, event: HostEvent) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.event == event)
            .count()
    }

    /// Dispatch a native scroll event
    pub fn simulate_scroll(&self) {
        self.dispatch(HostEvent::Scroll);
    }

    /// Dispatch a native resize event
    pub fn simulate_resize(&self) {
        self.dispatch(HostEvent::Resize);
    }

    fn dispatch(&self, event: HostEvent) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.event == event)
            .map(|l| Rc::clone(&l.callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl HostWindow for MockWindow {
    fn inner_width(&self) -> Option<f64> {
        self.inner_width.get()
    }

    fn inner_height(&self) -> Option<f64> {
        self.inner_height.get()
    }

    fn page_y_offset(&self) -> f64 {
        self.page_y_offset.get()
    }

    fn document(&self) -> Rc<dyn HostDocument> {
        Rc::clone(&self.document) as Rc<dyn HostDocument>
    }

    fn add_event_listener(&self, event: HostEvent, listener: Rc<dyn Fn()>) -> ListenerId {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push(MockListener {
            id,
            event,
            callback: listener,
        });
        id
    }

    fn remove_event_listener(&self, event: HostEvent, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|l| !(l.id == id && l.event == event));
    }
}

// =============================================================================
// Root and platform
// =============================================================================

/// Mock root node, optionally attached to a host element
pub struct MockRoot {
    host: RefCell<Option<Rc<MockElement>>>,
}

impl MockRoot {
    /// Root of a standalone document
    pub fn standalone() -> Rc<Self> {
        Rc::new(Self {
            host: RefCell::new(None),
        })
    }

    /// Root of a document attached under `host`
    pub fn hosted(host: Rc<MockElement>) -> Rc<Self> {
        Rc::new(Self {
            host: RefCell::new(Some(host)),
        })
    }
}

impl DocumentRoot for MockRoot {
    fn host(&self) -> Option<ElementRef> {
        self.host.borrow().as_ref().map(|el| Rc::clone(el) as ElementRef)
    }
}

/// Mock engine detection
pub struct MockPlatform {
    webkit: Cell<bool>,
}

impl MockPlatform {
    pub fn new(webkit: bool) -> Rc<Self> {
        Rc::new(Self {
            webkit: Cell::new(webkit),
        })
    }

    pub fn set_webkit(&self, webkit: bool) {
        self.webkit.set(webkit);
    }
}

impl Platform for MockPlatform {
    fn is_webkit(&self) -> bool {
        self.webkit.get()
    }
}

// =============================================================================
// Host bundle
// =============================================================================

/// Everything a natural binding needs, wired together
pub struct MockHost {
    pub window: Rc<MockWindow>,
    pub root: Rc<MockRoot>,
    pub platform: Rc<MockPlatform>,
    pub scheduler: Rc<BatchScheduler>,
}

impl MockHost {
    /// Standalone document on a non-WebKit engine with `scrollingElement`
    pub fn new() -> Self {
        Self::with_parts(MockDocument::standard(), MockRoot::standalone(), false)
    }

    pub fn with_parts(document: Rc<MockDocument>, root: Rc<MockRoot>, webkit: bool) -> Self {
        Self {
            window: MockWindow::new(document),
            root,
            platform: MockPlatform::new(webkit),
            scheduler: Rc::new(BatchScheduler::new()),
        }
    }

    pub fn document(&self) -> Rc<MockDocument> {
        self.window.mock_document()
    }

    /// `<html>` element of the mock document
    pub fn html(&self) -> Rc<MockElement> {
        self.document().html()
    }

    /// Build a natural binding over this host
    pub fn natural_binding(&self, config: ViewportConfig) -> NaturalViewportBinding {
        NaturalViewportBinding::new(
            Rc::clone(&self.window) as Rc<dyn HostWindow>,
            Rc::clone(&self.root) as Rc<dyn DocumentRoot>,
            Rc::clone(&self.platform) as Rc<dyn Platform>,
            Rc::clone(&self.scheduler) as Rc<dyn MeasureScheduler>,
            config,
        )
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_element_styles_and_classes() {
        let el = MockElement::new("div");
        el.set_style("padding-top", "10px");
        el.add_class("a");
        el.add_class("a");

        assert_eq!(el.style("padding-top").as_deref(), Some("10px"));
        assert_eq!(el.style_write_count(), 1);
        assert!(el.has_class("a"));

        el.remove_class("a");
        assert!(!el.has_class("a"));
    }

    #[test]
    fn test_mock_window_listeners() {
        let window = MockWindow::new(MockDocument::standard());
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let id = window.add_event_listener(HostEvent::Scroll, Rc::new(move || h.set(h.get() + 1)));
        assert_eq!(window.listener_count(HostEvent::Scroll), 1);
        assert_eq!(window.listener_count(HostEvent::Resize), 0);

        window.simulate_scroll();
        window.simulate_resize();
        assert_eq!(hits.get(), 1);

        window.remove_event_listener(HostEvent::Scroll, id);
        window.simulate_scroll();
        assert_eq!(hits.get(), 1);
        assert_eq!(window.listener_count(HostEvent::Scroll), 0);
    }

    #[test]
    fn test_mock_document_variants() {
        let legacy = MockDocument::legacy();
        assert!(legacy.scrolling_element().is_none());
        assert!(legacy.body().is_some());

        let standard = MockDocument::standard();
        assert!(standard.scrolling_element().is_some());
    }

    #[test]
    fn test_mock_root_host() {
        assert!(MockRoot::standalone().host().is_none());
        let host = MockElement::new("zos-doc");
        host.set_offset_top(40);
        let root = MockRoot::hosted(host);
        assert_eq!(root.host().map(|h| h.offset_top()), Some(40));
    }
}
