//! Host surface consumed by the bindings
//!
//! These traits describe the slice of the browser a binding touches: the
//! window, its document, individual elements, the hosted document's root
//! node and engine detection. The browser implementation lives in
//! `zos-viewport-web`; tests use `zos-viewport-mock`.
//!
//! # Platform Variance
//!
//! Nothing here returns an error. Properties that some engines fail to
//! report are `Option`s, and the bindings degrade to documented fallbacks.

use std::rc::Rc;

use crate::math::ClientRect;

/// Shared handle to a host element
pub type ElementRef = Rc<dyn HostElement>;

/// Identifies a native listener registered on a [`HostWindow`]
pub type ListenerId = u64;

/// Native window events the bindings listen to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Scroll,
    Resize,
}

impl HostEvent {
    /// DOM event name
    pub const fn name(self) -> &'static str {
        match self {
            HostEvent::Scroll => "scroll",
            HostEvent::Resize => "resize",
        }
    }
}

/// A DOM element
///
/// Reads may force a synchronous style/layout recalculation in the host.
pub trait HostElement {
    fn scroll_top(&self) -> f64;

    fn set_scroll_top(&self, value: f64);

    fn scroll_width(&self) -> i32;

    fn scroll_height(&self) -> i32;

    fn client_width(&self) -> i32;

    fn client_height(&self) -> i32;

    /// Offset from the top of the offset parent
    fn offset_top(&self) -> i32;

    /// Viewport-relative, sub-pixel rectangle
    fn bounding_client_rect(&self) -> ClientRect;

    /// Set an inline style property, using the CSS property name
    /// (`padding-top`, not `paddingTop`)
    fn set_style(&self, property: &str, value: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);
}

/// The window's document
pub trait HostDocument {
    /// `document.scrollingElement`, when the engine exposes it
    fn scrolling_element(&self) -> Option<ElementRef>;

    fn body(&self) -> Option<ElementRef>;

    /// The `<html>` element
    fn document_element(&self) -> ElementRef;
}

/// The native window a hosted document renders into
pub trait HostWindow {
    /// `window.innerWidth`; `None` when the engine does not report it
    fn inner_width(&self) -> Option<f64>;

    /// `window.innerHeight`; `None` when the engine does not report it
    fn inner_height(&self) -> Option<f64>;

    fn page_y_offset(&self) -> f64;

    fn document(&self) -> Rc<dyn HostDocument>;

    /// Register a native listener
    fn add_event_listener(&self, event: HostEvent, listener: Rc<dyn Fn()>) -> ListenerId;

    /// Remove a listener previously returned by `add_event_listener`
    fn remove_event_listener(&self, event: HostEvent, id: ListenerId);
}

/// Root node of the hosted document
///
/// For a standalone page this is the document itself and has no host. When
/// the document is attached inside a shadow root, the host is the element
/// the shadow root hangs off.
pub trait DocumentRoot {
    fn host(&self) -> Option<ElementRef>;
}

/// Engine-family detection
pub trait Platform {
    /// WebKit-class engine (Safari, iOS web views)
    fn is_webkit(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_event_names() {
        assert_eq!(HostEvent::Scroll.name(), "scroll");
        assert_eq!(HostEvent::Resize.name(), "resize");
    }
}
