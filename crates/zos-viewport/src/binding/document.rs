//! Native-window view of a hosted document
//!
//! Holds the reads the natural binding performs. It is cheap to clone so a
//! deferred measurement can carry its own copy into the scheduler.

use std::rc::Rc;

use crate::host::{DocumentRoot, ElementRef, HostWindow, Platform};
use crate::math::{LayoutRect, Size};

#[derive(Clone)]
pub struct DocumentView {
    window: Rc<dyn HostWindow>,
    root: Rc<dyn DocumentRoot>,
    platform: Rc<dyn Platform>,
}

impl DocumentView {
    pub fn new(
        window: Rc<dyn HostWindow>,
        root: Rc<dyn DocumentRoot>,
        platform: Rc<dyn Platform>,
    ) -> Self {
        Self {
            window,
            root,
            platform,
        }
    }

    #[inline]
    pub fn window(&self) -> &Rc<dyn HostWindow> {
        &self.window
    }

    /// The `<html>` element
    pub fn root_element(&self) -> ElementRef {
        self.window.document().document_element()
    }

    /// Element whose scroll offset is the document's scroll position
    ///
    /// Resolved on every call: the standard accessor when present, `body`
    /// on WebKit-class engines, the root element otherwise.
    pub fn scrolling_element(&self) -> ElementRef {
        let doc = self.window.document();
        if let Some(el) = doc.scrolling_element() {
            return el;
        }
        // Older WebKit scrolls `body`, not `documentElement`
        // (https://bugs.webkit.org/show_bug.cgi?id=106133).
        if let Some(body) = doc.body() {
            if self.platform.is_webkit() {
                return body;
            }
        }
        doc.document_element()
    }

    /// Inner window size, or the root element's client size when the window
    /// does not report a usable one
    pub fn size(&self) -> Size {
        // clientHeight on the root element is wrong on iOS Safari, so the
        // window's inner size wins whenever it exists.
        match (
            truthy(self.window.inner_width()),
            truthy(self.window.inner_height()),
        ) {
            (Some(width), Some(height)) => Size::new(width as i32, height as i32),
            _ => {
                let el = self.root_element();
                Size::new(el.client_width(), el.client_height())
            }
        }
    }

    /// Vertical scroll relative to the hosted document
    pub fn scroll_top(&self) -> f64 {
        let element_top = self.scrolling_element().scroll_top();
        let page_scroll_top = if element_top != 0.0 {
            element_top
        } else {
            self.window.page_y_offset()
        };
        match self.root.host() {
            Some(host) => page_scroll_top - f64::from(host.offset_top()),
            None => page_scroll_top,
        }
    }

    /// The root element hides horizontal overflow, so this is always 0
    #[inline]
    pub fn scroll_left(&self) -> f64 {
        0.0
    }

    pub fn scroll_width(&self) -> i32 {
        self.scrolling_element().scroll_width()
    }

    pub fn scroll_height(&self) -> i32 {
        self.scrolling_element().scroll_height()
    }

    pub fn set_scroll_top(&self, scroll_top: f64) {
        self.scrolling_element().set_scroll_top(scroll_top);
    }

    /// Page-relative rectangle of `element`, using the supplied scroll
    /// offsets instead of live reads where given
    pub fn layout_rect(
        &self,
        element: &ElementRef,
        scroll_left: Option<f64>,
        scroll_top: Option<f64>,
    ) -> LayoutRect {
        let scroll_top = scroll_top.unwrap_or_else(|| self.scroll_top());
        let scroll_left = scroll_left.unwrap_or_else(|| self.scroll_left());
        LayoutRect::from_client(element.bounding_client_rect(), scroll_left, scroll_top)
    }
}

/// JavaScript truthiness for a numeric DOM property
#[inline]
fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}
