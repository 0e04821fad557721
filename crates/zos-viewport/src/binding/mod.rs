//! Viewport bindings
//!
//! A binding adapts one hosting environment to the [`ViewportBinding`]
//! contract that the layout and runtime layers program against.
//!
//! # Variants
//!
//! - **Natural**: the hosted document owns a native scrolling viewport
//!   (standalone page or fixed-size iframe). See [`NaturalViewportBinding`].
//!
//! Picking a variant for a given environment is up to the embedder.

mod document;
mod lifecycle;
mod natural;

pub use document::DocumentView;
pub use lifecycle::{Lifecycle, LifecycleState};
pub use natural::NaturalViewportBinding;

use crate::host::ElementRef;
use crate::math::{LayoutRect, Size};
use crate::measure::Measurement;
use crate::observable::Unlisten;

/// Contract every viewport binding satisfies
///
/// Query methods run synchronously and may force a layout in the host. They
/// are only meaningful between `connect` and `disconnect`.
pub trait ViewportBinding {
    // === Lifecycle ===

    /// Attach native listeners. Called once per binding.
    fn connect(&self);

    /// Detach native listeners. Called once, after `connect`.
    fn disconnect(&self);

    /// Wait for whatever layout pass the binding needs before elements can
    /// be measured
    fn ensure_ready_for_elements(&self);

    // === Capabilities ===

    /// Border offset this binding adds above the document
    fn border_top(&self) -> i32;

    /// Whether fixed-position elements must be moved to a separate layer to
    /// stay fixed under this binding
    fn requires_fixed_layer_transfer(&self) -> bool;

    // === Events ===

    /// Subscribe to scroll notifications. Handlers re-query state.
    fn on_scroll(&self, handler: Box<dyn Fn()>) -> Unlisten;

    /// Subscribe to resize notifications. Handlers re-query state.
    fn on_resize(&self, handler: Box<dyn Fn()>) -> Unlisten;

    // === Viewer chrome ===

    /// Reserve `padding_top` pixels at the top of the document
    fn update_padding_top(&self, padding_top: i32);

    /// Viewer header is hiding. Transient transitions leave layout alone.
    fn hide_viewer_header(&self, transient: bool, last_padding_top: i32);

    /// Viewer header is showing. Transient transitions leave layout alone.
    fn show_viewer_header(&self, transient: bool, padding_top: i32);

    /// Freeze native scrolling
    fn disable_scroll(&self);

    /// Undo `disable_scroll`
    fn reset_scroll(&self);

    /// Resolves once the binding's measurements are valid for the new mode
    fn update_lightbox_mode(&self, lightbox: bool) -> Measurement<()>;

    // === Geometry ===

    fn size(&self) -> Size;

    fn scroll_top(&self) -> f64;

    fn scroll_left(&self) -> f64;

    fn scroll_width(&self) -> i32;

    fn scroll_height(&self) -> i32;

    /// Page-relative rectangle of `element`
    ///
    /// Passing `scroll_left`/`scroll_top` skips the live scroll read, so a
    /// caller measuring many elements can read the scroll position once.
    fn layout_rect(
        &self,
        element: &ElementRef,
        scroll_left: Option<f64>,
        scroll_top: Option<f64>,
    ) -> LayoutRect;

    /// `layout_rect`, run during the scheduler's next measure phase
    fn layout_rect_async(
        &self,
        element: &ElementRef,
        scroll_left: Option<f64>,
        scroll_top: Option<f64>,
    ) -> Measurement<LayoutRect>;

    fn set_scroll_top(&self, scroll_top: f64);
}
