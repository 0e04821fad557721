//! Viewport binding layer for Zero OS hosted documents
//!
//! One contract for reading and changing the visible scrolling surface of a
//! hosted document, independent of the engine and hosting mode underneath.
//!
//! ## Module Structure
//!
//! - `math` - `LayoutRect`, `ClientRect` and `Size`
//! - `observable` - Multi-subscriber notifications
//! - `host` - Traits over the window, document and elements
//! - `measure` - Deferred reads through a measure scheduler
//! - `binding` - The `ViewportBinding` contract and the natural binding
//! - `viewer` - Viewer chrome messages
//! - `runtime` - Per-document owner of the binding
//!
//! ## Threading
//!
//! Everything is single-threaded (`Rc`/`RefCell`), matching the browser main
//! thread the bindings run on.

pub mod binding;
pub mod config;
pub mod error;
pub mod host;
pub mod math;
pub mod measure;
pub mod observable;
pub mod runtime;
pub mod viewer;

pub use binding::{
    DocumentView, Lifecycle, LifecycleState, NaturalViewportBinding, ViewportBinding,
};
pub use config::{ViewportConfig, DEFAULT_SCROLL_DISABLED_CLASS};
pub use error::ViewportError;
pub use host::{
    DocumentRoot, ElementRef, HostDocument, HostElement, HostEvent, HostWindow, ListenerId,
    Platform,
};
pub use math::{ClientRect, LayoutRect, Size};
pub use measure::{measure_promise, BatchScheduler, MeasureScheduler, Measurement};
pub use observable::{Observable, Unlisten};
pub use runtime::ViewportRuntime;
pub use viewer::ViewerEvent;
