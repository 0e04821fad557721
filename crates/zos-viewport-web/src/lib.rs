//! Browser host for Zero OS viewport bindings
//!
//! Implements the `zos-viewport` host traits over `web-sys` and exposes a
//! natural viewport to JavaScript.
//!
//! ## Module Structure
//!
//! - `host` - `HostWindow`/`HostDocument`/`HostElement` over the DOM
//! - `scheduler` - Measure scheduler flushed on animation frames
//! - `logger` - `log` sink writing to the browser console
//! - `controller` - wasm-bindgen export owning the document's runtime

// =============================================================================
// Module declarations
// =============================================================================

mod controller;
pub mod host;
pub mod logger;
pub mod scheduler;

// =============================================================================
// Public re-exports
// =============================================================================

pub use controller::{Subscription, ViewportController};
pub use host::{UserAgentPlatform, WebDocument, WebElement, WebRoot, WebWindow};
pub use logger::{init_logging, ConsoleLogger};
pub use scheduler::animation_frame_scheduler;
