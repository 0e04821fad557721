//! Integration tests for ViewportRuntime
//!
//! Cover the runtime's ownership of a natural binding:
//! - Start/shutdown lifecycle
//! - Viewer header transitions
//! - Lightbox mode

use std::cell::Cell;
use std::rc::Rc;

use futures::executor::block_on;
use zos_viewport::{
    HostEvent, ViewerEvent, ViewportBinding, ViewportConfig, ViewportRuntime,
    DEFAULT_SCROLL_DISABLED_CLASS,
};
use zos_viewport_mock::MockHost;

fn start_runtime(host: &MockHost, initial_padding_top: i32) -> ViewportRuntime {
    let config = ViewportConfig {
        initial_padding_top,
        ..ViewportConfig::lenient()
    };
    let mut runtime = ViewportRuntime::new(Box::new(host.natural_binding(config.clone())), &config);
    runtime.start();
    runtime
}

fn padding(host: &MockHost) -> Option<String> {
    host.html().style("padding-top")
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_runtime_start_connects_and_applies_padding() {
    let host = MockHost::new();
    let runtime = start_runtime(&host, 56);

    assert_eq!(host.window.listener_count(HostEvent::Scroll), 1);
    assert_eq!(host.window.listener_count(HostEvent::Resize), 1);
    assert_eq!(padding(&host).as_deref(), Some("56px"));
    assert_eq!(runtime.padding_top(), 56);
}

#[test]
fn test_runtime_shutdown_disconnects() {
    let host = MockHost::new();
    let runtime = start_runtime(&host, 0);

    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let _ = runtime
        .binding()
        .on_scroll(Box::new(move || h.set(h.get() + 1)));

    host.window.simulate_scroll();
    runtime.shutdown();
    host.window.simulate_scroll();

    assert_eq!(hits.get(), 1);
    assert_eq!(host.window.listener_count(HostEvent::Scroll), 0);
}

#[test]
fn test_runtimes_are_independent() {
    let first_host = MockHost::new();
    let second_host = MockHost::new();
    let mut first = start_runtime(&first_host, 0);
    let second = start_runtime(&second_host, 0);

    first.apply_viewer_event(ViewerEvent::Viewport {
        padding_top: 30,
        transient: false,
    });

    assert_eq!(padding(&first_host).as_deref(), Some("30px"));
    assert_eq!(padding(&second_host).as_deref(), Some("0px"));
    assert_eq!(second.padding_top(), 0);
}

// =============================================================================
// Viewer header
// =============================================================================

#[test]
fn test_runtime_header_hide_persistent() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 48);

    let done = runtime.apply_viewer_event(ViewerEvent::Viewport {
        padding_top: 0,
        transient: false,
    });

    assert!(done.is_none());
    assert_eq!(padding(&host).as_deref(), Some("0px"));
    assert_eq!(runtime.padding_top(), 0);
    assert_eq!(runtime.last_padding_top(), 48);
}

#[test]
fn test_runtime_header_hide_transient_keeps_layout() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 48);
    let writes = host.html().style_write_count();

    runtime.apply_viewer_event(ViewerEvent::Viewport {
        padding_top: 0,
        transient: true,
    });

    assert_eq!(host.html().style_write_count(), writes);
    assert_eq!(padding(&host).as_deref(), Some("48px"));
    assert_eq!(runtime.padding_top(), 0);
}

#[test]
fn test_runtime_header_show() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 0);

    runtime.apply_viewer_event(ViewerEvent::Viewport {
        padding_top: 64,
        transient: false,
    });

    assert_eq!(padding(&host).as_deref(), Some("64px"));
}

#[test]
fn test_runtime_header_unchanged_padding_ignored() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 32);
    let writes = host.html().style_write_count();

    runtime.apply_viewer_event(ViewerEvent::Viewport {
        padding_top: 32,
        transient: false,
    });

    assert_eq!(host.html().style_write_count(), writes);
    assert_eq!(runtime.last_padding_top(), 0);
}

#[test]
fn test_runtime_applies_decoded_message() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 0);

    let event = ViewerEvent::from_json(r#"{"type":"viewport","paddingTop":40}"#).unwrap();
    runtime.apply_viewer_event(event);

    assert_eq!(padding(&host).as_deref(), Some("40px"));
}

// =============================================================================
// Lightbox
// =============================================================================

#[test]
fn test_runtime_lightbox_toggles_scroll_lock() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 0);

    let entered = runtime
        .apply_viewer_event(ViewerEvent::Lightbox { enabled: true })
        .unwrap();
    assert_eq!(block_on(entered), Ok(()));
    assert!(runtime.is_lightbox());
    assert!(host.html().has_class(DEFAULT_SCROLL_DISABLED_CLASS));

    let left = runtime
        .apply_viewer_event(ViewerEvent::Lightbox { enabled: false })
        .unwrap();
    assert_eq!(block_on(left), Ok(()));
    assert!(!runtime.is_lightbox());
    assert!(!host.html().has_class(DEFAULT_SCROLL_DISABLED_CLASS));
}

#[test]
fn test_runtime_lightbox_repeat_ignored() {
    let host = MockHost::new();
    let mut runtime = start_runtime(&host, 0);

    assert!(runtime
        .apply_viewer_event(ViewerEvent::Lightbox { enabled: true })
        .is_some());
    assert!(runtime
        .apply_viewer_event(ViewerEvent::Lightbox { enabled: true })
        .is_none());
    assert!(runtime
        .apply_viewer_event(ViewerEvent::Lightbox { enabled: false })
        .is_some());
}
