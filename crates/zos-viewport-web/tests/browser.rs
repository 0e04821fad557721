//! Browser tests for the DOM host
//!
//! Run with `wasm-pack test --headless --chrome crates/zos-viewport-web`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};
use zos_viewport::{
    BatchScheduler, DocumentRoot, HostElement, HostWindow, MeasureScheduler,
    NaturalViewportBinding, Platform, ViewportBinding, ViewportConfig,
};
use zos_viewport_web::{UserAgentPlatform, ViewportController, WebElement, WebRoot, WebWindow};

wasm_bindgen_test_configure!(run_in_browser);

fn test_binding(scheduler: Rc<BatchScheduler>) -> (NaturalViewportBinding, web_sys::Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let platform = UserAgentPlatform::from_window(&window);
    let root = WebRoot::containing(&document.document_element().unwrap());
    let host = WebWindow::new(window).unwrap();
    let binding = NaturalViewportBinding::new(
        Rc::new(host) as Rc<dyn HostWindow>,
        Rc::new(root) as Rc<dyn DocumentRoot>,
        Rc::new(platform) as Rc<dyn Platform>,
        scheduler as Rc<dyn MeasureScheduler>,
        ViewportConfig::lenient(),
    );
    (binding, document)
}

#[wasm_bindgen_test]
fn test_web_padding_top() {
    let (binding, document) = test_binding(Rc::new(BatchScheduler::new()));
    binding.update_padding_top(20);

    let html: HtmlElement = document.document_element().unwrap().dyn_into().unwrap();
    assert_eq!(html.style().get_property_value("padding-top").unwrap(), "20px");
    binding.update_padding_top(0);
}

#[wasm_bindgen_test]
fn test_web_scroll_lock_class() {
    let (binding, document) = test_binding(Rc::new(BatchScheduler::new()));
    let html = document.document_element().unwrap();

    binding.disable_scroll();
    assert!(html.class_list().contains(zos_viewport::DEFAULT_SCROLL_DISABLED_CLASS));
    binding.reset_scroll();
    assert!(!html.class_list().contains(zos_viewport::DEFAULT_SCROLL_DISABLED_CLASS));
}

#[wasm_bindgen_test]
fn test_web_layout_rect_matches_client_rect() {
    let scheduler = Rc::new(BatchScheduler::new());
    let (binding, document) = test_binding(Rc::clone(&scheduler));
    let div = document.create_element("div").unwrap();
    div.set_attribute("style", "position:absolute;left:10px;top:30px;width:40px;height:50px")
        .unwrap();
    document.body().unwrap().append_child(&div).unwrap();

    let element = WebElement::handle(div.clone());
    let rect = binding.layout_rect(&element, Some(0.0), Some(0.0));
    let client = element.bounding_client_rect();
    assert_eq!(rect.width, client.width.round() as i32);
    assert_eq!(rect.height, 50);

    let mut pending = binding.layout_rect_async(&element, Some(0.0), Some(0.0));
    scheduler.flush();
    assert_eq!(pending.try_take(), Ok(Some(rect)));

    div.remove();
}

fn attach_shadow_host(document: &web_sys::Document, top: i32) -> (web_sys::Element, ShadowRoot) {
    let host = document.create_element("div").unwrap();
    host.set_attribute("style", &format!("position:absolute;left:0;top:{top}px"))
        .unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    let shadow = host
        .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
        .unwrap();
    (host, shadow)
}

fn dispatch(event: &str) {
    let window = web_sys::window().unwrap();
    window
        .dispatch_event(&web_sys::Event::new(event).unwrap())
        .unwrap();
}

#[wasm_bindgen_test]
fn test_web_root_reports_shadow_host() {
    let document = web_sys::window().unwrap().document().unwrap();
    let (host, shadow) = attach_shadow_host(&document, 120);

    let root = WebRoot::new(shadow.into());
    assert_eq!(root.host().unwrap().offset_top(), 120);
    assert!(WebRoot::containing(&document.document_element().unwrap())
        .host()
        .is_none());

    host.remove();
}

#[wasm_bindgen_test]
fn test_controller_shadow_root_offsets_scroll_top() {
    let document = web_sys::window().unwrap().document().unwrap();
    let (host, shadow) = attach_shadow_host(&document, 120);

    let mut controller = ViewportController::new(None, Some(shadow.into())).unwrap();
    assert_eq!(controller.scroll_top().unwrap(), -120.0);

    controller.dispose();
    host.remove();
}

#[wasm_bindgen_test]
fn test_controller_subscription_unlisten() {
    let mut controller = ViewportController::new(None, None).unwrap();

    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let callback = Closure::wrap(Box::new(move || h.set(h.get() + 1)) as Box<dyn Fn()>);
    let mut subscription = controller
        .on_scroll(callback.as_ref().unchecked_ref::<js_sys::Function>().clone())
        .unwrap();
    assert!(subscription.active());

    dispatch("scroll");
    assert_eq!(hits.get(), 1);

    subscription.unlisten();
    assert!(!subscription.active());
    dispatch("scroll");
    assert_eq!(hits.get(), 1);

    subscription.unlisten();
    controller.dispose();
}
