//! Browser smoke tests, run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use messboard::charts::heatmap;
use messboard::host::{BrowserHost, ChartHost, MountOutcome};
use messboard::webcam::CapturedFrame;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id(id);
    canvas
        .style()
        .set_property("width", "600px")
        .unwrap();
    canvas
        .style()
        .set_property("height", "400px")
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn test_matrix_mounts_and_replaces() {
    add_canvas("smoke-heatmap");
    let spec = heatmap(
        "Smoke",
        &["Breakfast".to_string(), "Lunch".to_string()],
        &["Mon".to_string()],
        &[vec![40.0, 80.0]],
        2.0,
    );
    let mut host = BrowserHost::new().unwrap();
    assert!(host.has_target("smoke-heatmap"));
    assert_eq!(
        host.mount("smoke-heatmap", spec.clone().into()).unwrap(),
        MountOutcome::Created
    );
    assert_eq!(
        host.mount("smoke-heatmap", spec.into()).unwrap(),
        MountOutcome::Replaced
    );
    assert!(!host.has_target("no-such-canvas"));
}

#[wasm_bindgen_test]
fn test_canvas_capture_decodes() {
    let canvas = add_canvas("smoke-capture");
    canvas.set_width(4);
    canvas.set_height(4);
    let url = canvas.to_data_url_with_type("image/png").unwrap();
    let frame = CapturedFrame::from_data_url(&url).unwrap();
    assert_eq!(frame.mime_type, "image/png");
    assert!(!frame.bytes.is_empty());
}
