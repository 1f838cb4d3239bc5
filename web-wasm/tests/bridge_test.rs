//! MessageChannel トランスポートのブラウザテスト
//!
//! `wasm-pack test --headless --firefox web-wasm` で実行

#![cfg(target_arch = "wasm32")]

use preml_common::{BridgeState, Error, FrameBridge};
use preml_web::bridge::MessageChannelTransport;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlIFrameElement;

wasm_bindgen_test_configure!(run_in_browser);

fn create_frame(attach: bool) -> HtmlIFrameElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let frame: HtmlIFrameElement = document
        .create_element("iframe")
        .unwrap()
        .dyn_into()
        .unwrap();
    if attach {
        document.body().unwrap().append_child(&frame).unwrap();
    }
    frame
}

/// 接続後のクローズは1回だけ有効
#[wasm_bindgen_test]
fn test_bridge_opens_and_closes_once() {
    let transport = MessageChannelTransport::new(create_frame(true), |_| {}).unwrap();
    let mut bridge = FrameBridge::open(transport, "w1").unwrap();

    assert_eq!(bridge.state(), BridgeState::AwaitingHandshake);
    assert!(bridge.close());
    assert!(!bridge.close());
    assert_eq!(bridge.state(), BridgeState::Closed);
}

/// 文書に追加されていないフレームはウィンドウを持たない
#[wasm_bindgen_test]
fn test_detached_frame_is_reported() {
    let transport = MessageChannelTransport::new(create_frame(false), |_| {}).unwrap();
    let result = FrameBridge::open(transport, "w1");

    assert!(matches!(result, Err(Error::Bridge(_))));
}
