//! MessageChannel によるフレーム通信
//!
//! port2 をハンドシェイクで埋め込みフレームへ渡し、port1 で受信する。

use preml_common::bridge::HANDSHAKE_TYPE;
use preml_common::{ChannelTransport, Error, Result};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlIFrameElement, MessageChannel, MessageEvent};

pub struct MessageChannelTransport {
    frame: HtmlIFrameElement,
    channel: MessageChannel,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
}

fn js_error(context: &str, err: JsValue) -> Error {
    Error::Bridge(format!("{}: {:?}", context, err))
}

/// 受信データをJSONへ（ハンドシェイク応答はポートを含むので型だけ取り出す）
fn message_to_json(data: JsValue) -> Result<Value> {
    let kind = js_sys::Reflect::get(&data, &JsValue::from_str("type"))
        .ok()
        .and_then(|v| v.as_string());
    if kind.as_deref() == Some(HANDSHAKE_TYPE) {
        return Ok(json!({ "type": HANDSHAKE_TYPE }));
    }
    serde_wasm_bindgen::from_value(data).map_err(|e| Error::Parse(e.to_string()))
}

impl MessageChannelTransport {
    /// チャネルを作成し、port1 の受信を `on_message` へ流す
    pub fn new<F>(frame: HtmlIFrameElement, mut on_message: F) -> Result<Self>
    where
        F: FnMut(Value) + 'static,
    {
        let channel = MessageChannel::new().map_err(|e| js_error("MessageChannel", e))?;

        let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
            match message_to_json(event.data()) {
                Ok(value) => on_message(value),
                Err(e) => log::warn!("MessageChannelTransport: Action=Dropped message, error={}", e),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        // onmessage の設定でポートが開始される
        channel.port1().set_onmessage(Some(closure.as_ref().unchecked_ref()));

        Ok(Self {
            frame,
            channel,
            _on_message: closure,
        })
    }
}

impl ChannelTransport for MessageChannelTransport {
    fn send_handshake(&mut self) -> Result<()> {
        let window = self
            .frame
            .content_window()
            .ok_or_else(|| Error::Bridge("frame window is not available".into()))?;

        let port = self.channel.port2();
        let message = js_sys::Object::new();
        js_sys::Reflect::set(&message, &"type".into(), &HANDSHAKE_TYPE.into())
            .map_err(|e| js_error("handshake", e))?;
        js_sys::Reflect::set(&message, &"port".into(), &port)
            .map_err(|e| js_error("handshake", e))?;

        let transfer = js_sys::Array::of1(&port);
        window
            .post_message_with_transfer(&message, "*", &transfer)
            .map_err(|e| js_error("postMessage", e))
    }

    fn post(&mut self, message: &Value) -> Result<()> {
        // Map ではなく素のオブジェクトとして渡す
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let value = message
            .serialize(&serializer)
            .map_err(|e| Error::Parse(e.to_string()))?;
        self.channel
            .port1()
            .post_message(&value)
            .map_err(|e| js_error("port.postMessage", e))
    }

    fn close(&mut self) {
        let port1 = self.channel.port1();
        port1.set_onmessage(None);
        port1.close();
        self.channel.port2().close();
        log::debug!("MessageChannelTransport: Action=Ports closed");
    }
}
