//! 埋め込みビューアとのメッセージブリッジ
//!
//! 専用の2ポートチャネルを開き、片方のポートをハンドシェイクでフレームへ渡す。
//! 以降はローカルポートに届くメッセージをイベントとして取り出す。
//!
//! ## 状態遷移
//! `AwaitingHandshake` → (最初の受信) → `Connected` → (close) → `Closed`
//!
//! close は何度呼んでも両ポートを1回だけ閉じる。Drop でも閉じる。
//! 実際のポート操作は [`ChannelTransport`] に任せるので、ブラウザなしでテストできる。

use crate::error::{Error, Result};
use crate::selection::{SelectionEvent, SkyCorner};
use serde::Deserialize;
use serde_json::{json, Value};

/// ハンドシェイクのメッセージ種別（送受信とも）
pub const HANDSHAKE_TYPE: &str = "hscmap/jupyter/handshake";
/// 接続直後にフレームへ送る同期メッセージ
pub const SYNC_FROM_KERNEL_TYPE: &str = "sync_from_kernel";

/// チャネルの実体（ブラウザでは MessageChannel）
pub trait ChannelTransport {
    /// フレームへハンドシェイクを送り、リモート側ポートを移譲する
    fn send_handshake(&mut self) -> Result<()>;
    /// ローカルポートからフレームへ送信
    fn post(&mut self, message: &Value) -> Result<()>;
    /// 両ポートを閉じる
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    AwaitingHandshake,
    Connected,
    Closed,
}

/// フレームから届くイベント
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// ビューア側コールバックの呼び出し
    Callback { cbid: String, args: Value },
    /// カタログ上の天体クリック（座標は度）
    CatalogClick {
        catalog_id: Value,
        index: u64,
        ra: f64,
        dec: f64,
    },
    /// 領域選択（角はラジアン）
    RegionSelection { area: [SkyCorner; 2] },
    SyncFromFrontend(Value),
    Unknown { kind: String, args: Value },
}

/// イベントに対してバックエンドへ送るもの
#[derive(Debug, Clone, PartialEq)]
pub enum Relay {
    Callback { cbid: String, args: Value },
    Selection(SelectionEvent),
}

#[derive(Deserialize)]
struct CallbackArgs {
    cbid: Value,
    #[serde(default)]
    args: Value,
}

#[derive(Deserialize)]
struct CatalogClickArgs {
    #[serde(default)]
    catalog_id: Value,
    index: u64,
    ra: f64,
    dec: f64,
}

#[derive(Deserialize)]
struct RegionArgs {
    area: [SkyCorner; 2],
}

/// 受信メッセージの分類（ハンドシェイク応答は `None`）
fn classify(message: &Value) -> Result<Option<FrameEvent>> {
    let kind = message
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Parse("frame message without type".into()))?;
    let args = message.get("args").cloned().unwrap_or(Value::Null);

    let event = match kind {
        HANDSHAKE_TYPE => return Ok(None),
        "callback" => {
            let parsed: CallbackArgs = serde_json::from_value(args)?;
            let cbid = match parsed.cbid {
                Value::String(s) => s,
                other => other.to_string(),
            };
            FrameEvent::Callback {
                cbid,
                args: parsed.args,
            }
        }
        "catalog_click" => {
            let parsed: CatalogClickArgs = serde_json::from_value(args)?;
            FrameEvent::CatalogClick {
                catalog_id: parsed.catalog_id,
                index: parsed.index,
                ra: parsed.ra,
                dec: parsed.dec,
            }
        }
        "region_selection" => {
            let parsed: RegionArgs = serde_json::from_value(args)?;
            FrameEvent::RegionSelection { area: parsed.area }
        }
        "sync_from_frontend" => FrameEvent::SyncFromFrontend(args),
        other => FrameEvent::Unknown {
            kind: other.to_string(),
            args,
        },
    };
    Ok(Some(event))
}

impl FrameEvent {
    /// バックエンドへ転送すべき内容
    pub fn relay(&self) -> Option<Relay> {
        match self {
            FrameEvent::Callback { cbid, args } => Some(Relay::Callback {
                cbid: cbid.clone(),
                args: args.clone(),
            }),
            FrameEvent::CatalogClick {
                catalog_id,
                index,
                ra,
                dec,
            } => Some(Relay::Selection(SelectionEvent::Point {
                catalog_id: catalog_id.clone(),
                index: *index,
                ra: *ra,
                dec: *dec,
            })),
            FrameEvent::RegionSelection { area } => {
                Some(Relay::Selection(SelectionEvent::Region { area: *area }))
            }
            FrameEvent::SyncFromFrontend(_) | FrameEvent::Unknown { .. } => None,
        }
    }
}

/// フレームとのブリッジ
pub struct FrameBridge<T: ChannelTransport> {
    transport: T,
    window_id: String,
    state: BridgeState,
}

impl<T: ChannelTransport> FrameBridge<T> {
    /// ハンドシェイクと同期メッセージを送って待機状態にする
    pub fn open(mut transport: T, window_id: &str) -> Result<Self> {
        if let Err(e) = transport.send_handshake() {
            transport.close();
            return Err(e);
        }

        let mut bridge = Self {
            transport,
            window_id: window_id.to_string(),
            state: BridgeState::AwaitingHandshake,
        };
        bridge.send(&json!({
            "type": SYNC_FROM_KERNEL_TYPE,
            "args": { "windowId": window_id },
        }))?;
        log::info!("FrameBridge::open: Action=Handshake sent, window_id={}", window_id);
        Ok(bridge)
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    /// 受信メッセージを処理
    ///
    /// ハンドシェイク応答とクローズ後のメッセージは `Ok(None)`。
    pub fn receive(&mut self, message: &Value) -> Result<Option<FrameEvent>> {
        if self.state == BridgeState::Closed {
            log::debug!("FrameBridge::receive: Action=Dropped after close");
            return Ok(None);
        }
        if self.state == BridgeState::AwaitingHandshake {
            self.state = BridgeState::Connected;
            log::debug!("FrameBridge::receive: Action=Connected, window_id={}", self.window_id);
        }
        classify(message)
    }

    pub fn send(&mut self, message: &Value) -> Result<()> {
        if self.state == BridgeState::Closed {
            return Err(Error::Bridge("channel already closed".into()));
        }
        self.transport.post(message)
    }

    /// 両ポートを閉じる（2回目以降は何もせず `false`）
    pub fn close(&mut self) -> bool {
        if self.state == BridgeState::Closed {
            return false;
        }
        self.transport.close();
        self.state = BridgeState::Closed;
        log::info!("FrameBridge::close: Action=Ports closed, window_id={}", self.window_id);
        true
    }
}

impl<T: ChannelTransport> Drop for FrameBridge<T> {
    fn drop(&mut self) {
        self.close();
    }
}
