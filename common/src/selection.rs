//! スカイマップ上の選択イベント
//!
//! 埋め込みビューアから届く「点」または「領域」の選択。
//! そのまま `/api/window/{id}/selection` の本文になり、ローカルには保持しない。

use serde::{Deserialize, Serialize};

/// 領域選択の角（ラジアン）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCorner {
    /// 赤経（ラジアン）
    pub a: f64,
    /// 赤緯（ラジアン）
    pub d: f64,
}

impl SkyCorner {
    /// (赤経, 赤緯) を度で返す
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.a.to_degrees(), self.d.to_degrees())
    }
}

/// 選択イベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SelectionEvent {
    /// カタログ上の1天体（座標は度）
    Point {
        catalog_id: serde_json::Value,
        index: u64,
        ra: f64,
        dec: f64,
    },
    /// 2つの角で囲まれた領域
    Region { area: [SkyCorner; 2] },
}

impl SelectionEvent {
    /// オーバーレイ表示用のラベル
    pub fn label(&self) -> String {
        match self {
            SelectionEvent::Point { ra, dec, .. } => {
                format!("Point: RA={:.4}, Dec={:.4}", ra, dec)
            }
            SelectionEvent::Region { area: [c0, c1] } => {
                let (ra1, dec1) = c0.to_degrees();
                let (ra2, dec2) = c1.to_degrees();
                format!(
                    "Region: RA1={:.4}, Dec1={:.4}, RA2={:.4}, Dec2={:.4}",
                    ra1, dec1, ra2, dec2
                )
            }
        }
    }
}
