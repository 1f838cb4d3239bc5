//! データモデル
//!
//! CLIとWeb(WASM)で共有される型:
//! - GalaxySummary: 近傍検索の結果（リスト表示用）
//! - GalaxyDetails: 詳細検索の結果（詳細パネル・計算パネル用）
//! - Cutout: バンドごとの切り出し画像（画像かエラーのどちらか一方）
//! - MagnitudeValues: 推論入力の5バンド等級

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 近傍検索で得られる天体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxySummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub ra: f64,
    pub dec: f64,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// 天体の詳細情報
///
/// `object_id` 以外はすべて欠損しうる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalaxyDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub object_id: String,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub dec: Option<f64>,
    #[serde(default)]
    pub g_mag: Option<f64>,
    #[serde(default)]
    pub r_mag: Option<f64>,
    #[serde(default)]
    pub i_mag: Option<f64>,
    #[serde(default)]
    pub z_mag: Option<f64>,
    #[serde(default)]
    pub y_mag: Option<f64>,
    #[serde(default)]
    pub redshift: Option<f64>,
    #[serde(default)]
    pub morphology: Option<String>,
}

impl GalaxyDetails {
    /// 座標が両方そろっていれば返す
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.ra?, self.dec?))
    }

    /// 一覧側の座標で上書きした詳細を返す
    pub fn with_position(mut self, ra: f64, dec: f64) -> Self {
        self.ra = Some(ra);
        self.dec = Some(dec);
        self
    }

    pub fn magnitude(&self, band: Band) -> Option<f64> {
        match band {
            Band::G => self.g_mag,
            Band::R => self.r_mag,
            Band::I => self.i_mag,
            Band::Z => self.z_mag,
            Band::Y => self.y_mag,
        }
    }
}

/// 測光バンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    G,
    R,
    I,
    Z,
    Y,
}

impl Band {
    /// 推論入力・切り出し要求の順序
    pub const ALL: [Band; 5] = [Band::G, Band::R, Band::I, Band::Z, Band::Y];

    /// 切り出しサービスのフィルタ名
    pub fn filter_name(&self) -> &'static str {
        match self {
            Band::G => "HSC-G",
            Band::R => "HSC-R",
            Band::I => "HSC-I",
            Band::Z => "HSC-Z",
            Band::Y => "HSC-Y",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::G => "g",
            Band::R => "r",
            Band::I => "i",
            Band::Z => "z",
            Band::Y => "y",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let key = s.strip_prefix("hsc-").unwrap_or(&s);
        match key {
            "g" => Ok(Band::G),
            "r" => Ok(Band::R),
            "i" => Ok(Band::I),
            "z" => Ok(Band::Z),
            "y" => Ok(Band::Y),
            _ => Err(format!("Unknown band: {}. Use g, r, i, z, or y", s)),
        }
    }
}

/// 推論パネルの5バンド等級
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeValues {
    pub g: f64,
    pub r: f64,
    pub i: f64,
    pub z: f64,
    pub y: f64,
}

impl Default for MagnitudeValues {
    fn default() -> Self {
        Self {
            g: 20.8,
            r: 19.5,
            i: 19.2,
            z: 18.9,
            y: 18.7,
        }
    }
}

impl MagnitudeValues {
    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::G => self.g,
            Band::R => self.r,
            Band::I => self.i,
            Band::Z => self.z,
            Band::Y => self.y,
        }
    }

    pub fn set(&mut self, band: Band, value: f64) {
        match band {
            Band::G => self.g = value,
            Band::R => self.r = value,
            Band::I => self.i = value,
            Band::Z => self.z = value,
            Band::Y => self.y = value,
        }
    }

    /// g, r, i, z, y の順の配列
    pub fn to_array(&self) -> [f64; 5] {
        [self.g, self.r, self.i, self.z, self.y]
    }
}

/// 詳細から等級を取り出す（欠損は0.0）
impl From<&GalaxyDetails> for MagnitudeValues {
    fn from(details: &GalaxyDetails) -> Self {
        Self {
            g: details.g_mag.unwrap_or(0.0),
            r: details.r_mag.unwrap_or(0.0),
            i: details.i_mag.unwrap_or(0.0),
            z: details.z_mag.unwrap_or(0.0),
            y: details.y_mag.unwrap_or(0.0),
        }
    }
}

impl From<[f64; 5]> for MagnitudeValues {
    fn from(values: [f64; 5]) -> Self {
        let [g, r, i, z, y] = values;
        Self { g, r, i, z, y }
    }
}

/// 切り出し画像の結果（画像とエラーは排他）
#[derive(Debug, Clone, PartialEq)]
pub enum CutoutOutcome {
    /// 画像参照（通常はdata URL）
    Image(String),
    /// 取得失敗の理由（空文字のこともある）
    Error(String),
}

/// バンドごとの切り出し画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CutoutWire", into = "CutoutWire")]
pub struct Cutout {
    pub filter: String,
    pub outcome: CutoutOutcome,
}

impl Cutout {
    pub fn image(filter: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            outcome: CutoutOutcome::Image(image.into()),
        }
    }

    pub fn failed(filter: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            outcome: CutoutOutcome::Error(error.into()),
        }
    }

    /// 全バンドを同じエラーで埋める（一括取得が失敗したとき用）
    pub fn failed_all(bands: &[Band], error: &str) -> Vec<Self> {
        bands
            .iter()
            .map(|band| Self::failed(band.filter_name(), error))
            .collect()
    }

    pub fn image_ref(&self) -> Option<&str> {
        match &self.outcome {
            CutoutOutcome::Image(url) => Some(url),
            CutoutOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CutoutOutcome::Image(_) => None,
            CutoutOutcome::Error(e) => Some(e),
        }
    }
}

/// `/api/fetchCutout` の1要素（ワイヤ形式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CutoutWire {
    filter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// 空でない画像があれば画像を優先、なければエラー扱い
impl From<CutoutWire> for Cutout {
    fn from(wire: CutoutWire) -> Self {
        match wire.image {
            Some(image) if !image.is_empty() => Cutout::image(wire.filter, image),
            _ => Cutout::failed(wire.filter, wire.error.unwrap_or_default()),
        }
    }
}

impl From<Cutout> for CutoutWire {
    fn from(cutout: Cutout) -> Self {
        match cutout.outcome {
            CutoutOutcome::Image(image) => CutoutWire {
                filter: cutout.filter,
                image: Some(image),
                error: None,
            },
            CutoutOutcome::Error(error) => CutoutWire {
                filter: cutout.filter,
                image: None,
                error: Some(error),
            },
        }
    }
}

/// IDは文字列でも数値でも受け付ける
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}
