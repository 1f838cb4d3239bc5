//! バックエンドとのワイヤ形式
//!
//! カタログ/ウィンドウAPI（`/api/...`）と推論API（`/predict`）の
//! リクエスト・レスポンス定義とパス組み立て。

use crate::error::{Error, Result};
use crate::types::{Cutout, GalaxyDetails, GalaxySummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// エンドポイントのパス
pub mod endpoints {
    pub const NEW_WINDOW: &str = "/api/window/new";
    pub const QUERY_GALAXIES: &str = "/api/queryGalaxies";
    pub const QUERY_GALAXY_DETAILS: &str = "/api/queryGalaxyDetails";
    pub const FETCH_CUTOUT: &str = "/api/fetchCutout";
    pub const PREDICT: &str = "/predict";

    pub fn catalog_new(window_id: &str) -> String {
        format!("/api/window/{}/catalog/new", window_id)
    }

    pub fn jump_to(window_id: &str) -> String {
        format!("/api/window/{}/jump_to", window_id)
    }

    pub fn callback(window_id: &str, cbid: &str) -> String {
        format!("/api/window/{}/callback/{}", window_id, cbid)
    }

    pub fn selection(window_id: &str) -> String {
        format!("/api/window/{}/selection", window_id)
    }
}

// ============================================
// ウィンドウ管理
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWindowRequest {
    pub title: String,
}

/// セッションIDと埋め込みURL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSession {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// 埋め込みビューアの読み込み元
#[derive(Debug, Clone, PartialEq)]
pub enum MapSource {
    /// バックエンドのセッション（ブリッジ経由の操作が可能）
    Session(WindowSession),
    /// 固定URL（セッション作成に失敗したとき）
    Fixed(String),
}

impl MapSource {
    pub fn url(&self) -> &str {
        match self {
            MapSource::Session(session) => &session.url,
            MapSource::Fixed(url) => url,
        }
    }

    pub fn window_id(&self) -> Option<&str> {
        match self {
            MapSource::Session(session) => Some(&session.id),
            MapSource::Fixed(_) => None,
        }
    }
}

/// カタログ追加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCatalogRequest {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub name: String,
    pub columns: BTreeMap<String, Vec<f64>>,
    /// RGBA（0.0〜1.0）
    pub color: [f32; 4],
}

impl NewCatalogRequest {
    /// 起動時に読み込むサンプルカタログ
    pub fn sample() -> Self {
        let mut columns = BTreeMap::new();
        columns.insert("mag".to_string(), vec![20.5, 21.0]);
        Self {
            ra: vec![150.0, 151.0],
            dec: vec![1.0, 2.0],
            name: "Sample Catalog".to_string(),
            columns,
            color: [0.0, 1.0, 0.0, 0.5],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpToRequest {
    pub ra: f64,
    pub dec: f64,
    /// 視野（度）
    pub fov: f64,
}

impl Default for JumpToRequest {
    fn default() -> Self {
        Self {
            ra: 150.5,
            dec: 1.5,
            fov: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub args: serde_json::Value,
}

// ============================================
// カタログ検索
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryGalaxiesRequest {
    pub ra: f64,
    pub dec: f64,
    /// 検索半径（度）
    pub radius: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryGalaxiesResponse {
    #[serde(default)]
    pub galaxies: Vec<GalaxySummary>,
    #[serde(default)]
    pub warning: Option<String>,
}

impl QueryGalaxiesResponse {
    /// ID昇順に並べた一覧
    pub fn into_sorted(self) -> Vec<GalaxySummary> {
        let mut galaxies = self.galaxies;
        galaxies.sort_by(|a, b| a.id.cmp(&b.id));
        galaxies
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalaxyDetailsRequest {
    pub object_id: String,
}

/// `details` が空オブジェクトなら該当なし
#[derive(Debug, Clone, Deserialize)]
pub struct GalaxyDetailsResponse {
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default)]
    pub warning: Option<String>,
}

impl GalaxyDetailsResponse {
    pub fn into_details(self) -> Result<Option<GalaxyDetails>> {
        match &self.details {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => Ok(None),
            _ => Ok(Some(serde_json::from_value(self.details)?)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutoutRequest {
    pub ra: f64,
    pub dec: f64,
    pub bands: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CutoutResponse {
    #[serde(default)]
    pub cutouts: Vec<Cutout>,
}

// ============================================
// 推論
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub data: [f64; 5],
}

/// 推論結果（数値・配列・入れ子配列のいずれか）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Scalar(f64),
    List(Vec<Prediction>),
}

impl Prediction {
    /// 先頭のスカラー値
    pub fn first_value(&self) -> Option<f64> {
        match self {
            Prediction::Scalar(v) => Some(*v),
            Prediction::List(items) => items.first().and_then(Prediction::first_value),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
}

impl PredictResponse {
    pub fn redshift(&self) -> Result<f64> {
        self.prediction
            .first_value()
            .ok_or_else(|| Error::MissingData("prediction is empty".into()))
    }
}

/// バックエンドのエラーペイロード
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// エラーレスポンス本文からメッセージを取り出す（JSONでなければ本文そのまま）
pub fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => payload.error,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(endpoints::catalog_new("w1"), "/api/window/w1/catalog/new");
        assert_eq!(endpoints::jump_to("w1"), "/api/window/w1/jump_to");
        assert_eq!(endpoints::callback("w1", "cb9"), "/api/window/w1/callback/cb9");
        assert_eq!(endpoints::selection("w1"), "/api/window/w1/selection");
    }

    #[test]
    fn test_map_source() {
        let session = MapSource::Session(WindowSession {
            id: "w1".to_string(),
            url: "http://localhost:7333/hscmap/".to_string(),
            title: None,
        });
        assert_eq!(session.window_id(), Some("w1"));
        assert_eq!(session.url(), "http://localhost:7333/hscmap/");

        let fixed = MapSource::Fixed("https://web.wwtassets.org/research/latest/".to_string());
        assert_eq!(fixed.window_id(), None);
    }

    #[test]
    fn test_sample_catalog_serialize() {
        let value = serde_json::to_value(NewCatalogRequest::sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "ra": [150.0, 151.0],
                "dec": [1.0, 2.0],
                "name": "Sample Catalog",
                "columns": {"mag": [20.5, 21.0]},
                "color": [0.0, 1.0, 0.0, 0.5]
            })
        );
    }

    #[test]
    fn test_query_galaxies_sorted_by_id() {
        let response: QueryGalaxiesResponse = serde_json::from_value(json!({
            "galaxies": [
                {"id": "300", "ra": 1.0, "dec": 1.0, "distance": 0.0},
                {"id": "100", "ra": 2.0, "dec": 2.0, "distance": 0.0, "magnitude": 20.1},
                {"id": "200", "ra": 3.0, "dec": 3.0, "distance": 0.0}
            ]
        }))
        .unwrap();
        let ids: Vec<String> = response.into_sorted().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["100", "200", "300"]);
    }

    #[test]
    fn test_query_galaxies_warning_without_list() {
        let response: QueryGalaxiesResponse =
            serde_json::from_value(json!({"galaxies": [], "warning": "No data rows found"})).unwrap();
        assert!(response.galaxies.is_empty());
        assert_eq!(response.warning.as_deref(), Some("No data rows found"));
    }

    #[test]
    fn test_details_empty_object_is_none() {
        let response: GalaxyDetailsResponse =
            serde_json::from_value(json!({"details": {}, "warning": "CSV header not found"})).unwrap();
        assert_eq!(response.into_details().unwrap(), None);
    }

    #[test]
    fn test_details_present() {
        let response: GalaxyDetailsResponse = serde_json::from_value(json!({
            "details": {"object_id": "42", "g_mag": 22.5, "redshift": null, "morphology": "spiral"}
        }))
        .unwrap();
        let details = response.into_details().unwrap().unwrap();
        assert_eq!(details.object_id, "42");
        assert_eq!(details.g_mag, Some(22.5));
        assert_eq!(details.morphology.as_deref(), Some("spiral"));
    }

    #[test]
    fn test_prediction_shapes() {
        let list: PredictResponse = serde_json::from_value(json!({"prediction": [0.4123]})).unwrap();
        assert_eq!(list.redshift().unwrap(), 0.4123);

        let scalar: PredictResponse = serde_json::from_value(json!({"prediction": 0.87})).unwrap();
        assert_eq!(scalar.redshift().unwrap(), 0.87);

        let nested: PredictResponse = serde_json::from_value(json!({"prediction": [[1.25, 0.1]]})).unwrap();
        assert_eq!(nested.redshift().unwrap(), 1.25);
    }

    #[test]
    fn test_prediction_empty_is_missing() {
        let empty: PredictResponse = serde_json::from_value(json!({"prediction": []})).unwrap();
        assert!(matches!(empty.redshift(), Err(Error::MissingData(_))));
    }

    #[test]
    fn test_predict_request_serialize() {
        let request = PredictRequest { data: [20.8, 19.5, 19.2, 18.9, 18.7] };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"data":[20.8,19.5,19.2,18.9,18.7]}"#
        );
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(extract_error_message(r#"{"error": "Window not found"}"#), "Window not found");
        assert_eq!(extract_error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
