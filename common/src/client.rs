//! 型付きサービスクライアント
//!
//! カタログ/ウィンドウAPIと推論APIを1つにまとめる。
//! CLI（tokio）とWeb（spawn_local）のどちらからも同じ呼び出しで使える。

use crate::api::{
    endpoints, CallbackRequest, CutoutRequest, CutoutResponse, GalaxyDetailsRequest,
    GalaxyDetailsResponse, JumpToRequest, NewCatalogRequest, NewWindowRequest, PredictRequest,
    PredictResponse, QueryGalaxiesRequest, QueryGalaxiesResponse, WindowSession,
};
use crate::coords::SkyCoord;
use crate::error::Result;
use crate::http_client::{resolve_url, HttpClient};
use crate::selection::SelectionEvent;
use crate::types::{Band, Cutout, GalaxyDetails, GalaxySummary, MagnitudeValues};

/// ackの中身は使わない
type Ack = serde_json::Value;

#[derive(Debug, Clone)]
pub struct SkyServiceClient {
    api: HttpClient,
    inference: HttpClient,
}

impl SkyServiceClient {
    pub fn new(api_base_url: &str, inference_base_url: &str) -> Self {
        Self {
            api: HttpClient::new(api_base_url),
            inference: HttpClient::new(inference_base_url),
        }
    }

    pub fn from_clients(api: HttpClient, inference: HttpClient) -> Self {
        Self { api, inference }
    }

    pub fn api_base_url(&self) -> &str {
        self.api.base_url()
    }

    // ============================================
    // ウィンドウ管理
    // ============================================

    /// セッションを作成（URLはAPIベースで解決済み）
    pub async fn new_window(&self, title: &str) -> Result<WindowSession> {
        let request = NewWindowRequest {
            title: title.to_string(),
        };
        let mut session: WindowSession = self.api.post(endpoints::NEW_WINDOW, &request).await?;
        session.url = resolve_url(self.api.base_url(), &session.url);
        log::info!("new_window: Action=Created window, id={}, url={}", session.id, session.url);
        Ok(session)
    }

    pub async fn add_catalog(&self, window_id: &str, catalog: &NewCatalogRequest) -> Result<Ack> {
        let ack = self.api.post(&endpoints::catalog_new(window_id), catalog).await?;
        log::debug!("add_catalog: Action=Catalog added, name={}", catalog.name);
        Ok(ack)
    }

    pub async fn jump_to(&self, window_id: &str, target: &JumpToRequest) -> Result<Ack> {
        self.api.post(&endpoints::jump_to(window_id), target).await
    }

    pub async fn forward_callback(
        &self,
        window_id: &str,
        cbid: &str,
        args: serde_json::Value,
    ) -> Result<Ack> {
        self.api
            .post(&endpoints::callback(window_id, cbid), &CallbackRequest { args })
            .await
    }

    pub async fn send_selection(&self, window_id: &str, selection: &SelectionEvent) -> Result<Ack> {
        self.api.post(&endpoints::selection(window_id), selection).await
    }

    // ============================================
    // カタログ検索
    // ============================================

    /// 近傍の天体を検索（ID昇順）
    pub async fn query_galaxies(&self, center: SkyCoord, radius_deg: f64) -> Result<Vec<GalaxySummary>> {
        log::debug!(
            "query_galaxies: Action=Querying with RA={:.6}, Dec={:.6}, radius={}",
            center.ra,
            center.dec,
            radius_deg
        );
        let request = QueryGalaxiesRequest {
            ra: center.ra,
            dec: center.dec,
            radius: radius_deg,
        };
        let response: QueryGalaxiesResponse = self.api.post(endpoints::QUERY_GALAXIES, &request).await?;
        if let Some(warning) = &response.warning {
            log::warn!("query_galaxies: Action=Backend warning, warning={}", warning);
        }
        let galaxies = response.into_sorted();
        log::debug!("query_galaxies: Action=Received {} galaxies", galaxies.len());
        Ok(galaxies)
    }

    /// 詳細を取得（該当なしは `None`）
    pub async fn query_galaxy_details(&self, object_id: &str) -> Result<Option<GalaxyDetails>> {
        let request = GalaxyDetailsRequest {
            object_id: object_id.to_string(),
        };
        let response: GalaxyDetailsResponse =
            self.api.post(endpoints::QUERY_GALAXY_DETAILS, &request).await?;
        if let Some(warning) = &response.warning {
            log::warn!("query_galaxy_details: Action=Backend warning, warning={}", warning);
        }
        response.into_details()
    }

    /// 指定バンドの切り出し画像を一括取得
    pub async fn fetch_cutouts(&self, position: SkyCoord, bands: &[Band]) -> Result<Vec<Cutout>> {
        let request = CutoutRequest {
            ra: position.ra,
            dec: position.dec,
            bands: bands.iter().map(|b| b.filter_name().to_string()).collect(),
        };
        let response: CutoutResponse = self.api.post(endpoints::FETCH_CUTOUT, &request).await?;
        let failed = response.cutouts.iter().filter(|c| c.error().is_some()).count();
        if failed > 0 {
            log::warn!("fetch_cutouts: Action=Partial result, failed_bands={}", failed);
        }
        Ok(response.cutouts)
    }

    // ============================================
    // 推論
    // ============================================

    /// 5バンド等級から赤方偏移を推定
    pub async fn predict(&self, magnitudes: &MagnitudeValues) -> Result<f64> {
        let request = PredictRequest {
            data: magnitudes.to_array(),
        };
        let response: PredictResponse = self.inference.post(endpoints::PREDICT, &request).await?;
        let redshift = response.redshift()?;
        log::info!("predict: Action=Inference done, redshift={:.4}", redshift);
        Ok(redshift)
    }
}
