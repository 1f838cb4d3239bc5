//! ビルド時設定
//!
//! `PREML_API_URL` / `PREML_INFERENCE_URL` / `PREML_MAP_URL` / `PREML_LOG` をビルド時に埋め込む。
//! 未指定ならAPIは同一オリジンの相対パス（開発サーバのプロキシ経由）。

use log::LevelFilter;
use preml_common::{arcsec_to_deg, SkyServiceClient, DEFAULT_SEARCH_RADIUS_ARCSEC};

/// セッション作成に失敗したときに表示する固定ビューア
///
/// `script` は視野とレイヤーを設定するイベント列（Base64）。
pub const FALLBACK_MAP_URL: &str = concat!(
    "https://web.wwtassets.org/research/latest/?script=",
    "eyJldmVudCI6ImNlbnRlcl9vbl9jb29yZGluYXRlcyIsInJhIjoxMS4yODM0MzQ5NTIzMTIwNTMsImRlYyI6NDEuNzQ1NzMyODUzMzU1MTgsImZvdiI6MC44NzM2NzcxMDAwMzQ4ODY5LCJyb2xsIjotNjYuMDYyMDMzNzc4NTgzODcsImluc3RhbnQiOnRydWV9%2C",
    "eyJldmVudCI6InNldF9iYWNrZ3JvdW5kX2J5X25hbWUiLCJuYW1lIjoiUGFuU1RBUlJTMSAzcGkifQ%3D%3D%2C",
    "eyJldmVudCI6ImxheWVyX2hpcHNjYXRfbG9hZCIsInRocmVhZElkIjoiNGI0NjAxNzEtZWQ3MC00Nzk3LWJhOGMtZmFiNjdkYTllMmFiIiwidGFibGVJZCI6IkdhaWEgRFIyIChHYWlhIENvbGxhYm9yYXRpb24sIDIwMTgpIChnYWlhMikiLCJuYW1lIjoiR2FpYSBEUjIgKEdhaWEgQ29sbGFib3JhdGlvbiwgMjAxOCkgKGdhaWEyKSJ9%2C",
    "eyJldmVudCI6InRhYmxlX2xheWVyX3NldF9tdWx0aSIsImlkIjoiR2FpYSBEUjIgKEdhaWEgQ29sbGFib3JhdGlvbiwgMjAxOCkgKGdhaWEyKSIsInNldHRpbmdzIjpbImFzdHJvbm9taWNhbCIsImNvbG9yIiwiZW5hYmxlZCIsImZhZGVTcGFuIiwibmFtZSIsIm9wYWNpdHkiLCJvcGVuZWQiLCJyZWZlcmVuY2VGcmFtZSIsInZlcnNpb24iLCJhbHRDb2x1bW4iLCJhbHRUeXBlIiwiYWx0VW5pdCIsImJhckNoYXJ0Qml0bWFzayIsImJlZ2luUmFuZ2UiLCJjYXJ0ZXNpYW5DdXN0b21TY2FsZSIsImNhcnRlc2lhblNjYWxlIiwiY29sb3JNYXBDb2x1bW4iLCJjb2xvck1hcHBlck5hbWUiLCJjb29yZGluYXRlc1R5cGUiLCJkZWNheSIsImR5bmFtaWNDb2xvciIsImR5bmFtaWNEYXRhIiwiZW5kRGF0ZUNvbHVtbiIsImVuZFJhbmdlIiwiZ2VvbWV0cnlDb2x1bW4iLCJoeXBlcmxpbmtDb2x1bW4iLCJoeXBlcmxpbmtGb3JtYXQiLCJsYXRDb2x1bW4iLCJsbmdDb2x1bW4iLCJtYXJrZXJDb2x1bW4iLCJtYXJrZXJJbmRleCIsIm1hcmtlclNjYWxlIiwibmFtZUNvbHVtbiIsIm5vcm1hbGl6ZUNvbG9yTWFwIiwibm9ybWFsaXplQ29sb3JNYXBNYXgiLCJub3JtYWxpemVDb2xvck1hcE1pbiIsIm5vcm1hbGl6ZVNpemUiLCJub3JtYWxpemVTaXplQ2xpcCIsIm5vcm1hbGl6ZVNpemVNYXgiLCJub3JtYWxpemVTaXplTWluIiwicGxvdFR5cGUiLCJwb2ludFNjYWxlVHlwZSIsInJhVW5pdHMiLCJzY2FsZUZhY3RvciIsInNob3dGYXJTaWRlIiwic2l6ZUNvbHVtbiIsInN0YXJ0RGF0ZUNvbHVtbiIsInRpbWVTZXJpZXMiLCJ4QXhpc0NvbHVtbiIsInhBeGlzUmV2ZXJzZSIsInlBeGlzQ29sdW1uIiwieUF4aXNSZXZlcnNlIiwiekF4aXNDb2x1bW4iLCJ6QXhpc1JldmVyc2UiXSwidmFsdWVzIjpbdHJ1ZSwiIzc1RkYzRiIsdHJ1ZSwwLCJHYWlhIERSMiAoR2FpYSBDb2xsYWJvcmF0aW9uLCAyMDE4KSAoZ2FpYTIpIiwxLGZhbHNlLCJTa3kiLDIsLTEsInNlYUxldmVsIiwibWV0ZXJzIiwwLCIyMTAwLTAxLTAxVDA1OjAwOjAwLjAwMFoiLDEsIm1ldGVycyIsLTEsIkdyZXlzIiwic3BoZXJpY2FsIiwxNixmYWxzZSxmYWxzZSwtMSwiMTgwMC0wMS0wMVQwNDo1NjowMi4wMDBaIiwtMSwtMSwiIiwxLDAsLTEsMCwid29ybGQiLDAsZmFsc2UsMSwwLGZhbHNlLGZhbHNlLDEsMCwiY2lyY2xlIiw0LCJkZWdyZWVzIiwxLGZhbHNlLDE5LC0xLGZhbHNlLC0xLGZhbHNlLC0xLGZhbHNlLC0xLGZhbHNlXX0%3D%2C",
    "eyJldmVudCI6ImxvYWRfaW1hZ2VfY29sbGVjdGlvbiIsInVybCI6Imh0dHA6Ly9kYXRhMS53d3Rhc3NldHMub3JnL3BhY2thZ2VzLzIwMjEvMDlfcGhhdF9maXRzL2luZGV4Lnd0bWwiLCJsb2FkQ2hpbGRGb2xkZXJzIjp0cnVlfQ%3D%3D%2C",
    "eyJldmVudCI6ImltYWdlX2xheWVyX2NyZWF0ZSIsImlkIjoiUEhBVC1mNDc1dyIsInVybCI6Imh0dHA6Ly9kYXRhMS53d3Rhc3NldHMub3JnL3BhY2thZ2VzLzIwMjEvMDlfcGhhdF9maXRzL2Y0NzV3L3sxfS97M30vezN9X3syfS5maXRzIiwibW9kZSI6InByZWxvYWRlZCIsImdvdG8iOmZhbHNlfQ%3D%3D%2C",
    "eyJldmVudCI6ImltYWdlX2xheWVyX3NldF9tdWx0aSIsImlkIjoiUEhBVC1mNDc1dyIsInNldHRpbmdzIjpbImFzdHJvbm9taWNhbCIsImNvbG9yIiwiZW5hYmxlZCIsImZhZGVTcGFuIiwibmFtZSIsIm9wYWNpdHkiLCJvcGVuZWQiLCJyZWZlcmVuY2VGcmFtZSIsInZlcnNpb24iLCJjb2xvck1hcHBlck5hbWUiLCJvdmVycmlkZURlZmF1bHRMYXllciJdLCJ2YWx1ZXMiOlt0cnVlLHsiYSI6MjU1LCJiIjoyNTUsImciOjI1NSwiciI6MjU1LCJuYW1lIjoiIn0sdHJ1ZSwwLCJQSEFULWY0NzV3IiwxLGZhbHNlLCJTa3kiLDIsInBsYXNtYSIsZmFsc2VdfQ%3D%3D%2C",
    "eyJldmVudCI6ImltYWdlX2xheWVyX3N0cmV0Y2giLCJpZCI6IlBIQVQtZjQ3NXciLCJ2ZXJzaW9uIjoxLCJzdHJldGNoIjoxLCJ2bWluIjowLjAzOTA2MjA3OTA0MjE5NjI3LCJ2bWF4IjozLjc0OTQ0Njk0OTkwODUxOTJ9",
);

pub const WINDOW_TITLE: &str = "My HSC Map";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub inference_base_url: String,
    pub fallback_map_url: String,
    pub window_title: String,
    pub search_radius_arcsec: f64,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        let log_level = option_env!("PREML_LOG")
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base_url: option_env!("PREML_API_URL").unwrap_or("").to_string(),
            inference_base_url: option_env!("PREML_INFERENCE_URL").unwrap_or("").to_string(),
            fallback_map_url: option_env!("PREML_MAP_URL")
                .unwrap_or(FALLBACK_MAP_URL)
                .to_string(),
            window_title: WINDOW_TITLE.to_string(),
            search_radius_arcsec: DEFAULT_SEARCH_RADIUS_ARCSEC,
            log_level,
        }
    }

    pub fn search_radius_deg(&self) -> f64 {
        arcsec_to_deg(self.search_radius_arcsec)
    }

    pub fn client(&self) -> SkyServiceClient {
        SkyServiceClient::new(&self.api_base_url, &self.inference_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_radius_in_degrees() {
        let config = AppConfig::from_build_env();
        assert!((config.search_radius_deg() - 10.0 / 3600.0).abs() < 1e-12);
        assert_eq!(config.window_title, "My HSC Map");
    }

    #[test]
    fn test_fallback_map_url_is_scripted() {
        assert!(FALLBACK_MAP_URL.starts_with("https://web.wwtassets.org/research/latest/?script="));
        assert_eq!(FALLBACK_MAP_URL.matches("%2C").count(), 7);
    }
}
