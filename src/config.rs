use crate::error::{PremlError, Result};
use preml_common::{arcsec_to_deg, HttpClient, SkyServiceClient, DEFAULT_SEARCH_RADIUS_ARCSEC};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "PREML_API_URL";
pub const INFERENCE_URL_ENV: &str = "PREML_INFERENCE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub inference_base_url: String,
    pub search_radius_arcsec: f64,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:7333".into(),
            inference_base_url: "http://localhost:6001".into(),
            search_radius_arcsec: DEFAULT_SEARCH_RADIUS_ARCSEC,
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PremlError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("preml").join("config.json"))
    }

    /// 環境変数を優先
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(INFERENCE_URL_ENV).ok(),
        )
    }

    pub fn with_overrides(mut self, api_url: Option<String>, inference_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(url) = inference_url.filter(|u| !u.trim().is_empty()) {
            self.inference_base_url = url;
        }
        self
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        self.api_base_url = validate_url(url)?;
        Ok(())
    }

    pub fn set_inference_url(&mut self, url: &str) -> Result<()> {
        self.inference_base_url = validate_url(url)?;
        Ok(())
    }

    pub fn search_radius_deg(&self) -> f64 {
        arcsec_to_deg(self.search_radius_arcsec)
    }

    /// タイムアウト付きのサービスクライアント
    pub fn client(&self) -> Result<SkyServiceClient> {
        let timeout = Duration::from_secs(self.timeout_seconds);
        let api = HttpClient::with_timeout(&self.api_base_url, timeout)?;
        let inference = HttpClient::with_timeout(&self.inference_base_url, timeout)?;
        Ok(SkyServiceClient::from_clients(api, inference))
    }
}

/// http(s) のURLのみ受け付け、末尾の `/` は落とす
pub fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(PremlError::Config(format!(
            "URL must start with http:// or https://: {}",
            url
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}
