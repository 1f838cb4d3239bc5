//! JSON over HTTP クライアント（ネイティブ/WASM共通）
//!
//! ネイティブでは reqwest、WASMでは gloo の fetch ラッパーを使う。
//! どちらも「POSTしてJSONを受け取る」だけの最小インターフェースを持つ。
//! 非2xxレスポンスは本文の `{"error": ...}` を読んで `Error::Backend` にする。

use crate::api::extract_error_message;
use crate::error::Error;
use serde::{de::DeserializeOwned, Serialize};

/// ベースURLとパスを連結（ベースが空なら相対パスのまま）
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// 相対URLをベースURLに対して解決
///
/// `url` が絶対URLならそのまま返す。
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//") {
        url.to_string()
    } else if url.starts_with('/') {
        join_url(base_url, url)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), url)
    }
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;
    use gloo::net::http::Request;

    impl From<gloo::net::Error> for Error {
        fn from(err: gloo::net::Error) -> Self {
            Error::Http(err.to_string())
        }
    }

    #[derive(Debug, Clone)]
    pub struct HttpClient {
        base_url: String,
    }

    impl HttpClient {
        pub fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        pub async fn post<T: Serialize, R: DeserializeOwned>(
            &self,
            path: &str,
            body: &T,
        ) -> Result<R, Error> {
            let url = join_url(&self.base_url, path);
            log::debug!("HttpClient::post: Action=Sending, url={}", url);
            let response = Request::post(&url)
                .json(body)
                .map_err(|e| Error::Parse(e.to_string()))?
                .send()
                .await?;

            if !response.ok() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Backend {
                    status: response.status(),
                    message: extract_error_message(&body),
                });
            }

            response
                .json::<R>()
                .await
                .map_err(|e| Error::Parse(e.to_string()))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use std::time::Duration;

    impl From<reqwest::Error> for Error {
        fn from(err: reqwest::Error) -> Self {
            if err.is_timeout() {
                Error::Timeout
            } else if err.is_connect() {
                Error::Connection(err.to_string())
            } else {
                Error::Http(err.to_string())
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct HttpClient {
        base_url: String,
        client: reqwest::Client,
    }

    impl HttpClient {
        pub fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                client: reqwest::Client::new(),
            }
        }

        /// リクエストごとのタイムアウト付き
        pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            Ok(Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                client,
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        pub async fn post<T: Serialize, R: DeserializeOwned>(
            &self,
            path: &str,
            body: &T,
        ) -> Result<R, Error> {
            let url = join_url(&self.base_url, path);
            log::debug!("HttpClient::post: Action=Sending, url={}", url);
            let response = self.client.post(&url).json(body).send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Backend {
                    status: status.as_u16(),
                    message: extract_error_message(&body),
                });
            }

            response
                .json::<R>()
                .await
                .map_err(|e| Error::Parse(e.to_string()))
        }
    }
}

pub use platform::HttpClient;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://localhost:7333/", "/api/queryGalaxies"), "http://localhost:7333/api/queryGalaxies");
        assert_eq!(join_url("", "/predict"), "/predict");
    }

    #[test]
    fn test_resolve_url_relative() {
        assert_eq!(
            resolve_url("http://localhost:7333", "/hscmap/index.html"),
            "http://localhost:7333/hscmap/index.html"
        );
        assert_eq!(resolve_url("http://localhost:7333/", "hscmap/"), "http://localhost:7333/hscmap/");
    }

    #[test]
    fn test_resolve_url_absolute() {
        assert_eq!(
            resolve_url("http://localhost:7333", "https://hscmap.mtk.nao.ac.jp/hscMap4/"),
            "https://hscmap.mtk.nao.ac.jp/hscMap4/"
        );
    }

    #[test]
    fn test_client_trims_base() {
        let client = HttpClient::new("http://example.org///");
        assert_eq!(client.base_url(), "http://example.org");
    }
}
