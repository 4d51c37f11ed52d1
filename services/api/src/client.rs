//! HTTP client for the loan backend

use std::time::Duration;

use common::config::ApiConfig;
use reqwest::{Client, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Thin JSON client bound to one backend base URL
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a new API client from `LOAN_DESK_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        let config = ApiConfig::from_env()?;
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(path, self.http.get(self.url(path))).await
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send_json(path, self.http.get(self.url(path)).query(query))
            .await
    }

    /// POST a JSON body to `path` and decode the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(path, self.http.post(self.url(path)).json(body))
            .await
    }

    /// PUT a JSON body to `path` and decode the JSON response
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(path, self.http.put(self.url(path)).json(body))
            .await
    }

    /// DELETE `path`, ignoring any response body
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(path, self.http.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        debug!(path, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(path, "Request failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, %status, "Backend returned an error status");
            return Err(ApiError::Status {
                path: path.to_string(),
                status,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.send(path, request).await?.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(path, "Failed to decode response: {}", e);
            ApiError::Decode {
                path: path.to_string(),
                source: e,
            }
        })
    }
}
