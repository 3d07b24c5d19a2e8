use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::api::models::{ProviderStatus, SearchRequest, SearchResponse, SearchResult, SummaryResponse};
use crate::config::Config;
use crate::error::{AppError, Result};

/// HTTP client for the search backend. Cloning shares the connection pool.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(BackendClient {
            http,
            base_url: config.backend_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    pub fn search_url(&self, req: &SearchRequest) -> String {
        let mut url = format!("{}/search?q={}", self.base_url, encode(&req.q));
        if let Some(domain) = &req.domain {
            url.push_str("&domain=");
            url.push_str(&encode(domain));
        }
        url.push_str(&format!("&num_results={}", req.num_results));
        url
    }

    pub fn summarize_url(&self, target: &str) -> String {
        format!("{}/summarize?url={}", self.base_url, encode(target))
    }

    /// Liveness check. Any failure, transport or status, means unreachable.
    pub async fn health(&self) -> Result<()> {
        let url = self.health_url();
        debug!("Testing backend connection: {}", url);

        match self.http.get(&url).send().await {
            Ok(res) if res.status().is_success() => {
                debug!("Backend connection OK");
                Ok(())
            }
            Ok(res) => {
                warn!("Health check returned status {}", res.status());
                Err(AppError::BackendUnreachable)
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                Err(AppError::BackendUnreachable)
            }
        }
    }

    pub async fn search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>> {
        let url = self.search_url(req);
        debug!("Making request to: {}", url);

        let response: SearchResponse = self.get_json(&url).await?;
        Ok(response.into_results())
    }

    pub async fn summarize(&self, target: &str) -> Result<String> {
        let url = self.summarize_url(target);
        debug!("Making request to: {}", url);

        let response: SummaryResponse = self.get_json(&url).await?;
        Ok(response.summary)
    }

    /// Backend's diagnostic of its upstream search provider.
    pub async fn provider_status(&self) -> Result<ProviderStatus> {
        let url = format!("{}/test-exa", self.base_url);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let res = self.http.get(url).send().await?;
        let res = check_status(res)?;
        Ok(res.json::<T>().await?)
    }
}

fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(AppError::HttpStatus(status.as_u16()))
    }
}
