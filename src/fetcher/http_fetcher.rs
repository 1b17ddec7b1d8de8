use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;

use crate::app::{ReaderError, Result};
use crate::config::SiteConfig;
use crate::fetcher::Fetcher;

const FALLBACK_USER_AGENT: &str = concat!("eksi-reader/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetcher {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("tr-TR,tr;q=0.9,en;q=0.5"));

        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ReaderError::network(&config.base_url, e))?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
        })
    }

    fn user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_USER_AGENT)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent())
            .send()
            .await
            .map_err(|e| ReaderError::network(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| ReaderError::network(url, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| ReaderError::network(url, e))?;

        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
