use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::data::DatasetBundle;
use crate::error::LandscapeError;

/// Fetches and parses one dataset file.
pub trait BundleSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<DatasetBundle, LandscapeError>;
}

impl<S: BundleSource + ?Sized> BundleSource for Arc<S> {
    fn fetch(&self, url: &str) -> Result<DatasetBundle, LandscapeError> {
        (**self).fetch(url)
    }
}

#[derive(Clone)]
pub struct HttpBundleSource {
    client: Client,
}

impl HttpBundleSource {
    pub fn new() -> Result<Self, LandscapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("landscape-items/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| LandscapeError::Http(err.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| LandscapeError::Http(err.to_string()))?;
        Ok(Self { client })
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, LandscapeError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "dataset request failed".to_string());
        Err(LandscapeError::Status { status, message })
    }
}

impl BundleSource for HttpBundleSource {
    fn fetch(&self, url: &str) -> Result<DatasetBundle, LandscapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| LandscapeError::Http(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let body = response
            .text()
            .map_err(|err| LandscapeError::Http(err.to_string()))?;
        debug!(url, bytes = body.len(), "dataset downloaded");
        parse_bundle(&body)
    }
}

pub fn parse_bundle(body: &str) -> Result<DatasetBundle, LandscapeError> {
    serde_json::from_str(body).map_err(|err| LandscapeError::Parse(err.to_string()))
}
