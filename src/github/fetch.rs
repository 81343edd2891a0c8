use crate::error::{Result, ScoreError};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "fetch";

/// Single-shot JSON GET client. No timeout and no retry: each call is one
/// request, and anything but `200 OK` is an error.
#[derive(Debug, Clone)]
pub struct HttpJsonFetcher {
    client: Client,
}

impl HttpJsonFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            log::debug!(target: LOG_TARGET, "Transport failure for {url}: {e}");
            ScoreError::Network(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            log::debug!(target: LOG_TARGET, "{url} answered {status}");
            return Err(ScoreError::HttpStatus(status_text(status)));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
