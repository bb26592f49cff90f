//! Wikipedia REST page summaries.

use super::{build_http_client, transport_error};
use crate::types::WikiSummary;
use serde::Deserialize;
use wayfarer_core::{Error, GeoConfig, Result};

const SERVICE: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: Option<String>,
    extract: Option<String>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrl>,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: Option<String>,
}

/// Client for `/page/summary/{title}`.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl WikipediaClient {
    /// Creates a client from configuration.
    pub fn new(config: &GeoConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config, config.wikipedia_timeout_secs)?,
            base_url: config.wikipedia_url.clone(),
            timeout_secs: config.wikipedia_timeout_secs,
        })
    }

    /// Summary URL; spaces become underscores, the rest is percent-encoded.
    pub fn summary_url(&self, title: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid wikipedia_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::config("wikipedia_url cannot be a base URL"))?
            .pop_if_empty()
            .push("page")
            .push("summary")
            .push(&title.trim().replace(' ', "_"));
        Ok(url)
    }

    /// Summary of a page; a missing page yields empty extract and URL.
    pub async fn summary(&self, title: &str) -> Result<WikiSummary> {
        let response = self
            .http
            .get(self.summary_url(title)?)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, self.timeout_secs, e))?;

        if !response.status().is_success() {
            tracing::debug!(title, status = response.status().as_u16(), "no wikipedia page");
            return Ok(WikiSummary {
                title: title.to_string(),
                extract: None,
                url: None,
            });
        }

        let body: SummaryResponse = response
            .json()
            .await
            .map_err(|e| Error::http_with_source("wikipedia returned an unreadable body", e))?;
        Ok(WikiSummary {
            title: body.title.unwrap_or_else(|| title.to_string()),
            extract: body.extract,
            url: body.content_urls.and_then(|c| c.desktop).and_then(|d| d.page),
        })
    }
}
