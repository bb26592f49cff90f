//! HTTP clients for the public OpenStreetMap-family services.
//!
//! Every client sends the configured `User-Agent` and `Accept-Language`
//! headers; Nominatim and Overpass reject anonymous traffic.

pub mod nominatim;
pub mod osrm;
pub mod overpass;
pub mod wikipedia;

pub use nominatim::NominatimClient;
pub use osrm::OsrmClient;
pub use overpass::{OsmTag, OverpassClient};
pub use wikipedia::WikipediaClient;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use wayfarer_core::{Error, GeoConfig, Result};

/// Builds a client with the shared headers and the given timeout.
pub fn build_http_client(config: &GeoConfig, timeout_secs: u64) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| Error::config(format!("invalid accept_language: {e}")))?;
    headers.insert(ACCEPT_LANGUAGE, language);

    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Error::http_with_source("failed to build HTTP client", e))
}

/// Maps a transport failure, keeping timeouts distinguishable.
pub(crate) fn transport_error(service: &str, timeout_secs: u64, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::Timeout {
            seconds: timeout_secs,
        };
    }
    Error::http_with_source(format!("{service} request failed"), err)
}

/// Rejects non-success responses.
pub(crate) fn check_status(service: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(service, status = status.as_u16(), "upstream rejected request");
        Err(Error::upstream(service, status.as_u16()))
    }
}

/// Decodes a JSON body.
pub(crate) async fn json_body<T: serde::de::DeserializeOwned>(
    service: &str,
    response: reqwest::Response,
) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| Error::http_with_source(format!("{service} returned an unreadable body"), e))
}

/// Joins a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
