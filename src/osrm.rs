//! OSRM HTTP adapter for route and trip requests.

use std::time::Duration;

use crate::error::{Error, TransportFailure};
use crate::response::RawResponse;
use crate::traits::RouteFetcher;

#[derive(Debug, Clone, Default)]
pub struct OsrmConfig {
    /// Request timeout. `None` keeps the transport's default.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl RouteFetcher for OsrmClient {
    fn fetch(&self, url: &str) -> Result<RawResponse, Error> {
        let transport = |source: TransportFailure| Error::Transport {
            url: url.to_string(),
            source,
        };

        tracing::debug!(url, "sending request");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| transport(err.into()))?;
        let status = response.status();
        let body = response.text().map_err(|err| transport(err.into()))?;
        tracing::debug!(%status, body = %body, "received response");

        // OSRM reports failures as JSON with a 4xx status; the body code is
        // the authoritative signal.
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|err| transport(err.into()))?;

        RawResponse::from_value(value)?.ensure_ok()
    }
}
