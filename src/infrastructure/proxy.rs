// Verbatim-relay proxy client for the upstream telemetry API
use bytes::Bytes;
use reqwest::header;
use thiserror::Error;

/// Which upstream collection a proxy route forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    Sensor,
    Gps,
    Trip,
}

impl ProxyKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ProxyKind::Sensor => "sensor",
            ProxyKind::Gps => "gps",
            ProxyKind::Trip => "trip",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProxyKind::Sensor => "sensor",
            ProxyKind::Gps => "GPS",
            ProxyKind::Trip => "trip",
        }
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status; the proxy propagates it.
    #[error("upstream responded with status {status}")]
    Status { status: u16 },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Forwards a single GET per call and hands the body back untouched.
/// No retry, no timeout, no batching.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
}

impl ProxyClient {
    pub fn new(base_url: String, username: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
        }
    }

    pub async fn relay(&self, kind: ProxyKind) -> Result<Bytes, UpstreamError> {
        let url = format!(
            "{}/{}/get/{}",
            self.base_url,
            kind.path_segment(),
            urlencoding::encode(&self.username)
        );

        let response = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { status: status.as_u16() });
        }

        Ok(response.bytes().await?)
    }
}
