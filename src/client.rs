//! HTTP transport capability layer.
//!
//! Both mechanisms expose the same one-method surface so the fetcher and
//! the tests can swap them freely. Classifying a failure as status,
//! network or unexpected happens here, at the boundary, so every caller
//! sees the same three kinds regardless of which client produced them.

use crate::error::{Error, Result};
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// User-Agent sent by both transports.
pub const USER_AGENT: &str = concat!("duofetch/", env!("CARGO_PKG_VERSION"));

/// Maximum response body size (10 MB).
const MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;

/// One HTTP GET mechanism.
///
/// Implementations return the response body on a 2xx status and a
/// classified [`Error`] otherwise. Transports configure no timeouts; a
/// request that hangs keeps its fetch cycle in flight.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

fn status_error(code: u16, reason: Option<&str>) -> Error {
    Error::Status {
        code,
        reason: reason.unwrap_or("unknown status").to_string(),
    }
}

/// Async path, backed by `reqwest` on the tokio runtime.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Unexpected(e.to_string()))?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), status.canonical_reason()));
        }

        // A failure past the status line means the transfer died mid-body.
        response.text().await.map_err(|e| {
            log::debug!("reqwest body read failure: {e}");
            Error::Network
        })
    }
}

fn classify_reqwest(e: reqwest::Error) -> Error {
    if e.is_connect() || e.is_timeout() {
        log::debug!("reqwest transport failure: {e}");
        return Error::Network;
    }
    Error::Unexpected(e.to_string())
}

/// Blocking path, backed by `ureq` with native-tls and bridged onto the
/// runtime with `spawn_blocking`.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        // Non-2xx responses come back as plain responses so the status
        // check below stays the single source of the status error kind.
        let agent: Agent = Agent::config_builder()
            .tls_config(tls_config)
            .http_status_as_error(false)
            .build()
            .into();

        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let agent = self.agent.clone();
        let url = url.to_string();

        match tokio::task::spawn_blocking(move || blocking_get(&agent, &url)).await {
            Ok(result) => result,
            Err(e) => Err(Error::Unexpected(format!(
                "blocking fetch task failed: {e}"
            ))),
        }
    }
}

fn blocking_get(agent: &Agent, url: &str) -> Result<String> {
    let response = agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(classify_ureq)?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status.as_u16(), status.canonical_reason()));
    }

    response
        .into_body()
        .with_config()
        .limit(MAX_BODY_SIZE)
        .read_to_string()
        .map_err(classify_ureq)
}

fn classify_ureq(e: ureq::Error) -> Error {
    match e {
        ureq::Error::StatusCode(code) => {
            let reason = ureq::http::StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason());
            status_error(code, reason)
        }
        ureq::Error::Io(io) => {
            log::debug!("ureq transport failure: {io}");
            Error::Network
        }
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed | ureq::Error::Timeout(_) => {
            Error::Network
        }
        other => Error::Unexpected(other.to_string()),
    }
}
