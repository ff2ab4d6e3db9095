//! Fetch cycle execution and timing.

use crate::api::{self, Filter, Profile};
use crate::client::{ReqwestTransport, Transport, UreqTransport};
use crate::error::Result;
use std::time::{Duration, Instant};

/// The two transport mechanisms under comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientKind {
    Reqwest,
    Ureq,
}

impl ClientKind {
    pub fn label(self) -> &'static str {
        match self {
            ClientKind::Reqwest => "reqwest",
            ClientKind::Ureq => "ureq",
        }
    }
}

/// What a fetch cycle exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Reqwest,
    Ureq,
    Both,
}

/// Successful result of one path: the profile batch plus the elapsed
/// wall-clock time it was stamped with. The two never travel apart, so
/// a displayed time always belongs to the list next to it.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub profiles: Vec<Profile>,
    pub elapsed: Duration,
}

impl Outcome {
    /// Elapsed time the way the views display it.
    pub fn elapsed_label(&self) -> String {
        format!("{:.2} ms", self.elapsed.as_secs_f64() * 1000.0)
    }
}

/// Payload of a completed fetch cycle.
#[derive(Clone, Debug)]
pub enum Fetched {
    Single { kind: ClientKind, outcome: Outcome },
    Pair { reqwest: Outcome, ureq: Outcome },
}

/// Runs fetch cycles over a fixed pairing of transports.
///
/// The first slot is the reqwest path, the second the ureq path; tests
/// substitute scripted mocks for either.
pub struct Fetcher<R, U> {
    base_url: String,
    reqwest: R,
    ureq: U,
}

/// Production pairing of the two real transports.
pub type HttpFetcher = Fetcher<ReqwestTransport, UreqTransport>;

impl HttpFetcher {
    pub fn over_http(base_url: impl Into<String>) -> Result<Self> {
        Ok(Fetcher::new(
            base_url,
            ReqwestTransport::new()?,
            UreqTransport::new(),
        ))
    }
}

impl<R: Transport, U: Transport> Fetcher<R, U> {
    pub fn new(base_url: impl Into<String>, reqwest: R, ureq: U) -> Self {
        Fetcher {
            base_url: base_url.into(),
            reqwest,
            ureq,
        }
    }

    /// Execute one fetch cycle against a snapshot of the filter.
    ///
    /// A `Both` cycle runs the two paths concurrently against the same
    /// URL and joins fail-fast: the first error wins and any partial
    /// success is discarded. On joint success both outcomes carry the
    /// identical combined elapsed time, not their own transfer times.
    pub async fn run(&self, target: Target, filter: &Filter) -> Result<Fetched> {
        let url = api::request_url(&self.base_url, filter);
        log::info!("fetch cycle: target={target:?} url={url}");

        match target {
            Target::Reqwest => {
                let outcome = timed_fetch(&self.reqwest, &url).await?;
                Ok(Fetched::Single {
                    kind: ClientKind::Reqwest,
                    outcome,
                })
            }
            Target::Ureq => {
                let outcome = timed_fetch(&self.ureq, &url).await?;
                Ok(Fetched::Single {
                    kind: ClientKind::Ureq,
                    outcome,
                })
            }
            Target::Both => {
                let started = Instant::now();
                let (reqwest_profiles, ureq_profiles) = tokio::try_join!(
                    fetch_profiles(&self.reqwest, &url),
                    fetch_profiles(&self.ureq, &url),
                )?;
                let elapsed = started.elapsed();

                Ok(Fetched::Pair {
                    reqwest: Outcome {
                        profiles: reqwest_profiles,
                        elapsed,
                    },
                    ureq: Outcome {
                        profiles: ureq_profiles,
                        elapsed,
                    },
                })
            }
        }
    }
}

/// One path on its own clock: transfer plus decode.
async fn timed_fetch<T: Transport>(transport: &T, url: &str) -> Result<Outcome> {
    let started = Instant::now();
    let profiles = fetch_profiles(transport, url).await?;
    Ok(Outcome {
        profiles,
        elapsed: started.elapsed(),
    })
}

async fn fetch_profiles<T: Transport>(transport: &T, url: &str) -> Result<Vec<Profile>> {
    let body = transport.get(url).await?;
    api::decode_page(&body)
}
