//! Fetch cycle behavior over scripted transports.
//!
//! These tests drive the session the same way the interactive loop
//! does: take the busy flag, snapshot the filter, run the cycle, apply
//! the result. The transports are mocks, so every completion kind and
//! timing shape can be produced on demand.

use duofetch::Result;
use duofetch::api::{Filter, Gender};
use duofetch::client::Transport;
use duofetch::error::Error;
use duofetch::fetch::{ClientKind, Fetcher, Target};
use duofetch::session::Session;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BASE_URL: &str = "https://api.test";

#[derive(Debug)]
enum Reply {
    Body(String),
    Status(u16),
    Network,
}

/// Scripted transport: always answers with the configured reply,
/// optionally after a delay. Clones share the call and URL records.
#[derive(Clone, Debug)]
struct MockTransport {
    reply: Arc<Reply>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    fn with_reply(reply: Reply) -> Self {
        MockTransport {
            reply: Arc::new(reply),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn ok(body: String) -> Self {
        Self::with_reply(Reply::Body(body))
    }

    fn status(code: u16) -> Self {
        Self::with_reply(Reply::Status(code))
    }

    fn network() -> Self {
        Self::with_reply(Reply::Network)
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &*self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(code) => Err(Error::Status {
                code: *code,
                reason: "Not Found".to_string(),
            }),
            Reply::Network => Err(Error::Network),
        }
    }
}

/// Response body with `count` profiles whose uuids start with `tag`.
fn page_body(count: usize, tag: &str) -> String {
    let results: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "gender": "female",
                "name": {"title": "Ms", "first": format!("First{i}"), "last": "Example"},
                "email": format!("first{i}@example.com"),
                "login": {"uuid": format!("{tag}-{i}")},
                "dob": {"age": 30 + i as u32},
                "location": {"city": "Oslo", "country": "Norway"},
                "nat": "NO",
            })
        })
        .collect();
    serde_json::json!({"results": results, "info": {"results": count}}).to_string()
}

fn fetcher(reqwest: MockTransport, ureq: MockTransport) -> Fetcher<MockTransport, MockTransport> {
    Fetcher::new(BASE_URL, reqwest, ureq)
}

/// One trigger, end to end, the way the interactive loop runs it.
async fn drive<R: Transport, U: Transport>(
    session: &mut Session,
    fetcher: &Fetcher<R, U>,
    target: Target,
) {
    if !session.begin() {
        return;
    }
    let filter = session.filter().clone();
    let result = fetcher.run(target, &filter).await;
    session.apply(result);
}

#[tokio::test]
async fn inflight_cycle_drops_new_triggers() {
    let reqwest = MockTransport::ok(page_body(12, "r")).delayed(Duration::from_millis(30));
    let ureq = MockTransport::ok(page_body(12, "u")).delayed(Duration::from_millis(30));
    let fetcher = Arc::new(fetcher(reqwest.clone(), ureq.clone()));
    let mut session = Session::new(Filter::default());

    assert!(session.begin());
    let inflight = {
        let fetcher = Arc::clone(&fetcher);
        let filter = session.filter().clone();
        tokio::spawn(async move { fetcher.run(Target::Both, &filter).await })
    };

    // Triggers landing while the cycle runs are dropped, not queued, so
    // the transports never see them.
    assert!(!session.begin());
    assert!(!session.begin());

    session.apply(inflight.await.expect("fetch task"));
    assert!(!session.is_busy());
    assert_eq!(reqwest.calls(), 1);
    assert_eq!(ureq.calls(), 1);
}

#[tokio::test]
async fn busy_releases_after_every_completion_kind() {
    let mut session = Session::new(Filter::default());

    let ok = fetcher(
        MockTransport::ok(page_body(1, "a")),
        MockTransport::ok(page_body(1, "b")),
    );
    drive(&mut session, &ok, Target::Both).await;
    assert!(!session.is_busy());

    let status = fetcher(MockTransport::status(404), MockTransport::status(404));
    drive(&mut session, &status, Target::Both).await;
    assert!(!session.is_busy());

    let network = fetcher(MockTransport::network(), MockTransport::network());
    drive(&mut session, &network, Target::Both).await;
    assert!(!session.is_busy());

    let garbage = fetcher(
        MockTransport::ok("not json".to_string()),
        MockTransport::ok("not json".to_string()),
    );
    drive(&mut session, &garbage, Target::Both).await;
    assert!(!session.is_busy());
}

#[tokio::test]
async fn joint_failure_discards_the_partial_success() {
    let mut session = Session::new(Filter::default());

    let healthy = fetcher(
        MockTransport::ok(page_body(12, "old-r")),
        MockTransport::ok(page_body(12, "old-u")),
    );
    drive(&mut session, &healthy, Target::Both).await;

    // One path succeeds with fresh data, the other dies; the fresh
    // batch must not reach the session.
    let mixed = fetcher(
        MockTransport::ok(page_body(12, "new-r")),
        MockTransport::network(),
    );
    drive(&mut session, &mixed, Target::Both).await;

    assert_eq!(
        session.error(),
        Some("network error: no response received from the server")
    );
    let reqwest_outcome = session.outcome(ClientKind::Reqwest).expect("old outcome");
    assert!(reqwest_outcome.profiles[0].login.uuid.starts_with("old-r"));
    let ureq_outcome = session.outcome(ClientKind::Ureq).expect("old outcome");
    assert!(ureq_outcome.profiles[0].login.uuid.starts_with("old-u"));
}

#[tokio::test]
async fn joint_success_shares_one_combined_elapsed_time() {
    let fetcher = fetcher(
        MockTransport::ok(page_body(12, "r")).delayed(Duration::from_millis(40)),
        MockTransport::ok(page_body(12, "u")).delayed(Duration::from_millis(5)),
    );
    let mut session = Session::new(Filter::default());

    drive(&mut session, &fetcher, Target::Both).await;

    let reqwest_outcome = session.outcome(ClientKind::Reqwest).expect("outcome");
    let ureq_outcome = session.outcome(ClientKind::Ureq).expect("outcome");
    assert_eq!(reqwest_outcome.elapsed, ureq_outcome.elapsed);
    // The shared time covers the slower path.
    assert!(reqwest_outcome.elapsed >= Duration::from_millis(40));
    assert_eq!(reqwest_outcome.profiles.len(), 12);
    assert_eq!(ureq_outcome.profiles.len(), 12);
}

#[tokio::test]
async fn failures_surface_as_classified_messages() {
    let mut session = Session::new(Filter::default());

    let status = fetcher(
        MockTransport::status(404),
        MockTransport::ok(page_body(1, "u")),
    );
    drive(&mut session, &status, Target::Both).await;
    assert_eq!(session.error(), Some("HTTP error: 404 - Not Found"));

    let network = fetcher(
        MockTransport::network(),
        MockTransport::ok(page_body(1, "u")),
    );
    drive(&mut session, &network, Target::Both).await;
    assert_eq!(
        session.error(),
        Some("network error: no response received from the server")
    );

    let garbage = fetcher(
        MockTransport::ok("<html>oops</html>".to_string()),
        MockTransport::ok(page_body(1, "u")),
    );
    drive(&mut session, &garbage, Target::Both).await;
    let message = session.error().expect("decode failure");
    assert!(
        message.starts_with("response decoding failed:"),
        "got: {message}"
    );
}

#[tokio::test]
async fn single_path_cycle_touches_only_its_slot() {
    let reqwest = MockTransport::ok(page_body(3, "r"));
    let ureq = MockTransport::ok(page_body(3, "u"));
    let fetcher = fetcher(reqwest.clone(), ureq.clone());
    let mut session = Session::new(Filter::default());

    drive(&mut session, &fetcher, Target::Reqwest).await;

    assert!(session.outcome(ClientKind::Reqwest).is_some());
    assert!(session.outcome(ClientKind::Ureq).is_none());
    assert_eq!(reqwest.calls(), 1);
    assert_eq!(ureq.calls(), 0);
}

#[tokio::test]
async fn next_cycle_clears_the_error_banner() {
    let mut session = Session::new(Filter::default());

    let failing = fetcher(MockTransport::network(), MockTransport::network());
    drive(&mut session, &failing, Target::Both).await;
    assert!(session.error().is_some());

    let healthy = fetcher(
        MockTransport::ok(page_body(12, "r")),
        MockTransport::ok(page_body(12, "u")),
    );
    drive(&mut session, &healthy, Target::Both).await;
    assert!(session.error().is_none());
    assert!(session.outcome(ClientKind::Reqwest).is_some());
}

#[tokio::test]
async fn previous_results_stay_visible_during_an_inflight_cycle() {
    let healthy = fetcher(
        MockTransport::ok(page_body(2, "old-r")),
        MockTransport::ok(page_body(2, "old-u")),
    );
    let mut session = Session::new(Filter::default());
    drive(&mut session, &healthy, Target::Both).await;

    // A new cycle starts; until it completes the old outcomes stay up.
    assert!(session.begin());
    assert!(session.is_busy());
    let reqwest_outcome = session.outcome(ClientKind::Reqwest).expect("old outcome");
    assert!(reqwest_outcome.profiles[0].login.uuid.starts_with("old-r"));
    assert!(session.outcome(ClientKind::Ureq).is_some());
}

#[tokio::test]
async fn filter_changes_refetch_with_the_updated_query() {
    let reqwest = MockTransport::ok(page_body(12, "r"));
    let ureq = MockTransport::ok(page_body(12, "u"));
    let fetcher = fetcher(reqwest.clone(), ureq.clone());
    let mut session = Session::new(Filter::default());

    drive(&mut session, &fetcher, Target::Both).await;
    assert_eq!(
        reqwest.urls()[0],
        "https://api.test/api/?results=12&gender=&nat=US"
    );

    assert!(session.set_country("FR"));
    drive(&mut session, &fetcher, Target::Both).await;
    assert_eq!(
        reqwest.urls()[1],
        "https://api.test/api/?results=12&gender=&nat=FR"
    );

    // Re-selecting the same country is not a change, so no cycle runs.
    assert!(!session.set_country("FR"));
    assert_eq!(reqwest.calls(), 2);

    assert!(session.set_gender(Gender::Female));
    drive(&mut session, &fetcher, Target::Both).await;
    assert_eq!(
        reqwest.urls()[2],
        "https://api.test/api/?results=12&gender=female&nat=FR"
    );
    assert_eq!(ureq.calls(), 3);
}
