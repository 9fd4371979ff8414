use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use graph_client::{AccessToken, UpstreamError, UpstreamSource};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedQuery {
    pub path: String,
    pub fields: Vec<String>,
    pub credential: String,
}

/// Upstream double answering every query with the same canned result.
#[derive(Clone)]
pub struct StubUpstream {
    response: Result<Value, String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl StubUpstream {
    pub fn ok(response: Value) -> Self { Self::with_response(Ok(response)) }

    pub fn failing(reason: &str) -> Self {
        Self::with_response(Err(reason.to_string()))
    }

    fn with_response(response: Result<Value, String>) -> Self {
        Self {
            response,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sleeps before answering, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UpstreamSource for StubUpstream {
    async fn query(
        &self, path: &str, fields: &[&str], credential: &AccessToken,
    ) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(RecordedQuery {
                path: path.to_string(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
                credential: credential.expose().to_string(),
            });
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.response
            .clone()
            .map_err(UpstreamError::Unavailable)
    }
}
