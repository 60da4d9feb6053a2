//! Shared test transport: a scripted [`StageRunner`] that records every
//! invocation and replays canned responses.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use newscout_core::envelope::StageEnvelope;
use newscout_core::error::StageError;
use newscout_core::runner::{StageKind, StageRunner};

type MockResponse = Result<StageEnvelope, StageError>;

#[derive(Default)]
pub struct MockRunner {
    stage_queues: Mutex<HashMap<StageKind, VecDeque<MockResponse>>>,
    // Retrieval fan-out calls complete in nondeterministic order, so retrieve
    // responses are keyed by URL instead of queued.
    url_responses: Mutex<HashMap<String, MockResponse>>,
    calls: Mutex<Vec<(StageKind, Vec<String>)>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, stage: StageKind, response: MockResponse) {
        self.stage_queues
            .lock()
            .unwrap()
            .entry(stage)
            .or_default()
            .push_back(response);
    }

    pub fn push_envelope(&self, stage: StageKind, envelope: serde_json::Value) {
        let envelope: StageEnvelope =
            serde_json::from_value(envelope).expect("mock envelope must deserialize");
        self.push(stage, Ok(envelope));
    }

    pub fn push_infra(&self, stage: StageKind) {
        self.push(stage, Err(StageError::Spawn("mock spawn failure".into())));
    }

    /// Script the retrieve response for one URL.
    pub fn on_url(&self, url: &str, response: MockResponse) {
        self.url_responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    pub fn on_url_text(&self, url: &str, article_text: &str) {
        self.on_url(
            url,
            Ok(StageEnvelope::ok(
                serde_json::json!({ "source_url": url, "article_text": article_text }),
                newscout_core::envelope::ResultKind::Object,
            )),
        );
    }

    pub fn on_url_failure(&self, url: &str, error: &str) {
        self.on_url(url, Ok(StageEnvelope::fail(error)));
    }

    pub fn calls(&self) -> Vec<(StageKind, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, stage: StageKind) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|(s, _)| *s == stage)
            .map(|(_, args)| args)
            .collect()
    }
}

#[async_trait]
impl StageRunner for MockRunner {
    async fn invoke(
        &self,
        stage: StageKind,
        args: &[String],
    ) -> Result<StageEnvelope, StageError> {
        self.calls.lock().unwrap().push((stage, args.to_vec()));

        if stage == StageKind::Retrieve {
            if let Some(url) = args.first() {
                if let Some(response) = self.url_responses.lock().unwrap().remove(url) {
                    return response;
                }
            }
        }

        self.stage_queues
            .lock()
            .unwrap()
            .get_mut(&stage)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Ok(StageEnvelope::fail(format!(
                    "unexpected invocation of {stage}"
                )))
            })
    }
}
