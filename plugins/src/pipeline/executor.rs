//! Pipeline executor: translates a validated task into the staged sequence of
//! external invocations (discover → retrieve → filter → summarize) and folds
//! their outputs into one result envelope.
//!
//! Failure policy: validation and infrastructure failures are fatal and
//! immediate; a business failure from discover/filter/summarize is passed
//! through unchanged; per-source retrieval failures are absorbed as warnings
//! unless every source failed.

use std::sync::Arc;

use futures::StreamExt;
use tracing::Instrument;
use uuid::Uuid;

use newscout_core::envelope::{
    DiscoverPayload, FilterPayload, RelevantSection, ResultKind, RetrievePayload, StageEnvelope,
    SummaryRequest,
};
use newscout_core::runner::{StageKind, StageRunner};
use newscout_core::task::{SummarySpec, Task, TaskRequest};

pub struct PipelineExecutor {
    runner: Arc<dyn StageRunner>,
    max_parallel: usize,
}

impl PipelineExecutor {
    pub fn new(runner: Arc<dyn StageRunner>, max_parallel: usize) -> Self {
        Self {
            runner,
            max_parallel: max_parallel.max(1),
        }
    }

    /// Run one task to completion. Every outcome, including misuse, comes
    /// back as a [`StageEnvelope`]; this function does not fail.
    pub async fn run(&self, request: TaskRequest) -> StageEnvelope {
        let task = match request.validate() {
            Ok(task) => task,
            Err(message) => {
                tracing::warn!(error.message = %message, "rejected invalid task");
                return StageEnvelope::fail(message);
            }
        };

        let run_id = Uuid::new_v4();
        self.run_task(task)
            .instrument(tracing::info_span!("pipeline_run", run_id = %run_id))
            .await
    }

    async fn run_task(&self, task: Task) -> StageEnvelope {
        let query = task.query().to_string();
        let summary = task.summary();

        let sources = match task {
            Task::DirectFetch { url, .. } => vec![url],
            Task::MultiSourceFetch { urls, .. } => urls,
            Task::TopicResearch { topic, depth, .. } => {
                let urls = match self.discover(&topic, depth).await {
                    Ok(urls) => urls,
                    Err(envelope) => return envelope,
                };
                if urls.is_empty() {
                    tracing::info!(topic = %topic, "discover found no sources");
                    return StageEnvelope::ok_list(vec![]);
                }
                urls
            }
        };

        tracing::info!(sources = sources.len(), "retrieving sources");
        let fanout = self.fetch_sources(&sources).await;

        for warning in fanout.failures() {
            tracing::warn!(warning = %warning, "source excluded from combined text");
        }
        for warning in fanout.warnings() {
            tracing::warn!(warning = %warning, "retrieve provider warning");
        }

        if fanout.all_failed() {
            return StageEnvelope::fail_with_details(
                "all sources failed to retrieve",
                fanout.failures(),
            );
        }

        let combined = fanout.combined_text();
        if combined.is_empty() {
            tracing::info!("no article text retrieved, nothing to filter");
            return StageEnvelope::ok_list(vec![]);
        }

        let sections = match self.filter(&combined, &query).await {
            Ok(sections) => sections,
            Err(envelope) => return envelope,
        };

        match summary {
            Some(spec) => self.summarize(&sections, spec).await,
            None => StageEnvelope::ok_list(sections.iter().map(RelevantSection::to_value).collect()),
        }
    }

    async fn discover(&self, topic: &str, depth: u32) -> Result<Vec<String>, StageEnvelope> {
        tracing::info!(topic = %topic, depth, "discovering sources");
        let envelope = self
            .runner
            .invoke(
                StageKind::Discover,
                &[topic.to_string(), depth.to_string()],
            )
            .await
            .map_err(infrastructure_failure)?;
        if !envelope.success {
            return Err(envelope);
        }
        let payload: DiscoverPayload = envelope
            .decode_result(StageKind::Discover.script())
            .map_err(StageEnvelope::fail)?;
        Ok(payload.discovered_urls)
    }

    /// Bounded concurrent retrieval. `buffered` keeps completion results in
    /// input order, which the fan-in contract requires.
    async fn fetch_sources(&self, sources: &[String]) -> super::FanoutOutcome {
        let outcomes = futures::stream::iter(sources.iter().cloned())
            .map(|url| {
                let runner = Arc::clone(&self.runner);
                async move {
                    match runner.invoke(StageKind::Retrieve, &[url.clone()]).await {
                        Err(e) => super::SourceOutcome::failed(url, infrastructure_message(&e)),
                        Ok(envelope) if !envelope.success => {
                            let error = envelope.error_text(StageKind::Retrieve.script());
                            super::SourceOutcome::failed(url, error)
                        }
                        Ok(envelope) => {
                            let warnings = envelope.errors.clone();
                            match envelope.decode_result::<RetrievePayload>(StageKind::Retrieve.script())
                            {
                                Ok(payload) => super::SourceOutcome::fetched(
                                    url,
                                    payload.article_text,
                                    warnings,
                                ),
                                Err(message) => super::SourceOutcome::failed(url, message),
                            }
                        }
                    }
                }
            })
            .buffered(self.max_parallel)
            .collect::<Vec<_>>()
            .await;
        super::FanoutOutcome::new(outcomes)
    }

    async fn filter(
        &self,
        combined: &str,
        query: &str,
    ) -> Result<Vec<RelevantSection>, StageEnvelope> {
        tracing::info!(text_len = combined.len(), "filtering combined text");
        let envelope = self
            .runner
            .invoke(
                StageKind::Filter,
                &[combined.to_string(), query.to_string()],
            )
            .await
            .map_err(infrastructure_failure)?;
        if !envelope.success {
            return Err(envelope);
        }
        let payload: FilterPayload = envelope
            .decode_result(StageKind::Filter.script())
            .map_err(StageEnvelope::fail)?;
        Ok(payload.relevant_sections)
    }

    async fn summarize(&self, sections: &[RelevantSection], spec: SummarySpec) -> StageEnvelope {
        let request = SummaryRequest {
            chunks: sections.iter().map(|s| s.chunk.clone()).collect(),
            mode: spec.mode,
            length: spec.length,
        };
        let payload = match serde_json::to_string(&request) {
            Ok(p) => p,
            Err(e) => return StageEnvelope::fail(format!("failed to encode summary request: {e}")),
        };

        tracing::info!(chunks = request.chunks.len(), mode = ?spec.mode, length = ?spec.length, "summarizing");
        match self.runner.invoke(StageKind::Summarize, &[payload]).await {
            Err(e) => infrastructure_failure(e),
            Ok(envelope) if !envelope.success => envelope,
            Ok(mut envelope) => {
                // Provider-defined summary object, passed through verbatim.
                envelope.result_type.get_or_insert(ResultKind::Object);
                envelope
            }
        }
    }
}

fn infrastructure_message(e: &newscout_core::error::StageError) -> String {
    format!("infrastructure error: {e}")
}

fn infrastructure_failure(e: newscout_core::error::StageError) -> StageEnvelope {
    tracing::error!(error.message = %e, "stage infrastructure failure");
    StageEnvelope::fail(infrastructure_message(&e))
}
