//! Task model: the raw, version-tolerant request shape and the validated
//! tagged variant the pipeline dispatches on.
//!
//! The request schema accreted fields over time (`url`, then `urls`, then
//! `topic`/`depth`), so hosts send a bag of optional fields. Validation
//! resolves that bag into exactly one variant at the boundary; pipeline code
//! never re-checks field presence.

use serde::{Deserialize, Serialize};

/// Default number of sources the discover stage is asked for.
pub const DEFAULT_DISCOVER_DEPTH: u32 = 5;

/// Raw request shape as received from a host. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,

    #[serde(
        rename = "summaryMode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub summary_mode: Option<SummaryMode>,

    #[serde(
        rename = "summaryLength",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub summary_length: Option<SummaryLength>,
}

/// Validated task, exactly one source shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    DirectFetch {
        url: String,
        query: String,
        summary: Option<SummarySpec>,
    },
    MultiSourceFetch {
        urls: Vec<String>,
        query: String,
        summary: Option<SummarySpec>,
    },
    TopicResearch {
        topic: String,
        depth: u32,
        query: String,
        summary: Option<SummarySpec>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

/// Summarization options. Present on a task iff the host asked for a
/// synthesized report; absent fields default to `single`/`medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySpec {
    pub mode: SummaryMode,
    pub length: SummaryLength,
}

impl Default for SummarySpec {
    fn default() -> Self {
        Self {
            mode: SummaryMode::Single,
            length: SummaryLength::Medium,
        }
    }
}

impl TaskRequest {
    /// Resolve the optional-field bag into a validated [`Task`].
    ///
    /// Exactly one of `url` / `urls` / `topic` must be present, `query` is
    /// mandatory and non-blank, `urls` must be non-empty, and `depth` (topic
    /// tasks only) must be at least 1.
    pub fn validate(self) -> Result<Task, String> {
        let query = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => return Err("task is missing required field 'query'".to_string()),
        };

        let summary = match (self.summary_mode, self.summary_length) {
            (None, None) => None,
            (mode, length) => Some(SummarySpec {
                mode: mode.unwrap_or(SummaryMode::Single),
                length: length.unwrap_or(SummaryLength::Medium),
            }),
        };

        let populated =
            usize::from(self.url.is_some()) + usize::from(self.urls.is_some()) + usize::from(self.topic.is_some());
        if populated == 0 {
            return Err("task must set one of 'url', 'urls' or 'topic'".to_string());
        }
        if populated > 1 {
            return Err("task fields 'url', 'urls' and 'topic' are mutually exclusive".to_string());
        }

        if let Some(url) = self.url {
            if url.trim().is_empty() {
                return Err("task field 'url' is empty".to_string());
            }
            return Ok(Task::DirectFetch { url, query, summary });
        }

        if let Some(urls) = self.urls {
            if urls.is_empty() || urls.iter().all(|u| u.trim().is_empty()) {
                return Err("task field 'urls' contains no usable URLs".to_string());
            }
            return Ok(Task::MultiSourceFetch { urls, query, summary });
        }

        let topic = self.topic.expect("presence checked above");
        if topic.trim().is_empty() {
            return Err("task field 'topic' is empty".to_string());
        }
        let depth = self.depth.unwrap_or(DEFAULT_DISCOVER_DEPTH);
        if depth == 0 {
            return Err("task field 'depth' must be at least 1".to_string());
        }
        Ok(Task::TopicResearch {
            topic,
            depth,
            query,
            summary,
        })
    }
}

impl Task {
    pub fn query(&self) -> &str {
        match self {
            Task::DirectFetch { query, .. }
            | Task::MultiSourceFetch { query, .. }
            | Task::TopicResearch { query, .. } => query,
        }
    }

    pub fn summary(&self) -> Option<SummarySpec> {
        match self {
            Task::DirectFetch { summary, .. }
            | Task::MultiSourceFetch { summary, .. }
            | Task::TopicResearch { summary, .. } => *summary,
        }
    }
}
