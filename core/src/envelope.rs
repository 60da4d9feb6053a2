//! Wire envelope shared by every pipeline stage and by the pipeline itself.
//!
//! Every capability provider prints exactly one JSON envelope on stdout:
//! `{ "success": bool, "result": .., "error": .., "resultType": .. }`.
//! The pipeline returns the same shape to its caller, so a host never has to
//! distinguish "stage said no" from "pipeline said no" structurally.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::task::{SummaryLength, SummaryMode};

/// Tag describing how `result` should be interpreted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    List,
    Object,
    Json,
}

/// Uniform success/error envelope.
///
/// Invariants: `success == true` implies `error == None`; `success == false`
/// implies `result == None`, except for the all-sources-failed outcome where
/// `result` carries the per-source error strings.
///
/// Deserialization is lenient on purpose: a provider that prints `{}` (the
/// normalized empty-stdout case) decodes to a failure envelope with no error
/// text rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageEnvelope {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(
        rename = "resultType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub result_type: Option<ResultKind>,

    /// Per-source warnings a provider may attach next to a successful result
    /// (the retrieve provider does this for partial multi-url failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl StageEnvelope {
    pub fn ok(result: Value, kind: ResultKind) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            result_type: Some(kind),
            errors: None,
        }
    }

    pub fn ok_list(items: Vec<Value>) -> Self {
        Self::ok(Value::Array(items), ResultKind::List)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.into()),
            result_type: None,
            errors: None,
        }
    }

    /// Failure envelope that keeps per-source detail alongside the summary
    /// message (used when every retrieval in a fan-out failed).
    pub fn fail_with_details(message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            success: false,
            result: Some(Value::Array(
                details.into_iter().map(Value::String).collect(),
            )),
            error: Some(message.into()),
            result_type: Some(ResultKind::List),
            errors: None,
        }
    }

    /// Error text for a failure envelope, with a stable fallback for
    /// providers that report failure without a message (or printed nothing).
    pub fn error_text(&self, stage: &str) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| format!("{stage} reported failure without an error message"))
    }

    /// Decode `result` into a typed stage payload.
    pub fn decode_result<T: serde::de::DeserializeOwned>(&self, stage: &str) -> Result<T, String> {
        let value = self
            .result
            .clone()
            .ok_or_else(|| format!("{stage} returned no result payload"))?;
        serde_json::from_value(value)
            .map_err(|e| format!("{stage} returned a malformed payload: {e}"))
    }
}

/// `result` payload of the discover stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverPayload {
    pub discovered_urls: Vec<String>,
}

/// `result` payload of the retrieve stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub article_text: String,
}

/// `result` payload of the filter stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPayload {
    pub relevant_sections: Vec<RelevantSection>,
}

/// One relevant excerpt. Providers may attach extra fields (scores, offsets);
/// they are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevantSection {
    pub chunk: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RelevantSection {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Argument payload handed to the summarize stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub chunks: Vec<String>,
    pub mode: SummaryMode,
    pub length: SummaryLength,
}
