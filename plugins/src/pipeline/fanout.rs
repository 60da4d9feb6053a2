//! Fan-in bookkeeping for the concurrent retrieval stage.
//!
//! Member calls run unordered, but outcomes are collected in the original
//! source-list order, so combined text and error aggregation stay
//! deterministic. "Partial failure" and "total failure" are computed
//! properties of the joined results, not inline conditionals in the executor.

/// Outcome of one retrieval call.
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    Fetched {
        url: String,
        text: String,
        /// Warnings the provider attached next to a successful result.
        warnings: Vec<String>,
    },
    Failed {
        url: String,
        error: String,
    },
}

impl SourceOutcome {
    pub fn fetched(url: String, text: String, warnings: Option<Vec<String>>) -> Self {
        Self::Fetched {
            url,
            text,
            warnings: warnings.unwrap_or_default(),
        }
    }

    pub fn failed(url: String, error: String) -> Self {
        Self::Failed { url, error }
    }
}

/// Joined fan-out results, in source-list order.
#[derive(Debug, Default)]
pub struct FanoutOutcome {
    pub outcomes: Vec<SourceOutcome>,
}

impl FanoutOutcome {
    pub fn new(outcomes: Vec<SourceOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty()
            && self
                .outcomes
                .iter()
                .all(|o| matches!(o, SourceOutcome::Failed { .. }))
    }

    /// Per-source failure strings, `"<url>: <error>"`, in source order.
    pub fn failures(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                SourceOutcome::Failed { url, error } => Some(format!("{url}: {error}")),
                SourceOutcome::Fetched { .. } => None,
            })
            .collect()
    }

    /// Provider-reported warnings from successful sources, in source order.
    pub fn warnings(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .flat_map(|o| match o {
                SourceOutcome::Fetched { warnings, .. } => warnings.clone(),
                SourceOutcome::Failed { .. } => vec![],
            })
            .collect()
    }

    /// Bodies of successful sources, non-empty ones, concatenated in source
    /// order with a blank-line separator.
    pub fn combined_text(&self) -> String {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                SourceOutcome::Fetched { text, .. } => {
                    let trimmed = text.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                }
                SourceOutcome::Failed { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
