//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `newscout_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, load_from, AppConfig, LoggingConfig, StrategyConfig};
pub use crate::envelope::{
    DiscoverPayload, FilterPayload, RelevantSection, ResultKind, RetrievePayload, StageEnvelope,
    SummaryRequest,
};
pub use crate::error::{CliError, StageError};
pub use crate::runner::{ProcessStageRunner, StageKind, StageRunner};
pub use crate::task::{SummaryLength, SummaryMode, SummarySpec, Task, TaskRequest};
