mod executor;
mod fanout;

pub use executor::PipelineExecutor;
pub use fanout::{FanoutOutcome, SourceOutcome};
