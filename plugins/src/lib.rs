pub mod pipeline;
pub mod plugin;

pub use pipeline::PipelineExecutor;
pub use plugin::{NewsScoutPlugin, PluginState};
