use thiserror::Error;

/// Infrastructure failures raised by a stage runner.
///
/// A stage that *ran* and reported a problem (non-zero exit, `success:false`
/// envelope, malformed stdout) is not an error at this level; it comes back as
/// a failure [`StageEnvelope`](crate::envelope::StageEnvelope). `StageError`
/// covers the cases where the external process never produced a usable
/// response at all.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stage {stage} timed out after {ms}ms")]
    Timeout { stage: &'static str, ms: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
