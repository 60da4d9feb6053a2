use async_trait::async_trait;

use crate::envelope::StageEnvelope;
use crate::error::StageError;

use super::types::StageKind;

/// One external capability invocation.
///
/// `Ok(envelope)` means the provider ran and answered (possibly with
/// `success:false`); `Err` means it never produced a usable response
/// (spawn failure, timeout, stream I/O). The transport behind this trait is
/// swappable without touching pipeline logic.
#[async_trait]
pub trait StageRunner: Send + Sync {
    async fn invoke(&self, stage: StageKind, args: &[String])
        -> Result<StageEnvelope, StageError>;
}
