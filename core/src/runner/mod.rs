mod process;
mod traits;
pub mod types;

pub use process::ProcessStageRunner;
pub use traits::StageRunner;
pub use types::StageKind;
