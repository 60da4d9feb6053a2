//! Plugin lifecycle controller.
//!
//! Wraps the pipeline executor behind a small `uninitialized → offline →
//! online` state machine and refuses to route requests unless the plugin is
//! online. Misuse never panics and never returns `Err`; every path yields the
//! uniform result envelope.

use std::sync::{Arc, Mutex};

use newscout_core::config::StrategyConfig;
use newscout_core::envelope::StageEnvelope;
use newscout_core::runner::{ProcessStageRunner, StageRunner};
use newscout_core::task::TaskRequest;

use crate::pipeline::PipelineExecutor;

pub const OFFLINE_ERROR: &str = "plugin offline, cannot process requests";

/// Host-visible plugin state. The integer codes are the wire representation
/// hosts historically relied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Uninitialized,
    Offline,
    Online,
}

impl PluginState {
    pub fn code(self) -> i32 {
        match self {
            PluginState::Uninitialized => -2,
            PluginState::Offline => 0,
            PluginState::Online => 1,
        }
    }
}

pub struct NewsScoutPlugin {
    state: Mutex<PluginState>,
    executor: PipelineExecutor,
}

impl NewsScoutPlugin {
    /// Construct from configuration with the subprocess transport.
    ///
    /// Never fails; a bad interpreter path or script directory surfaces on
    /// first use. The plugin comes up offline.
    pub fn new(cfg: &StrategyConfig) -> Self {
        let runner: Arc<dyn StageRunner> = Arc::new(ProcessStageRunner::new(cfg));
        let plugin = Self::with_runner(runner, cfg.max_parallel_fetches);
        tracing::info!(
            interpreter = %cfg.interpreter_path,
            script_dir = %cfg.script_dir,
            "plugin initialized, currently offline"
        );
        plugin
    }

    /// Construct over an arbitrary stage transport.
    pub fn with_runner(runner: Arc<dyn StageRunner>, max_parallel: usize) -> Self {
        let plugin = Self {
            state: Mutex::new(PluginState::Uninitialized),
            executor: PipelineExecutor::new(runner, max_parallel),
        };
        plugin.set_state(PluginState::Offline);
        plugin
    }

    /// Transition online. Idempotent; no health check is performed.
    pub fn online(&self) {
        self.set_state(PluginState::Online);
    }

    /// Transition offline, from any state. Idempotent.
    pub fn offline(&self) {
        self.set_state(PluginState::Offline);
    }

    pub fn state(&self) -> PluginState {
        *self.lock_state()
    }

    /// Integer state code for hosts (`-2` uninitialized, `0` offline,
    /// `1` online).
    pub fn state_code(&self) -> i32 {
        self.state().code()
    }

    /// Forward a task to the pipeline if the plugin is online; otherwise
    /// return a rejection envelope without invoking the executor.
    pub async fn submit(&self, request: TaskRequest) -> StageEnvelope {
        if self.state() != PluginState::Online {
            tracing::warn!("submit rejected: plugin is not online");
            return StageEnvelope::fail(OFFLINE_ERROR);
        }
        self.executor.run(request).await
    }

    // Single mutation path for the state field. The lock is held only for the
    // enum read/write, never across an await.
    fn set_state(&self, next: PluginState) {
        let mut state = self.lock_state();
        if *state != next {
            tracing::info!(from = ?*state, to = ?next, "plugin state transition");
        }
        *state = next;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, PluginState> {
        // The guarded value is a plain enum, so a poisoned lock cannot hold a
        // torn state; recover instead of propagating the panic.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use newscout_core::error::StageError;
    use newscout_core::runner::StageKind;

    struct NoopRunner;

    #[async_trait]
    impl StageRunner for NoopRunner {
        async fn invoke(
            &self,
            _stage: StageKind,
            _args: &[String],
        ) -> Result<StageEnvelope, StageError> {
            Ok(StageEnvelope::fail("unexpected invocation"))
        }
    }

    fn plugin() -> NewsScoutPlugin {
        NewsScoutPlugin::with_runner(Arc::new(NoopRunner), 4)
    }

    #[test]
    fn constructed_plugin_is_offline() {
        let p = plugin();
        assert_eq!(p.state(), PluginState::Offline);
        assert_eq!(p.state_code(), 0);
    }

    #[test]
    fn online_and_offline_are_idempotent() {
        let p = plugin();
        p.online();
        p.online();
        assert_eq!(p.state(), PluginState::Online);
        assert_eq!(p.state_code(), 1);

        p.offline();
        p.offline();
        assert_eq!(p.state(), PluginState::Offline);
    }

    #[test]
    fn state_machine_is_reusable_across_cycles() {
        let p = plugin();
        for _ in 0..3 {
            p.online();
            assert_eq!(p.state(), PluginState::Online);
            p.offline();
            assert_eq!(p.state(), PluginState::Offline);
        }
    }

    #[test]
    fn state_codes_match_wire_contract() {
        assert_eq!(PluginState::Uninitialized.code(), -2);
        assert_eq!(PluginState::Offline.code(), 0);
        assert_eq!(PluginState::Online.code(), 1);
    }
}
