mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::MockRunner;
use newscout_core::runner::StageRunner;
use newscout_core::task::TaskRequest;
use newscout_plugins::plugin::OFFLINE_ERROR;
use newscout_plugins::{NewsScoutPlugin, PluginState};

fn valid_task() -> TaskRequest {
    TaskRequest {
        url: Some("https://example.com".to_string()),
        query: Some("q".to_string()),
        ..TaskRequest::default()
    }
}

#[tokio::test]
async fn submit_before_online_is_rejected_without_stage_calls() {
    let runner = Arc::new(MockRunner::new());
    let plugin = NewsScoutPlugin::with_runner(Arc::clone(&runner) as Arc<dyn StageRunner>, 4);

    let result = plugin.submit(valid_task()).await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some(OFFLINE_ERROR));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn offline_gating_applies_regardless_of_task_validity() {
    let runner = Arc::new(MockRunner::new());
    let plugin = NewsScoutPlugin::with_runner(Arc::clone(&runner) as Arc<dyn StageRunner>, 4);

    // An invalid task gets the same gating message offline.
    let result = plugin.submit(TaskRequest::default()).await;
    assert_eq!(result.error.as_deref(), Some(OFFLINE_ERROR));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn invalid_tasks_never_reach_a_stage_when_online() {
    let runner = Arc::new(MockRunner::new());
    let plugin = NewsScoutPlugin::with_runner(Arc::clone(&runner) as Arc<dyn StageRunner>, 4);
    plugin.online();

    // No source field.
    let result = plugin
        .submit(TaskRequest {
            query: Some("q".to_string()),
            ..TaskRequest::default()
        })
        .await;
    assert!(!result.success);

    // Missing query.
    let result = plugin
        .submit(TaskRequest {
            url: Some("https://example.com".to_string()),
            ..TaskRequest::default()
        })
        .await;
    assert!(!result.success);

    // Mutually exclusive source fields.
    let result = plugin
        .submit(TaskRequest {
            url: Some("https://example.com".to_string()),
            topic: Some("ai".to_string()),
            query: Some("q".to_string()),
            ..TaskRequest::default()
        })
        .await;
    assert!(!result.success);

    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn plugin_processes_requests_again_after_an_offline_cycle() {
    let runner = Arc::new(MockRunner::new());
    runner.on_url_text("https://example.com", "");
    let plugin = NewsScoutPlugin::with_runner(Arc::clone(&runner) as Arc<dyn StageRunner>, 4);

    plugin.online();
    plugin.offline();
    assert_eq!(plugin.state(), PluginState::Offline);
    let rejected = plugin.submit(valid_task()).await;
    assert!(!rejected.success);

    plugin.online();
    let accepted = plugin.submit(valid_task()).await;
    assert!(accepted.success, "{accepted:?}");
}
