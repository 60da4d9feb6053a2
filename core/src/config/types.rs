use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub strategy: StrategyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "newscout_plugins=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Configuration for the external capability providers.
///
/// Read-only once the plugin is constructed; shared by every pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Interpreter used to launch the provider scripts.
    #[serde(default = "default_interpreter_path")]
    pub interpreter_path: String,

    /// Directory holding the provider scripts.
    #[serde(default = "default_script_dir")]
    pub script_dir: String,

    /// Deadline applied to each stage invocation. A timed-out call is
    /// reported as an infrastructure failure for that call.
    #[serde(default = "default_stage_timeout_ms")]
    pub stage_timeout_ms: u64,

    /// Upper bound on concurrent retrieval calls in a fan-out.
    #[serde(default = "default_max_parallel_fetches")]
    pub max_parallel_fetches: usize,
}

fn default_interpreter_path() -> String {
    "python3".to_string()
}

fn default_script_dir() -> String {
    "./scripts".to_string()
}

fn default_stage_timeout_ms() -> u64 {
    120_000
}

fn default_max_parallel_fetches() -> usize {
    8
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            interpreter_path: default_interpreter_path(),
            script_dir: default_script_dir(),
            stage_timeout_ms: default_stage_timeout_ms(),
            max_parallel_fetches: default_max_parallel_fetches(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_defaults() {
        let cfg: StrategyConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.interpreter_path, "python3");
        assert_eq!(cfg.stage_timeout_ms, 120_000);
        assert_eq!(cfg.max_parallel_fetches, 8);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [strategy]
            interpreter_path = "/usr/bin/python3"
            script_dir = "/opt/newscout/providers"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.strategy.interpreter_path, "/usr/bin/python3");
        assert_eq!(cfg.strategy.script_dir, "/opt/newscout/providers");
        assert_eq!(cfg.strategy.stage_timeout_ms, 120_000);
        assert!(cfg.logging.enabled);
    }
}
