use clap::Parser;
mod cli;

use newscout_core::config::{self, LoggingConfig};
use newscout_core::error::CliError;
use newscout_plugins::NewsScoutPlugin;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();

    let mut cfg = match args.config.as_deref() {
        Some(path) => config::load_from(path).map_err(|e| CliError::Config(e.to_string()))?,
        None => config::load_default().map_err(|e| CliError::Config(e.to_string()))?,
    };
    if let Some(interpreter) = args.interpreter.clone() {
        cfg.strategy.interpreter_path = interpreter;
    }
    if let Some(script_dir) = args.script_dir.clone() {
        cfg.strategy.script_dir = script_dir;
    }

    init_tracing(&cfg.logging).map_err(CliError::Command)?;

    let request = args.to_request();
    let plugin = NewsScoutPlugin::new(&cfg.strategy);
    plugin.online();

    let result = plugin.submit(request).await;
    tracing::info!(success = result.success, "pipeline run complete");

    plugin.offline();

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::Command(format!("failed to render result: {e}")))?;
    println!("{rendered}");

    Ok(if result.success { 0 } else { 1 })
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 1: pipeline reported failure (returned as a normal exit code)
    // 11: config error
    // 20: command / IO error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Command(_) => 20,
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("newscout"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("newscout.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
