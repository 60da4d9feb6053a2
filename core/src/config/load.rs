use std::path::Path;

use super::types::AppConfig;

pub fn load_default() -> anyhow::Result<AppConfig> {
    load_from(Path::new("newscout.toml"))
}

/// Load configuration from `path`, falling back to defaults when the file is
/// absent, then apply environment overrides.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg: AppConfig = if path.exists() {
        let s = std::fs::read_to_string(path)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (highest priority)
    if let Ok(v) = std::env::var("NEWSCOUT_INTERPRETER") {
        if !v.trim().is_empty() {
            cfg.strategy.interpreter_path = v;
        }
    }
    if let Ok(v) = std::env::var("NEWSCOUT_SCRIPT_DIR") {
        if !v.trim().is_empty() {
            cfg.strategy.script_dir = v;
        }
    }
    if let Ok(v) = std::env::var("NEWSCOUT_STAGE_TIMEOUT_MS") {
        if let Ok(ms) = v.trim().parse::<u64>() {
            cfg.strategy.stage_timeout_ms = ms;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.strategy.interpreter_path, "python3");
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newscout.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[strategy]\nstage_timeout_ms = 5000").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.strategy.stage_timeout_ms, 5000);
    }
}
