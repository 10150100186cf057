use arbor::settings::EngineSettings;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ARBOR_CONFIG";

const DEFAULT_PATHS: [&str; 2] = ["configs/arbor.toml", "../../configs/arbor.toml"];

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineSettings>,
}

/// Read `configs/arbor.toml`: `ARBOR_CONFIG` first, then common relative paths.
pub fn read_config_toml_text() -> anyhow::Result<(PathBuf, String)> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("{CONFIG_ENV}={path} could not be read: {e}"))?;
        return Ok((PathBuf::from(path), text));
    }
    for p in &DEFAULT_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok((PathBuf::from(p), c));
        }
    }
    anyhow::bail!("Could not load arbor.toml from {:?}", DEFAULT_PATHS);
}

/// Parse and validate the `[engine]` table. A missing table yields defaults.
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse arbor.toml: {e}"))?;
    let settings = root.engine.unwrap_or_default();
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [engine] settings: {e}"))?;
    Ok(settings)
}

/// Load engine settings from an explicit file.
pub fn load_engine_settings_from(path: &Path) -> anyhow::Result<EngineSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_engine_settings(&text)
}

/// Load engine settings from the usual locations, falling back to defaults
/// when no config file exists. A file that exists but does not parse is an
/// error.
pub fn load_engine_settings() -> anyhow::Result<EngineSettings> {
    match read_config_toml_text() {
        Ok((path, text)) => {
            log::info!("Loading engine settings from {}", path.display());
            parse_engine_settings(&text)
        }
        Err(e) if env::var(CONFIG_ENV).is_err() => {
            log::debug!("{e}; using default engine settings");
            Ok(EngineSettings::default())
        }
        Err(e) => Err(e),
    }
}
