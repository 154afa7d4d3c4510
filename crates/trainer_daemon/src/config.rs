use std::path::Path;

use anyhow::{Context, Result};
use trainer_core::GameConfig;

/// Command-line values that win over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub tick_ms: Option<u64>,
    pub poll_ms: Option<u64>,
    pub devices: Vec<String>,
}

/// Reads a JSON config; missing fields take their defaults. No path means
/// all defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing config file: {}", path.display()))
}

pub fn apply_overrides(mut config: GameConfig, overrides: &Overrides) -> GameConfig {
    if let Some(tick_ms) = overrides.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(poll_ms) = overrides.poll_ms {
        config.poll_interval_ms = poll_ms;
    }
    if !overrides.devices.is_empty() {
        config.devices.clone_from(&overrides.devices);
    }
    config
}

/// File, then overrides, then validation.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<GameConfig> {
    let config = apply_overrides(load_config(path)?, overrides);
    config.validate().context("invalid configuration")?;
    Ok(config)
}
