//! Tunable game constants.

use std::time::Duration;

use serde::Deserialize;

use crate::TrainerError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Task batches played per level before the level is scored.
    pub batches_per_level: u32,
    /// Level whose completion ends the game with a qualification.
    pub final_level: u32,
    /// Score ratio a level must strictly exceed to advance.
    pub pass_ratio: f64,
    pub tick_interval_ms: u64,
    pub poll_interval_ms: u64,
    pub intro_pause_ms: u64,
    pub feedback_pause_ms: u64,
    pub batch_pause_ms: u64,
    pub level_complete_pause_ms: u64,
    /// Device type names, in screen order.
    pub devices: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            batches_per_level: 3,
            final_level: 3,
            pass_ratio: 0.5,
            tick_interval_ms: 1000,
            poll_interval_ms: 50,
            intro_pause_ms: 2500,
            feedback_pause_ms: 1500,
            batch_pause_ms: 1000,
            level_complete_pause_ms: 3000,
            devices: vec![
                crate::devices::PUMP.to_string(),
                crate::devices::FAN.to_string(),
                crate::devices::COMPRESSOR.to_string(),
            ],
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), TrainerError> {
        if self.batches_per_level == 0 {
            return Err(TrainerError::InvalidConfig(
                "batches_per_level must be at least 1".to_string(),
            ));
        }
        if self.final_level == 0 {
            return Err(TrainerError::InvalidConfig(
                "final_level must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.pass_ratio) {
            return Err(TrainerError::InvalidConfig(format!(
                "pass_ratio must be in [0, 1), got {}",
                self.pass_ratio
            )));
        }
        if self.tick_interval_ms == 0 || self.poll_interval_ms == 0 {
            return Err(TrainerError::InvalidConfig(
                "tick and poll intervals must be non-zero".to_string(),
            ));
        }
        if self.devices.is_empty() {
            return Err(TrainerError::InvalidConfig(
                "at least one device is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn intro_pause(&self) -> Duration {
        Duration::from_millis(self.intro_pause_ms)
    }

    pub fn feedback_pause(&self) -> Duration {
        Duration::from_millis(self.feedback_pause_ms)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn level_complete_pause(&self) -> Duration {
        Duration::from_millis(self.level_complete_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"final_level": 2, "devices": ["Fan"]}"#).unwrap();
        assert_eq!(config.final_level, 2);
        assert_eq!(config.devices, vec!["Fan".to_string()]);
        assert_eq!(config.batches_per_level, 3);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad_ratio = GameConfig {
            pass_ratio: 1.0,
            ..GameConfig::default()
        };
        assert!(bad_ratio.validate().is_err());

        let no_devices = GameConfig {
            devices: Vec::new(),
            ..GameConfig::default()
        };
        assert!(no_devices.validate().is_err());

        let no_batches = GameConfig {
            batches_per_level: 0,
            ..GameConfig::default()
        };
        assert!(no_batches.validate().is_err());
    }
}
