//! TOML configuration: controller defaults and replay scenarios.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::gnc::ControllerParameters;
use crate::vehicle::{EngineSource, VehicleState};

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario has no ticks")]
    EmptyScenario,
    #[error("parameter {name} must be positive and finite, got {value}")]
    NonPositiveGain { name: &'static str, value: f64 },
}

/// Autopilot settings. Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub parameters: ControllerParameters,
    /// Fixed tick length used to timestamp telemetry, s.
    pub tick_seconds: Option<f64>,
}

impl AutopilotConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: AutopilotConfig = toml::from_str(text)?;
        let p = &cfg.parameters;
        for (name, value) in [
            ("compensation_multiplier", p.compensation_multiplier),
            ("compensation_power", p.compensation_power),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositiveGain { name, value });
            }
        }
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn tick_seconds(&self) -> f64 {
        self.tick_seconds.unwrap_or(0.02)
    }
}

/// One recorded host tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioTick {
    /// Active vessel; absent means nothing is being flown.
    #[serde(default)]
    pub vessel: Option<String>,
    pub vehicle: VehicleState,
    #[serde(default)]
    pub engines: Vec<EngineSource>,
    /// Button pressed before this tick: a speed, "auto" or "off".
    #[serde(default)]
    pub press: Option<Press>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Press {
    Speed(f64),
    Button(Button),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Auto,
    Off,
}

/// Sequence of host ticks replayed through a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(rename = "tick")]
    pub ticks: Vec<ScenarioTick>,
}

impl Scenario {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = toml::from_str(text)?;
        if scenario.ticks.is_empty() {
            return Err(ConfigError::EmptyScenario);
        }
        Ok(scenario)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
