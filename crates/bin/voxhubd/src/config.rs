//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `voxhub.toml` in the working directory, or at the path in
//! `VOXHUB_CONFIG`. Every field has a default so the file is optional, but
//! the gateway API key has to come from somewhere. Environment variables take
//! precedence over file values.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use voxhub_adapter_deconz::DeconzConfig;
use voxhub_app::animation::AnimationConfig;
use voxhub_app::dispatcher::IntentVocabulary;

const DEFAULT_PATH: &str = "voxhub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// deCONZ gateway connection.
    pub gateway: DeconzConfig,
    /// Device names as known to the gateway.
    pub devices: DevicesConfig,
    /// Feedback animation timing.
    pub animation: AnimationSettings,
    /// Words of the inference context.
    pub intents: IntentsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Names of the controlled devices.
///
/// The feedback light and the light group abort startup when missing; the
/// appliance and the auxiliary lights are skipped with a warning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    /// Light that pulses while listening.
    pub feedback_light: Option<String>,
    /// Switchable appliance.
    pub appliance: Option<String>,
    /// Primary light group; scenes are recalled on it.
    pub light_group: Option<String>,
    /// Extra lights switched together with the group.
    pub aux_lights: Vec<String>,
}

/// Feedback animation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub cadence_ms: u64,
    pub pulse_step: u8,
    pub min_brightness: u8,
    pub ack_brightness: u8,
    pub ack_cadence_ms: u64,
    /// Blink the feedback light after every executed command.
    pub acknowledge: bool,
}

/// Intent and slot vocabulary.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntentsConfig {
    pub change_state_intent: String,
    pub machine_aliases: Vec<String>,
    pub lights_alias: String,
    pub on_alias: String,
    pub off_alias: String,
    /// Spoken scene label → gateway scene name.
    pub scenes: BTreeMap<String, String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `VOXHUB_CONFIG` or `voxhub.toml` (if present),
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("VOXHUB_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("VOXHUB_GATEWAY_URL") {
            self.gateway.base_url = val;
        }
        if let Some(val) = var("VOXHUB_API_KEY") {
            self.gateway.api_key = val;
        }
        if let Some(val) = var("VOXHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gateway.base_url must not be empty".to_string(),
            ));
        }
        if self.gateway.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gateway.api_key must not be empty".to_string(),
            ));
        }
        if self.gateway.request_timeout_ms == 0 || self.gateway.read_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "gateway timeouts must be non-zero".to_string(),
            ));
        }
        if self.animation.cadence_ms == 0 || self.animation.ack_cadence_ms == 0 {
            return Err(ConfigError::Validation(
                "animation cadences must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl AnimationSettings {
    #[must_use]
    pub fn to_animation_config(&self) -> AnimationConfig {
        AnimationConfig {
            cadence: Duration::from_millis(self.cadence_ms),
            pulse_step: self.pulse_step,
            min_brightness: self.min_brightness,
            ack_brightness: self.ack_brightness,
            ack_cadence: Duration::from_millis(self.ack_cadence_ms),
            ..AnimationConfig::default()
        }
    }
}

impl IntentsConfig {
    #[must_use]
    pub fn to_vocabulary(&self) -> IntentVocabulary {
        IntentVocabulary {
            change_state_intent: self.change_state_intent.clone(),
            machine_aliases: self.machine_aliases.clone(),
            lights_alias: self.lights_alias.clone(),
            on_alias: self.on_alias.clone(),
            off_alias: self.off_alias.clone(),
            scenes: self.scenes.clone(),
        }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            feedback_light: Some("Kaffeebar".to_string()),
            appliance: Some("Kaffeemaschine".to_string()),
            light_group: None,
            aux_lights: Vec::new(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let defaults = AnimationConfig::default();
        Self {
            cadence_ms: millis(defaults.cadence),
            pulse_step: defaults.pulse_step,
            min_brightness: defaults.min_brightness,
            ack_brightness: defaults.ack_brightness,
            ack_cadence_ms: millis(defaults.ack_cadence),
            acknowledge: true,
        }
    }
}

impl Default for IntentsConfig {
    fn default() -> Self {
        let defaults = IntentVocabulary::default();
        Self {
            change_state_intent: defaults.change_state_intent,
            machine_aliases: defaults.machine_aliases,
            lights_alias: defaults.lights_alias,
            on_alias: defaults.on_alias,
            off_alias: defaults.off_alias,
            scenes: defaults.scenes,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "voxhubd=info,voxhub_app=info,voxhub_adapter_deconz=info".to_string(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
