//! Light state — the cached `(on, brightness)` snapshot and partial writes to it.

use serde::{Deserialize, Serialize};

/// Last known state of a light, group, or switchable appliance.
///
/// Appliances report no brightness; it defaults to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightState {
    pub on: bool,
    #[serde(rename = "bri", default)]
    pub brightness: u8,
}

impl LightState {
    #[must_use]
    pub fn new(on: bool, brightness: u8) -> Self {
        Self { on, brightness }
    }

    /// Merge the fields set in `patch` into this snapshot.
    pub fn apply(&mut self, patch: &StatePatch) {
        if let Some(on) = patch.on {
            self.on = on;
        }
        if let Some(brightness) = patch.brightness {
            self.brightness = brightness;
        }
    }

    /// A patch that writes this whole snapshot back.
    #[must_use]
    pub fn to_patch(self) -> StatePatch {
        StatePatch::new().on(self.on).brightness(self.brightness)
    }
}

/// A partial state write.
///
/// Serializes to the minimal JSON object containing only the set fields,
/// e.g. `{"on":true}` or `{"on":true,"bri":40}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub on: Option<bool>,
    #[serde(rename = "bri", skip_serializing_if = "Option::is_none", default)]
    pub brightness: Option<u8>,
}

impl StatePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    #[must_use]
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }
}

impl std::fmt::Display for StatePatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}
