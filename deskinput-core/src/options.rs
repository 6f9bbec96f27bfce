use serde::{Deserialize, Serialize};

/// 60 samples per second.
pub const DEFAULT_SAMPLING_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Tracker configuration.
///
/// Every field is optional when decoded; camelCase keys and the older
/// `lockPointer` / `updateRate` names are accepted as aliases so the same
/// table can be written by JavaScript callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Track input only while the element holds exclusive pointer capture.
    #[serde(alias = "exclusiveCapture", alias = "lockPointer")]
    pub exclusive_capture: bool,
    /// Minimum time between sampling ticks.
    #[serde(alias = "samplingIntervalMs", alias = "updateRate")]
    pub sampling_interval_ms: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            exclusive_capture: false,
            sampling_interval_ms: DEFAULT_SAMPLING_INTERVAL_MS,
        }
    }
}

impl TrackerOptions {
    /// Decode from a TOML table. Bad interval values are sanitized, not
    /// rejected; only malformed TOML is an error.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        let options: Self = toml::from_str(source)?;
        Ok(options.sanitized())
    }

    /// Defaults with whichever values the caller supplied.
    pub fn with_overrides(exclusive_capture: Option<bool>, sampling_interval_ms: Option<f64>) -> Self {
        let defaults = Self::default();
        Self {
            exclusive_capture: exclusive_capture.unwrap_or(defaults.exclusive_capture),
            sampling_interval_ms: sampling_interval_ms.unwrap_or(defaults.sampling_interval_ms),
        }
        .sanitized()
    }

    /// Replace a non-finite or negative interval with the default.
    pub fn sanitized(self) -> Self {
        let sampling_interval_ms = if self.sampling_interval_ms.is_finite() && self.sampling_interval_ms >= 0.0 {
            self.sampling_interval_ms
        } else {
            log::debug!(
                "ignoring sampling interval {}, using {DEFAULT_SAMPLING_INTERVAL_MS}",
                self.sampling_interval_ms
            );
            DEFAULT_SAMPLING_INTERVAL_MS
        };
        Self {
            sampling_interval_ms,
            ..self
        }
    }
}
