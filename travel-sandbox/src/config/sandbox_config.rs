use std::{collections::HashSet, time::Duration};

use geo::Point;
use serde::{Deserialize, Serialize};
use travel_sandbox_gbfs::model::GbfsConfig;

use super::{default_layers, LayerDescriptor};
use crate::model::{layer::LayerId, SandboxError};

/// defines the behaviors of a sandbox session: travel speeds and durations for
/// buffers, viewport defaults, interaction timings and the data layers.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct SandboxConfig {
    pub cycling_speed_meters_per_minute: f64,
    pub walking_speed_meters_per_minute: f64,
    /// initial walking buffer duration
    pub walking_minutes: f64,
    /// initial cycling buffer duration
    pub cycling_minutes: f64,
    /// [lon, lat] of the view shown on load and after leaving focus mode
    pub default_center: [f64; 2],
    pub default_zoom: f64,
    /// zoom used when flying to a double-clicked school
    pub focus_zoom: f64,
    /// how long a single click waits for a double click on the same feature
    pub click_window_ms: u64,
    /// how long a failed school search stays on screen
    pub failure_message_secs: u64,
    /// school feature property holding the school name
    pub school_name_property: String,
    /// vertex count of each buffer ring
    pub buffer_circle_steps: usize,
    pub layers: Vec<LayerDescriptor>,
    pub bike_share: GbfsConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            cycling_speed_meters_per_minute: 250.0,
            walking_speed_meters_per_minute: 80.0,
            walking_minutes: 5.0,
            cycling_minutes: 5.0,
            default_center: [-79.370729, 43.719518],
            default_zoom: 10.0,
            focus_zoom: 15.0,
            click_window_ms: 500,
            failure_message_secs: 10,
            school_name_property: String::from("SCH_NAM3"),
            buffer_circle_steps: 64,
            layers: default_layers::toronto_layers(),
            bike_share: GbfsConfig::default(),
        }
    }
}

impl SandboxConfig {
    pub fn default_center_point(&self) -> Point<f64> {
        Point::new(self.default_center[0], self.default_center[1])
    }

    pub fn click_window(&self) -> Duration {
        Duration::from_millis(self.click_window_ms)
    }

    pub fn failure_message_duration(&self) -> Duration {
        Duration::from_secs(self.failure_message_secs)
    }

    pub fn school_buffers_layer(&self) -> LayerDescriptor {
        default_layers::school_buffers_layer()
    }

    /// checks the invariants the interaction controller relies on.
    pub fn validate(&self) -> Result<(), SandboxError> {
        for (name, speed) in [
            ("cycling_speed_meters_per_minute", self.cycling_speed_meters_per_minute),
            ("walking_speed_meters_per_minute", self.walking_speed_meters_per_minute),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(SandboxError::ConfigurationError(format!(
                    "{name} must be a positive number, found {speed}"
                )));
            }
        }
        for minutes in [self.walking_minutes, self.cycling_minutes] {
            if !(minutes.is_finite() && minutes >= 0.0) {
                return Err(SandboxError::InvalidBufferDuration(minutes));
            }
        }
        let mut seen: HashSet<&LayerId> = HashSet::new();
        for layer in self.layers.iter() {
            if !seen.insert(&layer.id) {
                return Err(SandboxError::ConfigurationError(format!(
                    "layer '{}' is defined more than once",
                    layer.id
                )));
            }
        }
        if !seen.contains(&LayerId::schools()) {
            return Err(SandboxError::ConfigurationError(format!(
                "layers must include '{}'",
                LayerId::SCHOOLS
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for SandboxConfig {
    type Error = SandboxError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                SandboxError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                SandboxError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                SandboxError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                SandboxError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(SandboxError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SandboxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layers.len(), 9);
        assert_eq!(config.click_window(), Duration::from_millis(500));
        assert_eq!(config.failure_message_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SandboxConfig = toml::from_str(
            r#"
            walking_speed_meters_per_minute = 70.0
            walking_minutes = 10.0
            "#,
        )
        .expect("test invariant failed");
        assert_eq!(config.walking_speed_meters_per_minute, 70.0);
        assert_eq!(config.walking_minutes, 10.0);
        assert_eq!(config.cycling_speed_meters_per_minute, 250.0);
        assert_eq!(config.layers.len(), 9);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = SandboxConfig {
            cycling_speed_meters_per_minute: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SandboxError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_rejects_missing_schools_layer() {
        let mut config = SandboxConfig::default();
        config.layers.retain(|l| l.id != LayerId::schools());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_layers() {
        let mut config = SandboxConfig::default();
        let parks = config.layers[7].clone();
        config.layers.push(parks);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_file_type() {
        let result = SandboxConfig::try_from(&String::from("sandbox.yaml"));
        assert!(matches!(result, Err(SandboxError::ConfigurationError(_))));
    }
}
