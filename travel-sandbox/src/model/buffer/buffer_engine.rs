use geo::Point;
use travel_sandbox_core::util::geo_utils;
use uom::si::{f64::Length, length::meter};

use super::{BufferFeature, BufferFeatureSet, BufferKind};
use crate::{config::SandboxConfig, model::SandboxError};

/// computes walking and cycling catchment buffers around a point. the radius of
/// each buffer is the distance covered at that mode's speed in the configured
/// number of minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferEngine {
    walking_speed_meters_per_minute: f64,
    cycling_speed_meters_per_minute: f64,
    walking_minutes: f64,
    cycling_minutes: f64,
    circle_steps: usize,
}

impl From<&SandboxConfig> for BufferEngine {
    fn from(config: &SandboxConfig) -> Self {
        Self {
            walking_speed_meters_per_minute: config.walking_speed_meters_per_minute,
            cycling_speed_meters_per_minute: config.cycling_speed_meters_per_minute,
            walking_minutes: config.walking_minutes,
            cycling_minutes: config.cycling_minutes,
            circle_steps: config.buffer_circle_steps,
        }
    }
}

impl BufferEngine {
    pub fn speed_meters_per_minute(&self, kind: BufferKind) -> f64 {
        match kind {
            BufferKind::Walking => self.walking_speed_meters_per_minute,
            BufferKind::Cycling => self.cycling_speed_meters_per_minute,
        }
    }

    pub fn minutes(&self, kind: BufferKind) -> f64 {
        match kind {
            BufferKind::Walking => self.walking_minutes,
            BufferKind::Cycling => self.cycling_minutes,
        }
    }

    pub fn set_minutes(&mut self, kind: BufferKind, minutes: f64) -> Result<(), SandboxError> {
        if !(minutes.is_finite() && minutes >= 0.0) {
            return Err(SandboxError::InvalidBufferDuration(minutes));
        }
        match kind {
            BufferKind::Walking => self.walking_minutes = minutes,
            BufferKind::Cycling => self.cycling_minutes = minutes,
        }
        Ok(())
    }

    pub fn radius(&self, kind: BufferKind) -> Length {
        Length::new::<meter>(self.speed_meters_per_minute(kind) * self.minutes(kind))
    }

    /// minutes needed to cover a distance at this mode's speed.
    pub fn travel_minutes(&self, kind: BufferKind, distance: Length) -> f64 {
        distance.get::<meter>() / self.speed_meters_per_minute(kind)
    }

    /// both buffers around `center`, cycling first.
    pub fn compute(&self, center: Point<f64>) -> BufferFeatureSet {
        let features = BufferKind::DRAW_ORDER
            .iter()
            .map(|kind| {
                let radius = self.radius(*kind);
                BufferFeature {
                    kind: *kind,
                    radius,
                    polygon: geo_utils::circle_polygon(center, radius, self.circle_steps),
                }
            })
            .collect();
        BufferFeatureSet::new(features)
    }
}
