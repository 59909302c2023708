use std::fmt::Display;

use geo::{Geometry, Point};
use geojson::{feature::Id, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use travel_sandbox_core::util::geo_utils;

use crate::model::{layer::LayerId, SandboxError};

/// identifies a feature within its layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureKey(pub String);

impl From<&str> for FeatureKey {
    fn from(value: &str) -> Self {
        FeatureKey(value.to_string())
    }
}

impl Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a rendered feature as reported by the map in pointer events and queries.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub layer_id: LayerId,
    pub key: FeatureKey,
    pub geometry: Geometry<f64>,
    pub properties: JsonObject,
}

impl MapFeature {
    pub fn new(
        layer_id: LayerId,
        key: FeatureKey,
        geometry: Geometry<f64>,
        properties: JsonObject,
    ) -> Self {
        Self {
            layer_id,
            key,
            geometry,
            properties,
        }
    }

    /// reads a GeoJSON feature into a layer. the feature id becomes the key,
    /// falling back to the feature's position in its collection.
    pub fn try_from_geojson(
        layer_id: &LayerId,
        feature: &geojson::Feature,
        index: usize,
    ) -> Result<MapFeature, SandboxError> {
        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            SandboxError::InvalidFeature(format!(
                "feature {index} in layer '{layer_id}' has no geometry"
            ))
        })?;
        let geometry = Geometry::<f64>::try_from(geometry.value.clone()).map_err(|e| {
            SandboxError::InvalidFeature(format!(
                "feature {index} in layer '{layer_id}' has unsupported geometry: {e}"
            ))
        })?;
        let key = match &feature.id {
            Some(Id::String(s)) => FeatureKey(s.clone()),
            Some(Id::Number(n)) => FeatureKey(n.to_string()),
            None => FeatureKey(index.to_string()),
        };
        Ok(MapFeature {
            layer_id: layer_id.clone(),
            key,
            geometry,
            properties: feature.properties.clone().unwrap_or_default(),
        })
    }

    /// a property rendered as text. missing and null properties are None.
    pub fn property_string(&self, name: &str) -> Option<String> {
        match self.properties.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn anchor(&self) -> Option<Point<f64>> {
        geo_utils::get_anchor_point(&self.geometry)
    }

    pub fn is_same_feature(&self, other: &MapFeature) -> bool {
        self.layer_id == other.layer_id && self.key == other.key
    }
}
