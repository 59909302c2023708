use geo::Polygon;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::Value;
use uom::si::{f64::Length, length::meter};

use super::BufferKind;

#[derive(Debug, Clone, PartialEq)]
pub struct BufferFeature {
    pub kind: BufferKind,
    pub radius: Length,
    pub polygon: Polygon<f64>,
}

/// the buffer polygons of the focused school, in draw order. empty when no
/// school is in focus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferFeatureSet {
    features: Vec<BufferFeature>,
}

impl BufferFeatureSet {
    pub fn new(features: Vec<BufferFeature>) -> Self {
        Self { features }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> &[BufferFeature] {
        &self.features
    }

    pub fn get(&self, kind: BufferKind) -> Option<&BufferFeature> {
        self.features.iter().find(|f| f.kind == kind)
    }

    pub fn kinds(&self) -> Vec<BufferKind> {
        self.features.iter().map(|f| f.kind).collect()
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .features
            .iter()
            .map(|f| {
                let mut properties = JsonObject::new();
                properties.insert(
                    String::from(BufferKind::TYPE_PROPERTY),
                    Value::from(f.kind.type_tag()),
                );
                properties.insert(String::from("RADIUS_M"), Value::from(f.radius.get::<meter>()));
                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::from(&f.polygon))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
