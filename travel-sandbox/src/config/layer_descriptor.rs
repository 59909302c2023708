use serde::{Deserialize, Serialize};

use crate::model::{layer::LayerId, surface::MapFeature};

/// a data layer the sandbox can show, along with where its data comes from and
/// how the map should draw it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LayerDescriptor {
    pub id: LayerId,
    /// id of the map source backing this layer
    pub source_id: String,
    pub source: LayerSource,
    pub style: LayerStyle,
    #[serde(default)]
    pub default_visible: bool,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// popup shown when a feature of this layer is clicked. layers without a
    /// template do not open popups.
    #[serde(default)]
    pub popup: Option<PopupTemplate>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSource {
    /// hosted vector tileset
    Vector { url: String, source_layer: String },
    /// in-memory GeoJSON, populated at runtime
    GeoJson,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerStyle {
    Symbol {
        icon_image: String,
        #[serde(default = "default_icon_size")]
        icon_size: f64,
    },
    Line {
        color: String,
        width: f64,
        opacity: f64,
    },
    /// polygons colored by matching a feature property against each rule's value
    Fill {
        match_property: String,
        rules: Vec<FillRule>,
    },
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct FillRule {
    pub value: String,
    pub color: String,
    pub opacity: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PopupTemplate {
    pub title_property: String,
    #[serde(default)]
    pub fields: Vec<PopupField>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PopupField {
    pub label: String,
    pub property: String,
}

impl LayerDescriptor {
    pub fn is_dynamic(&self) -> bool {
        matches!(self.source, LayerSource::GeoJson)
    }
}

impl PopupTemplate {
    pub fn new(title_property: &str, fields: &[(&str, &str)]) -> Self {
        Self {
            title_property: title_property.to_string(),
            fields: fields
                .iter()
                .map(|(label, property)| PopupField {
                    label: label.to_string(),
                    property: property.to_string(),
                })
                .collect(),
        }
    }

    /// the feature's title, or its layer id when the title property is missing.
    pub fn title(&self, feature: &MapFeature) -> String {
        feature
            .property_string(&self.title_property)
            .unwrap_or_else(|| feature.layer_id.to_string())
    }

    pub fn render(&self, feature: &MapFeature) -> String {
        let mut html = format!("<h4>{}</h4>", self.title(feature));
        for field in self.fields.iter() {
            let value = feature
                .property_string(&field.property)
                .unwrap_or_else(|| String::from("N/A"));
            html.push_str(&format!("<p>{}: {}</p>", field.label, value));
        }
        html
    }
}

fn default_min_zoom() -> f64 {
    9.0
}

fn default_max_zoom() -> f64 {
    22.0
}

fn default_icon_size() -> f64 {
    1.0
}
