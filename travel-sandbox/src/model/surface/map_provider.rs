use std::fmt::Display;

use geo::Point;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use super::MapFeature;
use crate::{config::LayerDescriptor, model::layer::LayerId};

/// data backing a map source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Vector { url: String },
    GeoJson(FeatureCollection),
}

/// a layer filter expression. only property equality is needed by the sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerFilter {
    PropertyEquals { property: String, value: String },
    PropertyIn { property: String, values: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PopupId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl Display for PopupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "popup-{}", self.0)
    }
}

impl Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// the slippy map the sandbox drives. implementations own rendering, tiles and
/// hit-testing; the sandbox only issues commands and reads back source features.
pub trait MapProvider {
    fn add_source(&mut self, source_id: &str, data: &SourceData);
    fn remove_source(&mut self, source_id: &str);
    fn has_source(&self, source_id: &str) -> bool;

    fn add_layer(&mut self, layer: &LayerDescriptor, visible: bool);
    fn remove_layer(&mut self, layer_id: &LayerId);
    fn has_layer(&self, layer_id: &LayerId) -> bool;
    /// re-orders `layer_id` to draw directly beneath `beneath`.
    fn move_layer_beneath(&mut self, layer_id: &LayerId, beneath: &LayerId);
    fn set_layer_visibility(&mut self, layer_id: &LayerId, visible: bool);
    /// replaces the layer's filter. None clears it.
    fn set_filter(&mut self, layer_id: &LayerId, filter: Option<LayerFilter>);

    /// replaces the contents of a GeoJSON source.
    fn set_geojson_data(&mut self, source_id: &str, data: FeatureCollection);
    fn fly_to(&mut self, center: Point<f64>, zoom: f64);
    /// every loaded feature of the layer's source, ignoring filters.
    fn query_source_features(&self, layer_id: &LayerId) -> Vec<MapFeature>;

    fn add_popup(&mut self, id: PopupId, at: Point<f64>, html: &str);
    fn remove_popup(&mut self, id: PopupId);
    fn set_popup_visible(&mut self, id: PopupId, visible: bool);

    fn add_marker(&mut self, id: MarkerId, at: Point<f64>);
    fn remove_marker(&mut self, id: MarkerId);
    fn set_marker_visible(&mut self, id: MarkerId, visible: bool);

    fn set_cursor(&mut self, cursor: Cursor);
    /// re-measures the container after page layout changes.
    fn resize(&mut self);
    fn canvas_png(&self) -> Result<Vec<u8>, String>;
}
