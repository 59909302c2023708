//! in-memory map and page used by the controller tests.
use std::collections::{BTreeMap, HashMap};

use geo::Point;
use geojson::FeatureCollection;
use travel_sandbox_gbfs::model::{
    GbfsError, GbfsFeed, GbfsResponse, StationInformation, StationStatus,
};

use super::{
    Cursor, LayerFilter, MapFeature, MapProvider, MarkerId, PageElement, PageSurface, PopupId,
    SourceData,
};
use crate::{
    config::{LayerDescriptor, LayerSource},
    model::{layer::LayerId, legend::LegendItem},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPopup {
    pub at: Point<f64>,
    pub html: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub sources: HashMap<String, SourceData>,
    /// draw order, bottom first
    pub layers: Vec<LayerDescriptor>,
    pub visibility: HashMap<LayerId, bool>,
    pub filters: HashMap<LayerId, LayerFilter>,
    pub popups: BTreeMap<PopupId, RecordedPopup>,
    pub markers: BTreeMap<MarkerId, (Point<f64>, bool)>,
    pub cursor: Option<Cursor>,
    pub flights: Vec<(Point<f64>, f64)>,
    pub resizes: usize,
    /// tile features served by vector layers
    pub tile_features: HashMap<LayerId, Vec<MapFeature>>,
    pub canvas: Option<Vec<u8>>,
}

impl RecordingMap {
    pub fn with_tile_features(layer_id: &LayerId, features: Vec<MapFeature>) -> Self {
        let mut map = RecordingMap::default();
        map.tile_features.insert(layer_id.clone(), features);
        map
    }

    pub fn layer_order(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn geojson(&self, source_id: &str) -> Option<&FeatureCollection> {
        match self.sources.get(source_id) {
            Some(SourceData::GeoJson(fc)) => Some(fc),
            _ => None,
        }
    }

    pub fn is_visible(&self, layer_id: &LayerId) -> bool {
        self.visibility.get(layer_id).copied().unwrap_or(false)
    }

    pub fn visible_popups(&self) -> Vec<&RecordedPopup> {
        self.popups.values().filter(|p| p.visible).collect()
    }
}

impl MapProvider for RecordingMap {
    fn add_source(&mut self, source_id: &str, data: &SourceData) {
        self.sources.insert(source_id.to_string(), data.clone());
    }

    fn remove_source(&mut self, source_id: &str) {
        self.sources.remove(source_id);
    }

    fn has_source(&self, source_id: &str) -> bool {
        self.sources.contains_key(source_id)
    }

    fn add_layer(&mut self, layer: &LayerDescriptor, visible: bool) {
        self.layers.push(layer.clone());
        self.visibility.insert(layer.id.clone(), visible);
    }

    fn remove_layer(&mut self, layer_id: &LayerId) {
        self.layers.retain(|l| &l.id != layer_id);
        self.visibility.remove(layer_id);
        self.filters.remove(layer_id);
    }

    fn has_layer(&self, layer_id: &LayerId) -> bool {
        self.layers.iter().any(|l| &l.id == layer_id)
    }

    fn move_layer_beneath(&mut self, layer_id: &LayerId, beneath: &LayerId) {
        let Some(from) = self.layers.iter().position(|l| &l.id == layer_id) else {
            return;
        };
        let layer = self.layers.remove(from);
        let to = self
            .layers
            .iter()
            .position(|l| &l.id == beneath)
            .unwrap_or(self.layers.len());
        self.layers.insert(to, layer);
    }

    fn set_layer_visibility(&mut self, layer_id: &LayerId, visible: bool) {
        self.visibility.insert(layer_id.clone(), visible);
    }

    fn set_filter(&mut self, layer_id: &LayerId, filter: Option<LayerFilter>) {
        match filter {
            Some(f) => {
                self.filters.insert(layer_id.clone(), f);
            }
            None => {
                self.filters.remove(layer_id);
            }
        }
    }

    fn set_geojson_data(&mut self, source_id: &str, data: FeatureCollection) {
        self.sources
            .insert(source_id.to_string(), SourceData::GeoJson(data));
    }

    fn fly_to(&mut self, center: Point<f64>, zoom: f64) {
        self.flights.push((center, zoom));
    }

    fn query_source_features(&self, layer_id: &LayerId) -> Vec<MapFeature> {
        let Some(layer) = self.layers.iter().find(|l| &l.id == layer_id) else {
            return vec![];
        };
        match (&layer.source, self.sources.get(&layer.source_id)) {
            (LayerSource::GeoJson, Some(SourceData::GeoJson(fc))) => fc
                .features
                .iter()
                .enumerate()
                .filter_map(|(idx, f)| MapFeature::try_from_geojson(layer_id, f, idx).ok())
                .collect(),
            _ => self.tile_features.get(layer_id).cloned().unwrap_or_default(),
        }
    }

    fn add_popup(&mut self, id: PopupId, at: Point<f64>, html: &str) {
        self.popups.insert(
            id,
            RecordedPopup {
                at,
                html: html.to_string(),
                visible: true,
            },
        );
    }

    fn remove_popup(&mut self, id: PopupId) {
        self.popups.remove(&id);
    }

    fn set_popup_visible(&mut self, id: PopupId, visible: bool) {
        if let Some(p) = self.popups.get_mut(&id) {
            p.visible = visible;
        }
    }

    fn add_marker(&mut self, id: MarkerId, at: Point<f64>) {
        self.markers.insert(id, (at, true));
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn set_marker_visible(&mut self, id: MarkerId, visible: bool) {
        if let Some(m) = self.markers.get_mut(&id) {
            m.1 = visible;
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    fn resize(&mut self) {
        self.resizes += 1;
    }

    fn canvas_png(&self) -> Result<Vec<u8>, String> {
        self.canvas
            .clone()
            .ok_or_else(|| String::from("canvas not ready"))
    }
}

#[derive(Debug, Default)]
pub struct RecordingPage {
    pub display: HashMap<PageElement, bool>,
    pub text: HashMap<PageElement, String>,
    pub legend: Vec<LegendItem>,
    pub toggles: HashMap<LayerId, bool>,
    pub full_width: bool,
    pub downloads: Vec<(String, Vec<u8>)>,
}

impl RecordingPage {
    pub fn is_displayed(&self, element: PageElement) -> bool {
        self.display.get(&element).copied().unwrap_or(false)
    }

    pub fn text_of(&self, element: PageElement) -> Option<&str> {
        self.text.get(&element).map(String::as_str)
    }

    pub fn legend_ids(&self) -> Vec<&str> {
        self.legend.iter().map(|i| i.layer_id.as_str()).collect()
    }
}

impl PageSurface for RecordingPage {
    fn set_display(&mut self, element: PageElement, visible: bool) {
        self.display.insert(element, visible);
    }

    fn set_text(&mut self, element: PageElement, text: &str) {
        self.text.insert(element, text.to_string());
    }

    fn render_legend(&mut self, items: &[LegendItem]) {
        self.legend = items.to_vec();
    }

    fn set_layer_toggle(&mut self, layer_id: &LayerId, on: bool) {
        self.toggles.insert(layer_id.clone(), on);
    }

    fn set_map_content_width(&mut self, full: bool) {
        self.full_width = full;
    }

    fn download(&mut self, file_name: &str, bytes: &[u8]) {
        self.downloads.push((file_name.to_string(), bytes.to_vec()));
    }
}

pub const STATION_INFORMATION: &str = r#"{
    "last_updated": 1709000000,
    "ttl": 11,
    "data": {"stations": [
        {"station_id": "7000", "name": "Fort York Blvd / Capreol Ct", "lat": 43.639832, "lon": -79.395954},
        {"station_id": "7001", "name": "Wellesley Station Green P", "lat": 43.66496, "lon": -79.38355}
    ]}
}"#;

pub const STATION_STATUS: &str = r#"{
    "last_updated": 1709000005,
    "ttl": 11,
    "data": {"stations": [
        {"station_id": "7000", "num_bikes_available": 14, "num_docks_available": 21, "is_charging_station": false}
    ]}
}"#;

/// serves fixed GBFS documents, or a 503 from station_status when `failing`.
pub struct StaticFeed {
    pub failing: bool,
}

impl StaticFeed {
    pub fn ok() -> Box<dyn GbfsFeed> {
        Box::new(StaticFeed { failing: false })
    }

    pub fn failing() -> Box<dyn GbfsFeed> {
        Box::new(StaticFeed { failing: true })
    }
}

impl GbfsFeed for StaticFeed {
    fn station_information(&self) -> Result<GbfsResponse<StationInformation>, GbfsError> {
        serde_json::from_str(STATION_INFORMATION).map_err(|source| {
            GbfsError::DeserializeError {
                url: String::from("station_information"),
                source,
            }
        })
    }

    fn station_status(&self) -> Result<GbfsResponse<StationStatus>, GbfsError> {
        if self.failing {
            return Err(GbfsError::StatusError {
                url: String::from("station_status"),
                status: 503,
            });
        }
        serde_json::from_str(STATION_STATUS).map_err(|source| GbfsError::DeserializeError {
            url: String::from("station_status"),
            source,
        })
    }
}
