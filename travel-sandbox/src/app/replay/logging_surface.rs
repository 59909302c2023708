use std::collections::{BTreeMap, HashMap};

use geo::Point;
use geojson::FeatureCollection;

use crate::{
    config::{LayerDescriptor, LayerSource},
    model::{
        layer::LayerId,
        legend::LegendItem,
        surface::{
            Cursor, LayerFilter, MapFeature, MapProvider, MarkerId, PageElement, PageSurface,
            PopupId, SourceData,
        },
    },
};

/// a map without a renderer. commands are logged and enough state is kept to
/// answer feature queries and summarize the session.
#[derive(Debug, Default)]
pub struct LoggingMap {
    sources: HashMap<String, SourceData>,
    layers: Vec<LayerDescriptor>,
    visibility: HashMap<LayerId, bool>,
    filters: HashMap<LayerId, LayerFilter>,
    popups: BTreeMap<PopupId, String>,
    markers: BTreeMap<MarkerId, Point<f64>>,
    layer_features: HashMap<LayerId, Vec<MapFeature>>,
}

impl LoggingMap {
    /// serves `features` for queries on a vector layer.
    pub fn with_layer_features(mut self, layer_id: LayerId, features: Vec<MapFeature>) -> Self {
        self.layer_features.insert(layer_id, features);
        self
    }

    pub fn layer_features(&self, layer_id: &LayerId) -> Vec<MapFeature> {
        self.query_source_features(layer_id)
    }

    pub fn visible_layers(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|l| self.visibility.get(&l.id).copied().unwrap_or(false))
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn filter(&self, layer_id: &LayerId) -> Option<&LayerFilter> {
        self.filters.get(layer_id)
    }

    pub fn popup_html(&self) -> Vec<String> {
        self.popups.values().cloned().collect()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn geojson_feature_count(&self, source_id: &str) -> usize {
        match self.sources.get(source_id) {
            Some(SourceData::GeoJson(fc)) => fc.features.len(),
            _ => 0,
        }
    }
}

impl MapProvider for LoggingMap {
    fn add_source(&mut self, source_id: &str, data: &SourceData) {
        log::debug!("map: add source '{source_id}'");
        self.sources.insert(source_id.to_string(), data.clone());
    }

    fn remove_source(&mut self, source_id: &str) {
        log::debug!("map: remove source '{source_id}'");
        self.sources.remove(source_id);
    }

    fn has_source(&self, source_id: &str) -> bool {
        self.sources.contains_key(source_id)
    }

    fn add_layer(&mut self, layer: &LayerDescriptor, visible: bool) {
        log::debug!("map: add layer '{}' (visible: {visible})", layer.id);
        self.layers.push(layer.clone());
        self.visibility.insert(layer.id.clone(), visible);
    }

    fn remove_layer(&mut self, layer_id: &LayerId) {
        log::debug!("map: remove layer '{layer_id}'");
        self.layers.retain(|l| &l.id != layer_id);
        self.visibility.remove(layer_id);
        self.filters.remove(layer_id);
    }

    fn has_layer(&self, layer_id: &LayerId) -> bool {
        self.layers.iter().any(|l| &l.id == layer_id)
    }

    fn move_layer_beneath(&mut self, layer_id: &LayerId, beneath: &LayerId) {
        log::debug!("map: move layer '{layer_id}' beneath '{beneath}'");
        if let Some(from) = self.layers.iter().position(|l| &l.id == layer_id) {
            let layer = self.layers.remove(from);
            let to = self
                .layers
                .iter()
                .position(|l| &l.id == beneath)
                .unwrap_or(self.layers.len());
            self.layers.insert(to, layer);
        }
    }

    fn set_layer_visibility(&mut self, layer_id: &LayerId, visible: bool) {
        log::debug!("map: layer '{layer_id}' visible: {visible}");
        self.visibility.insert(layer_id.clone(), visible);
    }

    fn set_filter(&mut self, layer_id: &LayerId, filter: Option<LayerFilter>) {
        log::debug!("map: layer '{layer_id}' filter: {filter:?}");
        match filter {
            Some(f) => self.filters.insert(layer_id.clone(), f),
            None => self.filters.remove(layer_id),
        };
    }

    fn set_geojson_data(&mut self, source_id: &str, data: FeatureCollection) {
        log::debug!(
            "map: source '{source_id}' set to {} features",
            data.features.len()
        );
        self.sources
            .insert(source_id.to_string(), SourceData::GeoJson(data));
    }

    fn fly_to(&mut self, center: Point<f64>, zoom: f64) {
        log::info!("map: fly to ({}, {}) at zoom {zoom}", center.x(), center.y());
    }

    fn query_source_features(&self, layer_id: &LayerId) -> Vec<MapFeature> {
        let dynamic_source = self
            .layers
            .iter()
            .find(|l| &l.id == layer_id && matches!(l.source, LayerSource::GeoJson))
            .and_then(|l| self.sources.get(&l.source_id));
        match dynamic_source {
            Some(SourceData::GeoJson(fc)) => fc
                .features
                .iter()
                .enumerate()
                .filter_map(|(idx, f)| MapFeature::try_from_geojson(layer_id, f, idx).ok())
                .collect(),
            _ => self
                .layer_features
                .get(layer_id)
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn add_popup(&mut self, id: PopupId, at: Point<f64>, html: &str) {
        log::info!("map: {id} at ({}, {}): {html}", at.x(), at.y());
        self.popups.insert(id, html.to_string());
    }

    fn remove_popup(&mut self, id: PopupId) {
        log::debug!("map: remove {id}");
        self.popups.remove(&id);
    }

    fn set_popup_visible(&mut self, id: PopupId, visible: bool) {
        log::debug!("map: {id} visible: {visible}");
    }

    fn add_marker(&mut self, id: MarkerId, at: Point<f64>) {
        log::info!("map: {id} at ({}, {})", at.x(), at.y());
        self.markers.insert(id, at);
    }

    fn remove_marker(&mut self, id: MarkerId) {
        log::debug!("map: remove {id}");
        self.markers.remove(&id);
    }

    fn set_marker_visible(&mut self, id: MarkerId, visible: bool) {
        log::debug!("map: {id} visible: {visible}");
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        log::debug!("map: cursor {cursor:?}");
    }

    fn resize(&mut self) {
        log::debug!("map: resize");
    }

    fn canvas_png(&self) -> Result<Vec<u8>, String> {
        Err(String::from("a headless map has no canvas"))
    }
}

/// a page that logs what it is asked to show.
#[derive(Debug, Default)]
pub struct LoggingPage {
    texts: HashMap<PageElement, String>,
    displayed: HashMap<PageElement, bool>,
    legend: Vec<String>,
}

impl LoggingPage {
    pub fn text(&self, element: PageElement) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    pub fn is_displayed(&self, element: PageElement) -> bool {
        self.displayed.get(&element).copied().unwrap_or(false)
    }

    pub fn legend_labels(&self) -> &[String] {
        &self.legend
    }
}

impl PageSurface for LoggingPage {
    fn set_display(&mut self, element: PageElement, visible: bool) {
        log::debug!("page: {element:?} visible: {visible}");
        self.displayed.insert(element, visible);
    }

    fn set_text(&mut self, element: PageElement, text: &str) {
        log::info!("page: {element:?} reads '{text}'");
        self.texts.insert(element, text.to_string());
    }

    fn render_legend(&mut self, items: &[LegendItem]) {
        self.legend = items.iter().map(|i| i.label.clone()).collect();
        log::info!("page: legend [{}]", self.legend.join(", "));
    }

    fn set_layer_toggle(&mut self, layer_id: &LayerId, on: bool) {
        log::debug!("page: toggle '{layer_id}' on: {on}");
    }

    fn set_map_content_width(&mut self, full: bool) {
        log::debug!("page: map full width: {full}");
    }

    fn download(&mut self, file_name: &str, bytes: &[u8]) {
        log::info!("page: download {file_name} ({} bytes)", bytes.len());
    }
}
