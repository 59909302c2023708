use std::{
    collections::{BTreeSet, HashMap},
    time::Instant,
};

use geo::Point;
use geojson::FeatureCollection;
use travel_sandbox_core::util::geo_utils;
use travel_sandbox_gbfs::model::{refresh_ops, GbfsFeed};
use uom::si::length::meter;

use super::{FocusPhase, FocusState, GestureTracker, OverlayRegistry, School};
use crate::{
    config::{LayerDescriptor, LayerSource, SandboxConfig},
    model::{
        buffer::{BufferEngine, BufferFeatureSet, BufferKind},
        layer::{LayerId, LayerRegistry},
        legend::{format_label, Legend, LegendItem},
        route::{DrawMode, DrawnRoute, RouteEstimate},
        surface::{
            Cursor, FeatureKey, LayerFilter, MapFeature, MapProvider, MarkerId, PageElement,
            PageSurface, PopupId, SourceData,
        },
        SandboxError,
    },
};

pub const EXPORT_FILE_NAME: &str = "map-export.png";

/// the stateful core of the sandbox. receives pointer, drawing, geocoder and
/// page-control events, keeps focus, gesture and popup state, and drives the
/// map and page through their traits.
///
/// timers are deadlines: callers report the passage of time with [`Self::tick`].
pub struct InteractionController<M, P> {
    config: SandboxConfig,
    map: M,
    page: P,
    bike_share: Box<dyn GbfsFeed>,
    registry: LayerRegistry,
    legend: Legend,
    buffer_layer: LayerDescriptor,
    buffers: BufferEngine,
    buffer_features: BufferFeatureSet,
    visible_buffer_kinds: BTreeSet<BufferKind>,
    focus: FocusState,
    gestures: GestureTracker,
    draw_mode_changed: bool,
    route_popup: Option<PopupId>,
    hover_popup: Option<PopupId>,
    popups: OverlayRegistry<PopupId>,
    highlights: OverlayRegistry<MarkerId>,
    highlighted: HashMap<(LayerId, FeatureKey), MarkerId>,
    next_overlay_id: u64,
}

impl<M: MapProvider, P: PageSurface> InteractionController<M, P> {
    pub fn new(
        config: SandboxConfig,
        map: M,
        page: P,
        bike_share: Box<dyn GbfsFeed>,
    ) -> Result<Self, SandboxError> {
        config.validate()?;
        let registry = LayerRegistry::new(config.layers.clone());
        let buffers = BufferEngine::from(&config);
        let gestures = GestureTracker::new(config.click_window());
        let buffer_layer = config.school_buffers_layer();
        Ok(Self {
            config,
            map,
            page,
            bike_share,
            registry,
            legend: Legend::new(),
            buffer_layer,
            buffers,
            buffer_features: BufferFeatureSet::empty(),
            visible_buffer_kinds: BufferKind::DRAW_ORDER.into_iter().collect(),
            focus: FocusState::default(),
            gestures,
            draw_mode_changed: false,
            route_popup: None,
            hover_popup: None,
            popups: OverlayRegistry::default(),
            highlights: OverlayRegistry::default(),
            highlighted: HashMap::new(),
            next_overlay_id: 0,
        })
    }

    /// adds every registered layer at its default visibility, then the buffer
    /// layer beneath the schools. a bike-share fetch failure leaves that layer
    /// out and is logged.
    pub fn load(&mut self) -> Result<(), SandboxError> {
        self.map
            .fly_to(self.config.default_center_point(), self.config.default_zoom);
        let layers: Vec<LayerDescriptor> = self.registry.iter().cloned().collect();
        for layer in layers.iter() {
            let mut visible = layer.default_visible;
            if let Err(e) = self.add_to_map(layer, visible) {
                log::warn!("layer '{}' could not be loaded: {e}", layer.id);
                visible = false;
                self.registry.set_visible(&layer.id, false)?;
            }
            if visible {
                if let Some(item) = LegendItem::for_layer(layer) {
                    self.legend.insert(item);
                }
            }
            self.page.set_layer_toggle(&layer.id, visible);
        }

        let buffer_source = SourceData::GeoJson(empty_collection());
        self.map
            .add_source(&self.buffer_layer.source_id, &buffer_source);
        self.map.add_layer(&self.buffer_layer, true);
        self.map
            .move_layer_beneath(&self.buffer_layer.id, &LayerId::schools());

        self.page.set_display(PageElement::FocusIndicator, false);
        self.page.set_display(PageElement::BufferControls, false);
        self.sync_legend();
        log::info!(
            "loaded {} layers, visible: {:?}",
            layers.len(),
            self.registry.visible_layers()
        );
        Ok(())
    }

    /// shows or hides a data layer along with its legend row, sidebar toggle,
    /// popups and highlight markers. hiding the schools layer suspends the
    /// focus view without forgetting the focused school.
    pub fn set_layer_visible(
        &mut self,
        layer_id: &LayerId,
        visible: bool,
    ) -> Result<(), SandboxError> {
        let layer = self.registry.get(layer_id)?.clone();
        if layer.is_dynamic() {
            // dynamic layers are only on the map while shown, with fresh data
            self.remove_from_map(&layer);
            if visible {
                if let Err(e) = self.add_to_map(&layer, true) {
                    self.registry.set_visible(layer_id, false)?;
                    self.legend.remove(layer_id);
                    self.sync_legend();
                    self.page.set_layer_toggle(layer_id, false);
                    return Err(e);
                }
            }
        } else {
            self.map.set_layer_visibility(layer_id, visible);
        }
        self.registry.set_visible(layer_id, visible)?;

        if visible {
            if let Some(item) = LegendItem::for_layer(&layer) {
                self.legend.insert(item);
            }
        } else {
            self.legend.remove(layer_id);
        }
        self.sync_legend();
        self.page.set_layer_toggle(layer_id, visible);

        if layer_id.is_schools() {
            if visible {
                self.resume_focus_view();
            } else {
                self.suspend_focus_view();
            }
        }
        if !visible {
            for pending in self.gestures.cancel_layer(layer_id) {
                log::debug!("hiding '{layer_id}' cancels gesture {}", pending.gesture_id.0);
            }
        }
        for id in self.popups.ids_for(layer_id).iter() {
            self.map.set_popup_visible(*id, visible);
        }
        for id in self.highlights.ids_for(layer_id).iter() {
            self.map.set_marker_visible(*id, visible);
        }
        log::info!("layer '{layer_id}' visible: {visible}");
        Ok(())
    }

    /// opens a single-click gesture. it fires from [`Self::tick`] once the
    /// double-click window passes without a double click on the same feature.
    pub fn click(&mut self, feature: MapFeature, now: Instant) {
        self.tick(now);
        if !self.registry.is_visible(&feature.layer_id) {
            log::debug!("ignoring click on hidden layer '{}'", feature.layer_id);
            return;
        }
        let gesture_id = self.gestures.open_click(feature, now);
        log::debug!("opened click gesture {}", gesture_id.0);
    }

    /// a double click on a school focuses it and flies to it. on any other
    /// feature it toggles a highlight marker.
    pub fn double_click(&mut self, feature: MapFeature, now: Instant) {
        self.tick(now);
        if let Some(pending) = self.gestures.cancel_for(&feature) {
            log::debug!("double click cancels gesture {}", pending.gesture_id.0);
        }
        if feature.layer_id.is_schools() {
            match School::from_feature(&feature, &self.config.school_name_property) {
                Some(school) => {
                    let location = school.location;
                    self.focus_school(school);
                    self.map.fly_to(location, self.config.focus_zoom);
                }
                None => log::warn!("school feature {} has no name or location", feature.key),
            }
        } else if self.registry.is_visible(&feature.layer_id) {
            self.toggle_highlight(&feature);
        }
    }

    /// fires elapsed click gestures and clears an expired failure message.
    pub fn tick(&mut self, now: Instant) {
        for pending in self.gestures.take_expired(now) {
            log::debug!("click gesture {} fired", pending.gesture_id.0);
            self.fire_click(&pending.feature);
        }
        if self.focus.failure_expired(now) {
            self.page.set_display(PageElement::FocusIndicator, false);
        }
    }

    /// focuses the school whose name matches the query. on a miss, focus is
    /// cleared and a message is shown until the failure timer runs out.
    /// returns whether a school was found.
    pub fn geocoder_result(&mut self, query: &str, now: Instant) -> bool {
        let found = self
            .map
            .query_source_features(&LayerId::schools())
            .iter()
            .filter_map(|f| School::from_feature(f, &self.config.school_name_property))
            .find(|s| s.matches_query(query));
        match found {
            Some(school) => {
                let location = school.location;
                self.focus_school(school);
                self.map.fly_to(location, self.config.focus_zoom);
                true
            }
            None => {
                log::info!("no school found for '{}'", query.trim());
                self.clear_focus();
                self.focus.failure_deadline = Some(now + self.config.failure_message_duration());
                self.page.set_text(
                    PageElement::FocusIndicatorText,
                    &format!("No school found for \"{}\"", query.trim()),
                );
                self.page.set_display(PageElement::FocusIndicator, true);
                false
            }
        }
    }

    pub fn close_focus(&mut self) {
        self.focus.failure_deadline = None;
        self.clear_focus();
        self.map
            .fly_to(self.config.default_center_point(), self.config.default_zoom);
    }

    /// changes a buffer duration and redraws the focused school's buffers.
    pub fn set_buffer_minutes(
        &mut self,
        kind: BufferKind,
        minutes: f64,
    ) -> Result<(), SandboxError> {
        self.buffers.set_minutes(kind, minutes)?;
        if let Some(location) = self.focus.school_in_focus.as_ref().map(|s| s.location) {
            self.buffer_features = self.buffers.compute(location);
            self.push_buffers();
        }
        Ok(())
    }

    /// filters the buffer layer by kind. the buffer data is left as is.
    pub fn set_buffer_visible(&mut self, kind: BufferKind, visible: bool) {
        if visible {
            self.visible_buffer_kinds.insert(kind);
        } else {
            self.visible_buffer_kinds.remove(&kind);
        }
        let filter = if self.visible_buffer_kinds.len() == BufferKind::DRAW_ORDER.len() {
            None
        } else {
            Some(LayerFilter::PropertyIn {
                property: String::from(BufferKind::TYPE_PROPERTY),
                values: BufferKind::DRAW_ORDER
                    .iter()
                    .filter(|k| self.visible_buffer_kinds.contains(*k))
                    .map(|k| k.type_tag().to_string())
                    .collect(),
            })
        };
        self.map.set_filter(&self.buffer_layer.id, filter);
    }

    /// the next selection change only closes the route popup.
    pub fn draw_mode_change(&mut self) {
        self.draw_mode_changed = true;
    }

    pub fn draw_selection_change(&mut self, selected: &[DrawnRoute], mode: DrawMode) {
        if self.draw_mode_changed {
            self.draw_mode_changed = false;
            self.close_route_popup();
            return;
        }
        if mode == DrawMode::DirectSelect {
            return;
        }
        let Some(route) = selected.first() else {
            return;
        };
        self.close_route_popup();
        match RouteEstimate::new(&route.geometry, &self.buffers) {
            Some(estimate) => {
                log::info!("route {}: {estimate}", route.id);
                let id = PopupId(self.next_overlay_id());
                self.map.add_popup(id, estimate.anchor, &estimate.to_html());
                self.route_popup = Some(id);
            }
            None => log::debug!("route {} has no vertices", route.id),
        }
    }

    /// the user closed the route popup.
    pub fn route_popup_closed(&mut self) {
        self.route_popup = None;
    }

    pub fn mouse_enter(&mut self, feature: &MapFeature) {
        if !self.registry.contains(&feature.layer_id) {
            return;
        }
        self.map.set_cursor(Cursor::Pointer);
        if feature.layer_id.is_schools() || !self.focus.is_focus_mode {
            return;
        }
        let Some(hover) = self.hover_content(feature) else {
            return;
        };
        self.remove_hover_popup();
        let id = PopupId(self.next_overlay_id());
        self.map.add_popup(id, hover.0, &hover.1);
        self.hover_popup = Some(id);
    }

    pub fn mouse_leave(&mut self, layer_id: &LayerId) {
        if !self.registry.contains(layer_id) {
            return;
        }
        self.map.set_cursor(Cursor::Default);
        self.remove_hover_popup();
    }

    /// the user closed a popup.
    pub fn dismiss_popup(&mut self, id: PopupId) {
        if self.route_popup == Some(id) {
            self.route_popup = None;
        }
        if self.hover_popup == Some(id) {
            self.hover_popup = None;
        }
        self.popups.unregister(id);
        self.map.remove_popup(id);
    }

    pub fn open_sidebar(&mut self) {
        self.page.set_display(PageElement::Sidebar, true);
        self.page.set_display(PageElement::OpenSidebarButton, false);
        self.page.set_map_content_width(false);
        self.map.resize();
    }

    pub fn close_sidebar(&mut self) {
        self.page.set_display(PageElement::Sidebar, false);
        self.page.set_display(PageElement::OpenSidebarButton, true);
        self.page.set_map_content_width(true);
        self.map.resize();
    }

    /// hands the rendered map to the page as a PNG download.
    pub fn export_map(&mut self) -> Result<(), SandboxError> {
        let png = self.map.canvas_png().map_err(SandboxError::ExportError)?;
        self.page.download(EXPORT_FILE_NAME, &png);
        log::info!("exported {} bytes to {EXPORT_FILE_NAME}", png.len());
        Ok(())
    }

    pub fn focus_phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    pub fn school_in_focus(&self) -> Option<&School> {
        self.focus.school_in_focus.as_ref()
    }

    pub fn is_focus_mode(&self) -> bool {
        self.focus.is_focus_mode
    }

    pub fn buffer_features(&self) -> &BufferFeatureSet {
        &self.buffer_features
    }

    pub fn buffer_engine(&self) -> &BufferEngine {
        &self.buffers
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn route_popup(&self) -> Option<PopupId> {
        self.route_popup
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    fn add_to_map(&mut self, layer: &LayerDescriptor, visible: bool) -> Result<(), SandboxError> {
        let data = match &layer.source {
            LayerSource::Vector { url, .. } => SourceData::Vector { url: url.clone() },
            LayerSource::GeoJson if layer.id.is_bike_share() => {
                SourceData::GeoJson(refresh_ops::refresh(self.bike_share.as_ref())?)
            }
            LayerSource::GeoJson => SourceData::GeoJson(empty_collection()),
        };
        if !self.map.has_source(&layer.source_id) {
            self.map.add_source(&layer.source_id, &data);
        }
        self.map.add_layer(layer, visible);
        Ok(())
    }

    fn remove_from_map(&mut self, layer: &LayerDescriptor) {
        if self.map.has_layer(&layer.id) {
            self.map.remove_layer(&layer.id);
        }
        if self.map.has_source(&layer.source_id) {
            self.map.remove_source(&layer.source_id);
        }
    }

    fn sync_legend(&mut self) {
        self.page.render_legend(self.legend.items());
        self.page
            .set_display(PageElement::Legend, self.legend.container_display() == "block");
    }

    fn fire_click(&mut self, feature: &MapFeature) {
        let template = self
            .registry
            .get(&feature.layer_id)
            .ok()
            .and_then(|l| l.popup.clone());
        if let (Some(template), Some(anchor)) = (template, feature.anchor()) {
            let id = PopupId(self.next_overlay_id());
            self.map.add_popup(id, anchor, &template.render(feature));
            self.popups.register(&feature.layer_id, id);
        }
        if feature.layer_id.is_schools() {
            if let Some(school) = School::from_feature(feature, &self.config.school_name_property) {
                self.focus_school(school);
            }
        }
    }

    fn focus_school(&mut self, school: School) {
        self.focus.failure_deadline = None;
        if let Some(previous) = &self.focus.school_in_focus {
            log::debug!("focus moves from {} to {}", previous.name, school.name);
        }
        self.buffer_features = self.buffers.compute(school.location);
        self.push_buffers();
        if self.registry.is_visible(&LayerId::schools()) {
            self.apply_focus_view(&school);
        } else {
            self.focus.is_focus_mode = false;
            self.map.set_layer_visibility(&self.buffer_layer.id, false);
        }
        log::info!("school in focus: {}", school.name);
        self.focus.school_in_focus = Some(school);
    }

    fn apply_focus_view(&mut self, school: &School) {
        self.focus.is_focus_mode = true;
        self.page.set_text(
            PageElement::FocusIndicatorText,
            &format!("School in Focus: {}", school.name),
        );
        self.page.set_display(PageElement::FocusIndicator, true);
        self.page.set_display(PageElement::BufferControls, true);
        self.map.set_filter(
            &LayerId::schools(),
            Some(LayerFilter::PropertyEquals {
                property: self.config.school_name_property.clone(),
                value: school.name.clone(),
            }),
        );
        self.map.set_layer_visibility(&self.buffer_layer.id, true);
    }

    fn suspend_focus_view(&mut self) {
        self.map.set_layer_visibility(&self.buffer_layer.id, false);
        if self.focus.school_in_focus.is_none() {
            return;
        }
        self.focus.is_focus_mode = false;
        self.map.set_filter(&LayerId::schools(), None);
        self.page.set_display(PageElement::FocusIndicator, false);
        self.page.set_display(PageElement::BufferControls, false);
    }

    fn resume_focus_view(&mut self) {
        if let Some(school) = self.focus.school_in_focus.clone() {
            self.apply_focus_view(&school);
        }
    }

    fn clear_focus(&mut self) {
        if let Some(school) = self.focus.school_in_focus.take() {
            log::info!("leaving focus on {}", school.name);
        }
        self.focus.is_focus_mode = false;
        self.map.set_filter(&LayerId::schools(), None);
        self.page.set_display(PageElement::BufferControls, false);
        self.page.set_display(PageElement::FocusIndicator, false);
        self.buffer_features = BufferFeatureSet::empty();
        self.push_buffers();
    }

    fn push_buffers(&mut self) {
        self.map.set_geojson_data(
            &self.buffer_layer.source_id,
            self.buffer_features.to_feature_collection(),
        );
    }

    fn toggle_highlight(&mut self, feature: &MapFeature) {
        let key = (feature.layer_id.clone(), feature.key.clone());
        if let Some(marker) = self.highlighted.remove(&key) {
            self.map.remove_marker(marker);
            self.highlights.unregister(marker);
            return;
        }
        let Some(anchor) = feature.anchor() else {
            return;
        };
        let marker = MarkerId(self.next_overlay_id());
        self.map.add_marker(marker, anchor);
        self.highlights.register(&feature.layer_id, marker);
        self.highlighted.insert(key, marker);
    }

    /// title and distance from the focused school, with travel times.
    fn hover_content(&self, feature: &MapFeature) -> Option<(Point<f64>, String)> {
        let school = self.focus.school_in_focus.as_ref()?;
        let anchor = feature.anchor()?;
        let distance = geo_utils::haversine_distance(school.location, anchor);
        let title = self
            .registry
            .get(&feature.layer_id)
            .ok()
            .and_then(|l| l.popup.as_ref())
            .map(|t| t.title(feature))
            .unwrap_or_else(|| format_label(feature.layer_id.as_str()));
        let html = format!(
            "<h4>{title}</h4><p>Distance from {}: {:.2}m</p><p>Estimated Walking Time: {:.2}mins</p><p>Estimated Cycling Time: {:.2}mins</p>",
            school.name,
            distance.get::<meter>(),
            self.buffers.travel_minutes(BufferKind::Walking, distance),
            self.buffers.travel_minutes(BufferKind::Cycling, distance),
        );
        Some((anchor, html))
    }

    fn remove_hover_popup(&mut self) {
        if let Some(id) = self.hover_popup.take() {
            self.map.remove_popup(id);
        }
    }

    fn close_route_popup(&mut self) {
        if let Some(id) = self.route_popup.take() {
            self.map.remove_popup(id);
        }
    }

    fn next_overlay_id(&mut self) -> u64 {
        let id = self.next_overlay_id;
        self.next_overlay_id += 1;
        id
    }
}

fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![],
        foreign_members: None,
    }
}
