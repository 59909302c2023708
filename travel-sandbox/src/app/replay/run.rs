use std::{
    path::Path,
    time::{Duration, Instant},
};

use geojson::FeatureCollection;
use serde::Serialize;
use travel_sandbox_gbfs::model::{
    GbfsError, GbfsFeed, GbfsResponse, StationInformation, StationStatus,
};

use super::{LoggingMap, LoggingPage, SessionEvent, TimedEvent};
use crate::{
    config::SandboxConfig,
    model::{
        interaction::{FocusPhase, InteractionController},
        layer::LayerId,
        surface::{FeatureKey, MapFeature, PageElement},
        SandboxError,
    },
};

/// the session state after the last event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub focus_phase: String,
    pub school_in_focus: Option<String>,
    pub focus_indicator: Option<String>,
    pub buffer_features: usize,
    pub visible_layers: Vec<LayerId>,
    pub legend: Vec<String>,
    pub popups: Vec<String>,
    pub highlights: usize,
}

/// a bike-share feed that is never reachable.
pub struct OfflineFeed;

impl GbfsFeed for OfflineFeed {
    fn station_information(&self) -> Result<GbfsResponse<StationInformation>, GbfsError> {
        Err(GbfsError::Unavailable(String::from("replay is offline")))
    }

    fn station_status(&self) -> Result<GbfsResponse<StationStatus>, GbfsError> {
        Err(GbfsError::Unavailable(String::from("replay is offline")))
    }
}

/// `layer_id=path` pairs for the `--layer-data` argument.
pub fn parse_layer_data(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((layer, path)) if !layer.trim().is_empty() && !path.trim().is_empty() => {
            Ok((layer.trim().to_string(), path.trim().to_string()))
        }
        _ => Err(format!("expected format: layer_id=path, got: {s}")),
    }
}

/// loads schools, extra layer data and an event log from disk, then replays
/// the session against a headless map.
pub fn run_replay(
    config: SandboxConfig,
    schools: &Path,
    layer_data: &[(String, String)],
    events: &Path,
    offline: bool,
) -> Result<ReplaySummary, SandboxError> {
    let mut map = LoggingMap::default()
        .with_layer_features(LayerId::schools(), read_features(&LayerId::schools(), schools)?);
    for (layer, path) in layer_data.iter() {
        let layer_id = LayerId::from(layer.as_str());
        let features = read_features(&layer_id, Path::new(path))?;
        map = map.with_layer_features(layer_id, features);
    }
    let events: Vec<TimedEvent> = serde_json::from_str(&std::fs::read_to_string(events)?)?;

    let feed: Box<dyn GbfsFeed> = if offline {
        Box::new(OfflineFeed)
    } else {
        Box::new(config.bike_share.build()?)
    };
    let mut controller = InteractionController::new(config, map, LoggingPage::default(), feed)?;
    controller.load()?;
    replay_events(&mut controller, &events, Instant::now())
}

/// applies events in order at `start + at_ms`, then lets every pending timer
/// run out.
pub fn replay_events(
    controller: &mut InteractionController<LoggingMap, LoggingPage>,
    events: &[TimedEvent],
    start: Instant,
) -> Result<ReplaySummary, SandboxError> {
    let mut last_ms = 0;
    for (idx, timed) in events.iter().enumerate() {
        if timed.at_ms < last_ms {
            return Err(SandboxError::ReplayError(format!(
                "event {idx} at {}ms is earlier than the previous event at {last_ms}ms",
                timed.at_ms
            )));
        }
        last_ms = timed.at_ms;
        let now = start + Duration::from_millis(timed.at_ms);
        log::debug!("replay event {idx} at {}ms: {:?}", timed.at_ms, timed.event);
        apply_event(controller, &timed.event, now)?;
    }
    let settle = start + Duration::from_millis(last_ms) + Duration::from_secs(60);
    controller.tick(settle);
    Ok(summarize(controller, events.len()))
}

fn apply_event(
    controller: &mut InteractionController<LoggingMap, LoggingPage>,
    event: &SessionEvent,
    now: Instant,
) -> Result<(), SandboxError> {
    match event {
        SessionEvent::ToggleLayer { layer, visible } => {
            match controller.set_layer_visible(layer, *visible) {
                Err(SandboxError::BikeShareError { source }) => {
                    log::warn!("layer '{layer}' could not be shown: {source}");
                    Ok(())
                }
                other => other,
            }
        }
        SessionEvent::Click { layer, feature } => {
            let feature = find_feature(controller, layer, feature)?;
            controller.click(feature, now);
            Ok(())
        }
        SessionEvent::DoubleClick { layer, feature } => {
            let feature = find_feature(controller, layer, feature)?;
            controller.double_click(feature, now);
            Ok(())
        }
        SessionEvent::MouseEnter { layer, feature } => {
            let feature = find_feature(controller, layer, feature)?;
            controller.tick(now);
            controller.mouse_enter(&feature);
            Ok(())
        }
        SessionEvent::MouseLeave { layer } => {
            controller.tick(now);
            controller.mouse_leave(layer);
            Ok(())
        }
        SessionEvent::Geocoder { query } => {
            controller.tick(now);
            controller.geocoder_result(query, now);
            Ok(())
        }
        SessionEvent::CloseFocus => {
            controller.tick(now);
            controller.close_focus();
            Ok(())
        }
        SessionEvent::BufferMinutes { kind, minutes } => {
            controller.tick(now);
            controller.set_buffer_minutes(*kind, *minutes)
        }
        SessionEvent::BufferVisible { kind, visible } => {
            controller.tick(now);
            controller.set_buffer_visible(*kind, *visible);
            Ok(())
        }
        SessionEvent::DrawModeChange => {
            controller.tick(now);
            controller.draw_mode_change();
            Ok(())
        }
        SessionEvent::DrawSelectionChange { mode, routes } => {
            controller.tick(now);
            controller.draw_selection_change(routes, *mode);
            Ok(())
        }
        SessionEvent::RoutePopupClosed => {
            controller.tick(now);
            controller.route_popup_closed();
            Ok(())
        }
        SessionEvent::OpenSidebar => {
            controller.tick(now);
            controller.open_sidebar();
            Ok(())
        }
        SessionEvent::CloseSidebar => {
            controller.tick(now);
            controller.close_sidebar();
            Ok(())
        }
        SessionEvent::ExportMap => {
            controller.tick(now);
            if let Err(e) = controller.export_map() {
                log::warn!("{e}");
            }
            Ok(())
        }
        SessionEvent::Tick => {
            controller.tick(now);
            Ok(())
        }
    }
}

fn find_feature(
    controller: &InteractionController<LoggingMap, LoggingPage>,
    layer: &LayerId,
    key: &FeatureKey,
) -> Result<MapFeature, SandboxError> {
    controller
        .map()
        .layer_features(layer)
        .into_iter()
        .find(|f| &f.key == key)
        .ok_or_else(|| {
            SandboxError::ReplayError(format!("no feature '{key}' in layer '{layer}'"))
        })
}

fn read_features(layer_id: &LayerId, path: &Path) -> Result<Vec<MapFeature>, SandboxError> {
    let collection: FeatureCollection = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let features = collection
        .features
        .iter()
        .enumerate()
        .map(|(idx, f)| MapFeature::try_from_geojson(layer_id, f, idx))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!(
        "read {} features for layer '{layer_id}' from {}",
        features.len(),
        path.display()
    );
    Ok(features)
}

fn summarize(
    controller: &InteractionController<LoggingMap, LoggingPage>,
    events: usize,
) -> ReplaySummary {
    let map = controller.map();
    let page = controller.page();
    let focus_indicator = if page.is_displayed(PageElement::FocusIndicator) {
        page.text(PageElement::FocusIndicatorText).map(String::from)
    } else {
        None
    };
    let focus_phase = match controller.focus_phase() {
        FocusPhase::Unfocused => "unfocused",
        FocusPhase::Focused => "focused",
        FocusPhase::FocusedWithFailureMessage => "focused_with_failure_message",
    };
    ReplaySummary {
        events,
        focus_phase: focus_phase.to_string(),
        school_in_focus: controller.school_in_focus().map(|s| s.name.clone()),
        focus_indicator,
        buffer_features: controller.buffer_features().len(),
        visible_layers: map.visible_layers(),
        legend: page.legend_labels().to_vec(),
        popups: map.popup_html(),
        highlights: map.marker_count(),
    }
}
