use serde::{Deserialize, Serialize};

use crate::model::{
    buffer::BufferKind,
    layer::LayerId,
    route::{DrawMode, DrawnRoute},
    surface::FeatureKey,
};

/// one recorded user or plugin event, `at_ms` milliseconds after the session
/// started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: SessionEvent,
}

/// events reference features by layer and feature key. features are looked up
/// in the layer's loaded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    ToggleLayer {
        layer: LayerId,
        visible: bool,
    },
    Click {
        layer: LayerId,
        feature: FeatureKey,
    },
    DoubleClick {
        layer: LayerId,
        feature: FeatureKey,
    },
    MouseEnter {
        layer: LayerId,
        feature: FeatureKey,
    },
    MouseLeave {
        layer: LayerId,
    },
    Geocoder {
        query: String,
    },
    CloseFocus,
    BufferMinutes {
        kind: BufferKind,
        minutes: f64,
    },
    BufferVisible {
        kind: BufferKind,
        visible: bool,
    },
    DrawModeChange,
    DrawSelectionChange {
        mode: DrawMode,
        #[serde(default)]
        routes: Vec<DrawnRoute>,
    },
    RoutePopupClosed,
    OpenSidebar,
    CloseSidebar,
    ExportMap,
    /// only advances the clock
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_session() {
        let events: Vec<TimedEvent> = serde_json::from_str(
            r#"[
                {"at_ms": 0, "event": "toggle_layer", "layer": "parks", "visible": true},
                {"at_ms": 100, "event": "click", "layer": "schools", "feature": "12"},
                {"at_ms": 900, "event": "buffer_minutes", "kind": "walking", "minutes": 7.5},
                {"at_ms": 1000, "event": "draw_selection_change", "mode": "simple_select",
                 "routes": [{"id": "a", "geometry": [{"x": -79.4, "y": 43.7}, {"x": -79.3, "y": 43.7}]}]},
                {"at_ms": 2000, "event": "close_focus"}
            ]"#,
        )
        .expect("test invariant failed");
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[1].event,
            SessionEvent::Click {
                layer: LayerId::schools(),
                feature: FeatureKey::from("12")
            }
        );
        assert_eq!(
            events[2].event,
            SessionEvent::BufferMinutes {
                kind: BufferKind::Walking,
                minutes: 7.5
            }
        );
        match &events[3].event {
            SessionEvent::DrawSelectionChange { mode, routes } => {
                assert_eq!(*mode, DrawMode::SimpleSelect);
                assert_eq!(routes[0].geometry.0.len(), 2);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(events[4].event, SessionEvent::CloseFocus);
    }
}
