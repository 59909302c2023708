use std::time::{Duration, Instant};

use crate::model::{layer::LayerId, surface::MapFeature};

/// identifies one pending single click. ids only increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u64);

#[derive(Debug, Clone)]
pub struct PendingClick {
    pub gesture_id: GestureId,
    pub feature: MapFeature,
    pub deadline: Instant,
}

/// holds single clicks until their double-click window elapses. each feature
/// has its own pending click, so clicks on different features never cancel
/// each other.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    next_id: u64,
    window: Duration,
    pending: Vec<PendingClick>,
}

impl GestureTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            next_id: 0,
            window,
            pending: vec![],
        }
    }

    /// starts a click gesture. a click already pending on the same feature is
    /// superseded.
    pub fn open_click(&mut self, feature: MapFeature, now: Instant) -> GestureId {
        self.pending.retain(|p| !p.feature.is_same_feature(&feature));
        let gesture_id = GestureId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingClick {
            gesture_id,
            feature,
            deadline: now + self.window,
        });
        gesture_id
    }

    /// drops the click pending on this feature, if any.
    pub fn cancel_for(&mut self, feature: &MapFeature) -> Option<PendingClick> {
        let idx = self
            .pending
            .iter()
            .position(|p| p.feature.is_same_feature(feature))?;
        Some(self.pending.remove(idx))
    }

    /// removes and returns the clicks whose window has elapsed, oldest first.
    pub fn take_expired(&mut self, now: Instant) -> Vec<PendingClick> {
        let (expired, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.deadline <= now);
        self.pending = pending;
        let mut expired = expired;
        expired.sort_by_key(|p| p.gesture_id);
        expired
    }

    /// drops every click pending on features of this layer.
    pub fn cancel_layer(&mut self, layer_id: &LayerId) -> Vec<PendingClick> {
        let (cancelled, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|p| p.feature.layer_id == *layer_id);
        self.pending = pending;
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::surface::FeatureKey;
    use geo::{point, Geometry};

    fn feature(layer: &str, key: &str) -> MapFeature {
        MapFeature::new(
            LayerId::from(layer),
            FeatureKey::from(key),
            Geometry::Point(point!(x: -79.4, y: 43.7)),
            Default::default(),
        )
    }

    #[test]
    fn test_expires_after_window() {
        let now = Instant::now();
        let mut tracker = GestureTracker::new(Duration::from_millis(500));
        let id = tracker.open_click(feature("parks", "1"), now);
        assert!(tracker
            .take_expired(now + Duration::from_millis(499))
            .is_empty());
        let expired = tracker.take_expired(now + Duration::from_millis(500));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].gesture_id, id);
        assert!(tracker.take_expired(now + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_cancel_only_affects_same_feature() {
        let now = Instant::now();
        let mut tracker = GestureTracker::new(Duration::from_millis(500));
        let a = tracker.open_click(feature("schools", "1"), now);
        let b = tracker.open_click(feature("schools", "2"), now + Duration::from_millis(50));
        assert!(b > a);

        let cancelled = tracker
            .cancel_for(&feature("schools", "1"))
            .expect("test invariant failed");
        assert_eq!(cancelled.gesture_id, a);
        assert!(tracker.cancel_for(&feature("parks", "1")).is_none());

        let expired = tracker.take_expired(now + Duration::from_secs(1));
        assert_eq!(
            expired.iter().map(|p| p.gesture_id).collect::<Vec<_>>(),
            vec![b]
        );
    }

    #[test]
    fn test_reclick_supersedes() {
        let now = Instant::now();
        let mut tracker = GestureTracker::new(Duration::from_millis(500));
        tracker.open_click(feature("parks", "1"), now);
        let second = tracker.open_click(feature("parks", "1"), now + Duration::from_millis(100));
        assert!(tracker
            .take_expired(now + Duration::from_millis(550))
            .is_empty());
        let expired = tracker.take_expired(now + Duration::from_millis(600));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].gesture_id, second);
    }

    #[test]
    fn test_cancel_layer() {
        let now = Instant::now();
        let mut tracker = GestureTracker::new(Duration::from_millis(500));
        let a = tracker.open_click(feature("parks", "1"), now);
        let b = tracker.open_click(feature("schools", "1"), now);
        let c = tracker.open_click(feature("parks", "2"), now);

        let cancelled = tracker.cancel_layer(&LayerId::from("parks"));
        assert_eq!(
            cancelled.iter().map(|p| p.gesture_id).collect::<Vec<_>>(),
            vec![a, c]
        );
        assert!(tracker.cancel_layer(&LayerId::from("parks")).is_empty());

        let expired = tracker.take_expired(now + Duration::from_secs(1));
        assert_eq!(
            expired.iter().map(|p| p.gesture_id).collect::<Vec<_>>(),
            vec![b]
        );
    }
}
