use std::time::Instant;

use geo::Point;

use crate::model::surface::{FeatureKey, MapFeature};

/// a school that can be placed in focus.
#[derive(Debug, Clone, PartialEq)]
pub struct School {
    pub name: String,
    pub location: Point<f64>,
    pub key: FeatureKey,
}

impl School {
    /// reads a school from a schools-layer feature. features without a name or
    /// a usable location are not schools.
    pub fn from_feature(feature: &MapFeature, name_property: &str) -> Option<School> {
        let name = feature.property_string(name_property)?;
        let location = feature.anchor()?;
        Some(School {
            name,
            location,
            key: feature.key.clone(),
        })
    }

    /// geocoder matching ignores surrounding whitespace and case.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        !query.is_empty() && self.name.trim().to_lowercase() == query.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    Unfocused,
    Focused,
    /// a failed search message is on screen until its deadline
    FocusedWithFailureMessage,
}

/// the focused school and whether its focus view is currently applied. the view
/// is suspended while the schools layer is hidden.
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    pub school_in_focus: Option<School>,
    pub is_focus_mode: bool,
    pub failure_deadline: Option<Instant>,
}

impl FocusState {
    pub fn phase(&self) -> FocusPhase {
        if self.failure_deadline.is_some() {
            FocusPhase::FocusedWithFailureMessage
        } else if self.school_in_focus.is_some() {
            FocusPhase::Focused
        } else {
            FocusPhase::Unfocused
        }
    }

    /// true once when the failure message deadline has passed.
    pub fn failure_expired(&mut self, now: Instant) -> bool {
        match self.failure_deadline {
            Some(deadline) if deadline <= now => {
                self.failure_deadline = None;
                true
            }
            _ => false,
        }
    }
}
