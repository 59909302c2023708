use geo::{LineString, Point};
use travel_sandbox_core::util::geo_utils;
use uom::si::{f64::Length, length::meter};

use crate::model::buffer::{BufferEngine, BufferKind};

/// length and walking/cycling travel time of a drawn route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimate {
    pub length: Length,
    pub walking_minutes: f64,
    pub cycling_minutes: f64,
    /// where the route's popup is placed: its middle vertex
    pub anchor: Point<f64>,
}

impl RouteEstimate {
    /// None for a route with no vertices.
    pub fn new(route: &LineString<f64>, engine: &BufferEngine) -> Option<RouteEstimate> {
        let anchor = geo_utils::middle_coordinate(route)?;
        let length = geo_utils::haversine_length(route);
        Some(RouteEstimate {
            length,
            walking_minutes: engine.travel_minutes(BufferKind::Walking, length),
            cycling_minutes: engine.travel_minutes(BufferKind::Cycling, length),
            anchor: Point::from(anchor),
        })
    }

    pub fn to_html(&self) -> String {
        format!(
            "<p>Route Distance: {:.2}m</p><p>Estimated Walking Time: {:.2}mins</p><p>Estimated Cycling Time: {:.2}mins</p>",
            self.length.get::<meter>(),
            self.walking_minutes,
            self.cycling_minutes
        )
    }
}

impl std::fmt::Display for RouteEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "distance: {:.2}m, walking: {:.2}mins, cycling: {:.2}mins",
            self.length.get::<meter>(),
            self.walking_minutes,
            self.cycling_minutes
        )
    }
}
