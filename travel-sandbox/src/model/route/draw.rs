use geo::LineString;
use serde::{Deserialize, Serialize};

/// modes reported by the drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    SimpleSelect,
    /// vertex editing of an existing route
    DirectSelect,
    DrawLineString,
}

/// a line drawn by the user with the drawing tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnRoute {
    pub id: String,
    pub geometry: LineString<f64>,
}
