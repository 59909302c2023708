use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// logical name of a map layer, such as `schools` or `cycling-network`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub const SCHOOLS: &'static str = "schools";
    pub const BIKE_SHARE_STATIONS: &'static str = "bike-share-stations";
    pub const SCHOOL_BUFFERS: &'static str = "school-buffers-layer";

    pub fn schools() -> Self {
        Self::from(Self::SCHOOLS)
    }

    pub fn school_buffers() -> Self {
        Self::from(Self::SCHOOL_BUFFERS)
    }

    pub fn is_schools(&self) -> bool {
        self.0 == Self::SCHOOLS
    }

    pub fn is_bike_share(&self) -> bool {
        self.0 == Self::BIKE_SHARE_STATIONS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(value: &str) -> Self {
        LayerId(value.to_string())
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
