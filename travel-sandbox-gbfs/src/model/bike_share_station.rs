use geo::Point;
use geojson::{feature::Id, Feature, JsonObject};
use serde_json::Value;

use super::{StationId, StationInformation, StationStatus};

/// a station after joining its static information with its live status. the
/// availability fields stay empty for stations the status feed did not report.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeShareStation {
    pub station_id: StationId,
    pub name: String,
    pub location: Point<f64>,
    pub num_bikes_available: Option<u32>,
    pub num_docks_available: Option<u32>,
    pub is_charging_station: Option<bool>,
}

impl BikeShareStation {
    pub fn new(information: StationInformation, status: Option<&StationStatus>) -> Self {
        Self {
            station_id: information.station_id,
            name: information.name,
            location: Point::new(information.lon, information.lat),
            num_bikes_available: status.and_then(|s| s.num_bikes_available),
            num_docks_available: status.and_then(|s| s.num_docks_available),
            is_charging_station: status.and_then(|s| s.is_charging_station),
        }
    }

    /// GeoJSON point feature for this station. `id` becomes the feature id so
    /// the map can address the feature for highlighting.
    pub fn to_feature(&self, id: usize) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(String::from("name"), Value::from(self.name.clone()));
        if let Some(n) = self.num_bikes_available {
            properties.insert(String::from("num_bikes_available"), Value::from(n));
        }
        if let Some(n) = self.num_docks_available {
            properties.insert(String::from("num_docks_available"), Value::from(n));
        }
        if let Some(c) = self.is_charging_station {
            properties.insert(String::from("is_charging_station"), Value::from(c));
        }
        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&self.location))),
            id: Some(Id::Number(serde_json::Number::from(id as u64))),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
