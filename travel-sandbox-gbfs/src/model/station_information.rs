use serde::Deserialize;

use super::StationId;

/// static station attributes from the station_information feed.
#[derive(Deserialize, Debug, Clone)]
pub struct StationInformation {
    pub station_id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}
