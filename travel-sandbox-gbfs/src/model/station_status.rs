use serde::Deserialize;

use super::StationId;

/// live availability from the station_status feed.
#[derive(Deserialize, Debug, Clone)]
pub struct StationStatus {
    pub station_id: StationId,
    #[serde(default)]
    pub num_bikes_available: Option<u32>,
    #[serde(default)]
    pub num_docks_available: Option<u32>,
    #[serde(default)]
    pub is_charging_station: Option<bool>,
}
