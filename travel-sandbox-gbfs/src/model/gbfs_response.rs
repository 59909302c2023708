use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// the envelope every GBFS v1 feed file shares.
#[derive(Deserialize, Debug, Clone)]
pub struct GbfsResponse<T> {
    /// POSIX timestamp of the last time the data was updated
    #[serde(default)]
    pub last_updated: Option<i64>,
    /// seconds before the data should be fetched again
    #[serde(default)]
    pub ttl: Option<i64>,
    pub data: GbfsStations<T>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GbfsStations<T> {
    pub stations: Vec<T>,
}

impl<T> GbfsResponse<T> {
    pub fn last_updated_time(&self) -> Option<DateTime<Utc>> {
        self.last_updated
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// identifier shared by station_information and station_status rows. some
/// systems publish it as a number, so both forms are accepted and compared as text.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "RawStationId")]
pub struct StationId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStationId {
    Text(String),
    Number(i64),
}

impl From<RawStationId> for StationId {
    fn from(value: RawStationId) -> Self {
        match value {
            RawStationId::Text(s) => StationId(s),
            RawStationId::Number(n) => StationId(n.to_string()),
        }
    }
}

impl Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
