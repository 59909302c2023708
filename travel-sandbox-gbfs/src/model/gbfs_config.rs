use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{GbfsError, HttpGbfsFeed};

/// endpoints for a GBFS v1 system, queried in order: station information, then station status.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GbfsConfig {
    pub station_information_url: String,
    pub station_status_url: String,
    /// request timeout in seconds. no timeout when omitted.
    #[serde(default)]
    pub timeout_secs: Option<f64>,
}

impl GbfsConfig {
    pub const TORONTO_STATION_INFORMATION_URL: &'static str =
        "https://tor.publicbikesystem.net/ube/gbfs/v1/en/station_information";
    pub const TORONTO_STATION_STATUS_URL: &'static str =
        "https://tor.publicbikesystem.net/ube/gbfs/v1/en/station_status";

    pub fn build(&self) -> Result<HttpGbfsFeed, GbfsError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs_f64(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GbfsError::ClientError(e.to_string()))?;
        Ok(HttpGbfsFeed::new(client, self.clone()))
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self {
            station_information_url: String::from(Self::TORONTO_STATION_INFORMATION_URL),
            station_status_url: String::from(Self::TORONTO_STATION_STATUS_URL),
            timeout_secs: Some(30.0),
        }
    }
}
