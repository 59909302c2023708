use serde::de::DeserializeOwned;

use super::{GbfsConfig, GbfsError, GbfsResponse, StationInformation, StationStatus};

/// source of the two GBFS files needed to describe bike-share stations.
pub trait GbfsFeed {
    fn station_information(&self) -> Result<GbfsResponse<StationInformation>, GbfsError>;
    fn station_status(&self) -> Result<GbfsResponse<StationStatus>, GbfsError>;
}

/// reads GBFS files over HTTP. each call is a single blocking GET with no retry.
pub struct HttpGbfsFeed {
    client: reqwest::blocking::Client,
    config: GbfsConfig,
}

impl HttpGbfsFeed {
    pub fn new(client: reqwest::blocking::Client, config: GbfsConfig) -> Self {
        Self { client, config }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GbfsError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| GbfsError::RequestError {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(GbfsError::StatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|source| GbfsError::RequestError {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| GbfsError::DeserializeError {
            url: url.to_string(),
            source,
        })
    }
}

impl GbfsFeed for HttpGbfsFeed {
    fn station_information(&self) -> Result<GbfsResponse<StationInformation>, GbfsError> {
        self.get_json(&self.config.station_information_url)
    }

    fn station_status(&self) -> Result<GbfsResponse<StationStatus>, GbfsError> {
        self.get_json(&self.config.station_status_url)
    }
}
