mod bike_share_station;
mod gbfs_config;
mod gbfs_error;
mod gbfs_feed;
mod gbfs_response;
pub mod refresh_ops;
mod station_information;
mod station_status;

pub use bike_share_station::BikeShareStation;
pub use gbfs_config::GbfsConfig;
pub use gbfs_error::GbfsError;
pub use gbfs_feed::{GbfsFeed, HttpGbfsFeed};
pub use gbfs_response::{GbfsResponse, GbfsStations, StationId};
pub use station_information::StationInformation;
pub use station_status::StationStatus;
