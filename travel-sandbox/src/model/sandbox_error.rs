use thiserror::Error;
use travel_sandbox_gbfs::model::GbfsError;

use super::layer::LayerId;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("failure reading sandbox configuration: {0}")]
    ConfigurationError(String),
    #[error("layer '{0}' is not registered")]
    UnknownLayer(LayerId),
    #[error("buffer duration must be a non-negative number of minutes, found {0}")]
    InvalidBufferDuration(f64),
    #[error("invalid map feature: {0}")]
    InvalidFeature(String),
    #[error("failure exporting map image: {0}")]
    ExportError(String),
    #[error("failure replaying session: {0}")]
    ReplayError(String),
    #[error("failure refreshing bike-share stations: {source}")]
    BikeShareError {
        #[from]
        source: GbfsError,
    },
    #[error("failure reading file: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
