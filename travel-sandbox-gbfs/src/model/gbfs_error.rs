use thiserror::Error;

#[derive(Error, Debug)]
pub enum GbfsError {
    #[error("failure building GBFS http client: {0}")]
    ClientError(String),
    #[error("bike-share feed unavailable: {0}")]
    Unavailable(String),
    #[error("failure requesting {url}: {source}")]
    RequestError { url: String, source: reqwest::Error },
    #[error("request to {url} returned status {status}")]
    StatusError { url: String, status: u16 },
    #[error("failure decoding GBFS response from {url}: {source}")]
    DeserializeError {
        url: String,
        source: serde_json::Error,
    },
    #[error("failure serializing bike-share stations: {0}")]
    SerializeError(String),
    #[error("failure writing to file {0}: {1}")]
    WriteError(String, std::io::Error),
}
