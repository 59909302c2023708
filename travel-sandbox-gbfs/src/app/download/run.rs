use std::path::Path;

use crate::model::{refresh_ops, GbfsConfig, GbfsError};

/// fetches the current bike-share stations and writes them to a GeoJSON file.
///
/// # Arguments
/// * config - GBFS endpoints and request timeout
/// * output_file - path of the GeoJSON file to write
///
/// # Result
/// If successful, returns nothing, otherwise an error
pub fn run_gbfs_download(config: &GbfsConfig, output_file: &Path) -> Result<(), GbfsError> {
    log::debug!(
        "run_gbfs_download with information={}, status={}, output_file={output_file:?}",
        config.station_information_url,
        config.station_status_url
    );
    let feed = config.build()?;
    let collection = refresh_ops::refresh(&feed)?;
    let n_stations = collection.features.len();
    let json = serde_json::to_string(&collection)
        .map_err(|e| GbfsError::SerializeError(e.to_string()))?;
    std::fs::write(output_file, json)
        .map_err(|e| GbfsError::WriteError(output_file.to_string_lossy().to_string(), e))?;
    log::info!("wrote {n_stations} bike-share stations to {output_file:?}");
    Ok(())
}
