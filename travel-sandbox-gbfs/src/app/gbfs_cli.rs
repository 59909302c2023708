use std::{path::Path, time::Duration};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::model::{GbfsConfig, GbfsError};

/// command line tool providing GBFS bike-share scripts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GbfsCliArguments {
    /// select the GBFS operation to run
    #[command(subcommand)]
    pub op: GbfsOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum GbfsOperation {
    /// fetches station information and live station status, joins them by
    /// station id, and writes the stations as a GeoJSON feature collection.
    Download {
        /// output GeoJSON file path.
        #[arg(short, long, default_value_t = String::from("bike-share-stations.geojson"))]
        output_file: String,
        /// GBFS station_information endpoint
        #[arg(long, default_value_t = String::from(GbfsConfig::TORONTO_STATION_INFORMATION_URL))]
        station_information_url: String,
        /// GBFS station_status endpoint
        #[arg(long, default_value_t = String::from(GbfsConfig::TORONTO_STATION_STATUS_URL))]
        station_status_url: String,
        /// per-request timeout. provide in human-readable time values
        /// 500ms, 30s, 2m...
        #[arg(short, long, value_parser = parse_duration, default_value = "30s")]
        timeout: Duration,
    },
}

impl GbfsOperation {
    pub fn run(&self) -> Result<(), GbfsError> {
        match self {
            GbfsOperation::Download {
                output_file,
                station_information_url,
                station_status_url,
                timeout,
            } => {
                let config = GbfsConfig {
                    station_information_url: station_information_url.clone(),
                    station_status_url: station_status_url.clone(),
                    timeout_secs: Some(timeout.as_secs_f64()),
                };
                crate::app::download::run_gbfs_download(&config, Path::new(output_file))
            }
        }
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s).map_err(|e| format!("Invalid duration: {}", e))
}
