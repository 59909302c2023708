use std::path::Path;

use clap::{Parser, Subcommand};
use geo::Point;
use serde::{Deserialize, Serialize};

use super::{parse_lat, parse_lon, parse_route, replay, CliRoute};
use crate::{
    config::SandboxConfig,
    model::{
        buffer::{BufferEngine, BufferKind},
        route::RouteEstimate,
        SandboxError,
    },
};

/// command line tool for the school travel sandbox: catchment buffers, route
/// estimates and scripted session replays
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct SandboxCliArguments {
    /// select the sandbox operation to run
    #[command(subcommand)]
    pub op: SandboxOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum SandboxOperation {
    /// prints the cycling and walking buffers around a point as GeoJSON
    Buffers {
        #[arg(long, allow_negative_numbers = true, value_parser = parse_lon)]
        lon: f64,
        #[arg(long, allow_negative_numbers = true, value_parser = parse_lat)]
        lat: f64,
        /// overrides the configured walking buffer duration
        #[arg(long)]
        walking_minutes: Option<f64>,
        /// overrides the configured cycling buffer duration
        #[arg(long)]
        cycling_minutes: Option<f64>,
        /// sandbox configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<String>,
    },
    /// prints the length and walking/cycling times of a route
    Route {
        /// route vertices as lon,lat;lon,lat;...
        #[arg(long, allow_hyphen_values = true, value_parser = parse_route)]
        coordinates: CliRoute,
        #[arg(short, long)]
        config: Option<String>,
    },
    /// drives a headless sandbox session from a JSON event log and prints the
    /// final session state
    Replay {
        /// GeoJSON file with the school features
        #[arg(long)]
        schools: String,
        /// JSON array of timed session events
        #[arg(long)]
        events: String,
        /// extra layer data as layer_id=path.geojson, repeatable
        #[arg(long, value_parser = replay::parse_layer_data)]
        layer_data: Vec<(String, String)>,
        /// skips the bike-share feed instead of fetching it
        #[arg(long)]
        offline: bool,
        #[arg(short, long)]
        config: Option<String>,
    },
}

impl SandboxOperation {
    pub fn run(&self) -> Result<(), SandboxError> {
        match self {
            SandboxOperation::Buffers {
                lon,
                lat,
                walking_minutes,
                cycling_minutes,
                config,
            } => {
                let config = load_config(config.as_ref())?;
                let mut engine = BufferEngine::from(&config);
                if let Some(minutes) = walking_minutes {
                    engine.set_minutes(BufferKind::Walking, *minutes)?;
                }
                if let Some(minutes) = cycling_minutes {
                    engine.set_minutes(BufferKind::Cycling, *minutes)?;
                }
                let buffers = engine.compute(Point::new(*lon, *lat));
                for feature in buffers.features() {
                    log::info!("{} buffer radius: {:?}", feature.kind, feature.radius);
                }
                let output = serde_json::to_string_pretty(&buffers.to_feature_collection())?;
                println!("{output}");
                Ok(())
            }
            SandboxOperation::Route {
                coordinates,
                config,
            } => {
                let config = load_config(config.as_ref())?;
                let engine = BufferEngine::from(&config);
                let estimate = RouteEstimate::new(&coordinates.to_line_string(), &engine)
                    .ok_or_else(|| {
                        SandboxError::InvalidFeature(format!("route has no vertices: {coordinates}"))
                    })?;
                println!("{estimate}");
                Ok(())
            }
            SandboxOperation::Replay {
                schools,
                events,
                layer_data,
                offline,
                config,
            } => {
                let config = load_config(config.as_ref())?;
                let summary = replay::run_replay(
                    config,
                    Path::new(schools),
                    layer_data,
                    Path::new(events),
                    *offline,
                )?;
                println!("{}", serde_json::to_string_pretty(&summary)?);
                Ok(())
            }
        }
    }
}

fn load_config(file: Option<&String>) -> Result<SandboxConfig, SandboxError> {
    let config = match file {
        Some(f) => SandboxConfig::try_from(f)?,
        None => SandboxConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_args() {
        let args = SandboxCliArguments::parse_from([
            "travel_sandbox",
            "buffers",
            "--lon",
            "-79.378",
            "--lat",
            "43.667",
            "--walking-minutes",
            "10",
        ]);
        match args.op {
            SandboxOperation::Buffers {
                lon,
                lat,
                walking_minutes,
                cycling_minutes,
                config,
            } => {
                assert_eq!(lon, -79.378);
                assert_eq!(lat, 43.667);
                assert_eq!(walking_minutes, Some(10.0));
                assert_eq!(cycling_minutes, None);
                assert!(config.is_none());
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_route_args() {
        let args = SandboxCliArguments::parse_from([
            "travel_sandbox",
            "route",
            "--coordinates",
            "-79.40,43.70;-79.38,43.70",
        ]);
        match args.op {
            SandboxOperation::Route { coordinates, .. } => assert_eq!(coordinates.0.len(), 2),
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_invalid_latitude_rejected() {
        let result = SandboxCliArguments::try_parse_from([
            "travel_sandbox",
            "buffers",
            "--lon",
            "-79.378",
            "--lat",
            "143.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_args() {
        let args = SandboxCliArguments::parse_from([
            "travel_sandbox",
            "replay",
            "--schools",
            "schools.geojson",
            "--events",
            "session.json",
            "--layer-data",
            "parks=parks.geojson",
            "--offline",
        ]);
        match args.op {
            SandboxOperation::Replay {
                layer_data,
                offline,
                ..
            } => {
                assert_eq!(
                    layer_data,
                    vec![(String::from("parks"), String::from("parks.geojson"))]
                );
                assert!(offline);
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }
}
