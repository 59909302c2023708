use std::collections::{HashMap, HashSet};

use geojson::FeatureCollection;

use super::{BikeShareStation, GbfsError, GbfsFeed, StationId, StationInformation, StationStatus};

/// fetches station information, then station status, and joins them into a
/// feature collection of station points. an error from either request is
/// returned as-is.
pub fn refresh(feed: &dyn GbfsFeed) -> Result<FeatureCollection, GbfsError> {
    let information = feed.station_information()?;
    log::debug!(
        "station_information: {} stations, last updated {:?}",
        information.data.stations.len(),
        information.last_updated_time()
    );
    let status = feed.station_status()?;
    log::debug!(
        "station_status: {} stations, last updated {:?}",
        status.data.stations.len(),
        status.last_updated_time()
    );
    let stations = join_stations(information.data.stations, &status.data.stations);
    Ok(to_feature_collection(&stations))
}

/// attaches live availability to each station by `station_id`, preserving the
/// order of the information feed. stations without a status row keep empty
/// availability; status rows without a station are dropped.
pub fn join_stations(
    information: Vec<StationInformation>,
    status: &[StationStatus],
) -> Vec<BikeShareStation> {
    // later rows win when a status feed repeats a station
    let status_lookup: HashMap<&StationId, &StationStatus> =
        status.iter().map(|s| (&s.station_id, s)).collect();
    let known: HashSet<StationId> = information.iter().map(|i| i.station_id.clone()).collect();
    let orphans = status
        .iter()
        .filter(|s| !known.contains(&s.station_id))
        .count();
    if orphans > 0 {
        log::debug!("ignoring {orphans} status rows with no matching station");
    }

    information
        .into_iter()
        .map(|info| {
            let station_status = status_lookup.get(&info.station_id).copied();
            if station_status.is_none() {
                log::debug!("station {} has no live status", info.station_id);
            }
            BikeShareStation::new(info, station_status)
        })
        .collect()
}

pub fn to_feature_collection(stations: &[BikeShareStation]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: stations
            .iter()
            .enumerate()
            .map(|(idx, station)| station.to_feature(idx))
            .collect(),
        foreign_members: None,
    }
}
