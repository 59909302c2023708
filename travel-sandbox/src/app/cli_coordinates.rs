use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// a route given on the command line as `lon,lat;lon,lat;...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliRoute(pub Vec<Coord<f64>>);

impl CliRoute {
    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(self.0.clone())
    }
}

impl std::fmt::Display for CliRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .0
            .iter()
            .map(|c| format!("{},{}", c.x, c.y))
            .collect::<Vec<_>>();
        write!(f, "{}", pairs.join(";"))
    }
}

pub fn parse_route(s: &str) -> Result<CliRoute, String> {
    let coords = s
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(parse_coordinate)
        .collect::<Result<Vec<_>, _>>()?;
    if coords.len() < 2 {
        return Err(format!(
            "route needs at least 2 coordinates as lon,lat;lon,lat, got: {s}"
        ));
    }
    Ok(CliRoute(coords))
}

pub fn parse_coordinate(s: &str) -> Result<Coord<f64>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected format: lon,lat, got: {s}"));
    }
    let x = parse_lon(parts[0])?;
    let y = parse_lat(parts[1])?;
    Ok(Coord { x, y })
}

pub fn parse_lat(lat: &str) -> Result<f64, String> {
    parse_num(lat, -90.0, 90.0).map_err(|e| format!("invalid latitude: {e}"))
}

pub fn parse_lon(lon: &str) -> Result<f64, String> {
    parse_num(lon, -180.0, 180.0).map_err(|e| format!("invalid longitude: {e}"))
}

fn parse_num(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("not a number: {s}"))?;
    if v < min || max < v {
        Err(format!(
            "number '{v}' is not valid, must be in range [{min},{max}]"
        ))
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let route = parse_route("-79.40,43.70; -79.39,43.70;-79.38,43.70;").expect("test invariant failed");
        assert_eq!(route.0.len(), 3);
        assert_eq!(route.0[1], Coord { x: -79.39, y: 43.70 });
        assert_eq!(route.to_string(), "-79.4,43.7;-79.39,43.7;-79.38,43.7");
    }

    #[test]
    fn test_parse_route_errors() {
        assert!(parse_route("-79.40,43.70").is_err());
        assert!(parse_route("-79.40,43.70;-79.39").is_err());
        assert!(parse_route("-79.40,43.70;43.70,-190.0").is_err());
        assert!(parse_route("-79.40,43.70;abc,43.7").is_err());
    }

    #[test]
    fn test_parse_lat_range() {
        assert_eq!(parse_lat(" 43.7 "), Ok(43.7));
        assert!(parse_lat("91").is_err());
    }
}
