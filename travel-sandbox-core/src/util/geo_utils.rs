use geo::{Centroid, Coord, Destination, Distance, Geometry, Haversine, Length, LineString, Point, Polygon};

/// picks a single representative location for a geometry, used to place popups
/// and markers. assumes that
/// - points are their own anchor
/// - linestrings anchor at their middle vertex, matching how routes are labeled
/// - other geometry types can use their centroids
///
/// since a centroid may not exist (for example, empty geometries), the result may be None
///
/// # Arguments
///
/// * `geometry` - value to find an anchor for
///
/// # Returns
///
/// * an anchor point if possible, otherwise None
pub fn get_anchor_point(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    match geometry {
        Geometry::Point(g) => Some(*g),
        Geometry::Line(g) => Some(g.centroid()),
        Geometry::LineString(g) => middle_coordinate(g).map(Point::from),
        Geometry::Polygon(g) => g.centroid(),
        Geometry::MultiPoint(g) => g.centroid(),
        Geometry::MultiLineString(g) => g.centroid(),
        Geometry::MultiPolygon(g) => g.centroid(),
        Geometry::GeometryCollection(g) => g.centroid(),
        Geometry::Rect(g) => Some(g.centroid()),
        Geometry::Triangle(g) => Some(g.centroid()),
    }
}

/// the vertex at index `len / 2` of a linestring, or None when it has no vertices.
pub fn middle_coordinate(line: &LineString<f64>) -> Option<Coord<f64>> {
    line.0.get(line.0.len() / 2).copied()
}

/// length of a linestring over the surface of the earth.
pub fn haversine_length(line: &LineString<f64>) -> uom::si::f64::Length {
    uom::si::f64::Length::new::<uom::si::length::meter>(Haversine.length(line))
}

/// great-circle distance between two points.
pub fn haversine_distance(src: Point<f64>, dst: Point<f64>) -> uom::si::f64::Length {
    uom::si::f64::Length::new::<uom::si::length::meter>(Haversine.distance(src, dst))
}

/// approximates the set of all points within `radius` of `center` as a polygon
/// with `steps` vertices placed by great-circle destination. the ring winds
/// counter-clockwise, as GeoJSON expects for exterior rings.
///
/// # Arguments
///
/// * `center` - WGS84 point to buffer
/// * `radius` - buffer distance
/// * `steps` - number of vertices on the ring, clamped to at least 3
///
/// # Returns
///
/// * a closed polygon with no interior rings
pub fn circle_polygon(center: Point<f64>, radius: uom::si::f64::Length, steps: usize) -> Polygon<f64> {
    let steps = steps.max(3);
    let meters = radius.get::<uom::si::length::meter>();
    let ring = (0..steps)
        .map(|i| {
            let bearing = -360.0 * (i as f64) / (steps as f64);
            Haversine.destination(center, bearing, meters).0
        })
        .collect::<Vec<_>>();
    Polygon::new(LineString::new(ring), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, Winding};
    use uom::si::length::meter;

    #[test]
    fn test_circle_vertices_at_radius() {
        let center = point!(x: -79.370729, y: 43.719518);
        let radius = uom::si::f64::Length::new::<meter>(400.0);
        let circle = circle_polygon(center, radius, 64);
        // ring is closed, so one extra coordinate
        assert_eq!(circle.exterior().0.len(), 65);
        for coord in circle.exterior().coords() {
            let d = haversine_distance(center, Point::from(*coord)).get::<meter>();
            assert!((d - 400.0).abs() < 0.01, "vertex {coord:?} is {d}m from center");
        }
    }

    #[test]
    fn test_circle_is_counter_clockwise() {
        let center = point!(x: -79.4, y: 43.7);
        let radius = uom::si::f64::Length::new::<meter>(1250.0);
        let circle = circle_polygon(center, radius, 32);
        assert!(circle.exterior().is_ccw());
    }

    #[test]
    fn test_circle_clamps_steps() {
        let center = point!(x: 0.0, y: 0.0);
        let radius = uom::si::f64::Length::new::<meter>(10.0);
        let circle = circle_polygon(center, radius, 0);
        assert_eq!(circle.exterior().0.len(), 4);
    }

    #[test]
    fn test_middle_coordinate() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 2.0), (x: 3.0, y: 3.0)];
        assert_eq!(middle_coordinate(&line), Some(Coord { x: 2.0, y: 2.0 }));
        assert_eq!(middle_coordinate(&LineString::new(vec![])), None);
    }

    #[test]
    fn test_anchor_of_linestring_is_middle_vertex() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 5.0, y: 0.0)];
        let anchor = get_anchor_point(&Geometry::LineString(line));
        assert_eq!(anchor, Some(point!(x: 1.0, y: 0.0)));
    }

    #[test]
    fn test_haversine_length_one_degree_longitude_at_equator() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let length = haversine_length(&line).get::<meter>();
        // mean earth radius 6371008.8m
        assert!((length - 111_195.08).abs() < 1.0, "unexpected length {length}");
    }
}
