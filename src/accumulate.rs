use geo::Point;

use crate::dataset::{ElevationDataset, ElevationPoint, RouteDataset, RoutePoint};
use crate::distance::haversine_km;
use crate::geo_point::GeoPoint;

/// Assign cumulative distance (km) to every point and derive the route and
/// the elevation profile from the same distance-stamped sequence.
///
/// The profile keeps only points with a positive elevation, so the chart and
/// the map always agree on distances.
pub fn accumulate(mut points: Vec<GeoPoint>) -> (RouteDataset, ElevationDataset) {
    let mut total_distance = 0.0;
    let mut previous: Option<Point> = None;

    for point in points.iter_mut() {
        let current = Point::from(&*point);
        if let Some(prev) = previous {
            total_distance += haversine_km(prev, current);
        }
        point.distance = total_distance;
        previous = Some(current);
    }

    let elevation_points = points
        .iter()
        .filter_map(|p| {
            p.profile_elevation().map(|elevation| ElevationPoint {
                distance: p.distance,
                elevation,
                time: p.time.clone(),
            })
        })
        .collect();

    let route = RouteDataset::from_points(points.iter().map(RoutePoint::from).collect());
    let elevation = ElevationDataset {
        total_distance: route.total_distance,
        points: elevation_points,
    };

    (route, elevation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::EARTH_RADIUS_KM;
    use crate::reduce::tests::equator_track;
    use approx::assert_relative_eq;

    #[test]
    fn distances_start_at_zero_and_never_decrease() {
        let (route, _) = accumulate(equator_track(&[100.0, 250.0, 0.0, 40.0]));

        assert_eq!(route.points[0].distance, 0.0);
        for pair in route.points.windows(2) {
            assert!(pair[1].distance >= pair[0].distance);
        }
        assert_eq!(route.total_distance, route.points.last().unwrap().distance);
        assert_relative_eq!(route.total_distance, 0.39, epsilon = 1e-9);
    }

    #[test]
    fn profile_uses_route_distances() {
        let mut track = equator_track(&[1000.0, 1000.0, 1000.0]);
        track[0].elevation = Some(420.0);
        track[1].elevation = None;
        track[2].elevation = Some(0.0);
        track[3].elevation = Some(455.5);

        let (route, elevation) = accumulate(track);

        assert_eq!(route.points.len(), 4);
        assert_eq!(route.points[1].elevation, 0.0);
        assert_eq!(route.points[2].elevation, 0.0);

        assert_eq!(elevation.points.len(), 2);
        assert_eq!(elevation.points[0].distance, route.points[0].distance);
        assert_eq!(elevation.points[1].distance, route.points[3].distance);
        assert_eq!(elevation.points[1].elevation, 455.5);
        assert_eq!(elevation.total_distance, route.total_distance);
    }

    #[test]
    fn times_pass_through() {
        let mut track = equator_track(&[10.0, 10.0]);
        track[0].time = Some("06:30".to_string());
        track[2].time = Some("06:45".to_string());

        let (route, _) = accumulate(track);

        assert_eq!(route.start_time.as_deref(), Some("06:30"));
        assert_eq!(route.end_time.as_deref(), Some("06:45"));
        assert_eq!(route.points[1].time, None);
    }

    #[test]
    fn single_point_track() {
        let track = vec![GeoPoint::new(46.5, 7.9).with_elevation(Some(0.0))];
        let (route, elevation) = accumulate(track);

        assert_eq!(route.total_distance, 0.0);
        assert_eq!(route.points.len(), 1);
        assert_eq!(route.points[0].distance, 0.0);
        assert!(elevation.points.is_empty());

        let (_, elevation) = accumulate(vec![GeoPoint::new(46.5, 7.9)]);
        assert!(elevation.points.is_empty());
    }

    #[test]
    fn segment_lengths_use_fixed_earth_radius() {
        let track = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0)];
        let (route, _) = accumulate(track);
        assert_relative_eq!(
            route.total_distance,
            2.0 * EARTH_RADIUS_KM * 1.0_f64.to_radians(),
            epsilon = 1e-9
        );
    }
}
