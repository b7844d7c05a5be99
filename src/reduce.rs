use geo::Point;
use log::debug;

use crate::distance::haversine_km;
use crate::geo_point::GeoPoint;

/// Drop points closer than `min_distance_m` meters to the last retained point.
///
/// The first point is always kept, and so is the last one even when it sits
/// too close to its retained predecessor. A threshold of 0 or less keeps
/// everything.
pub fn reduce(points: Vec<GeoPoint>, min_distance_m: f64) -> (Vec<GeoPoint>, ReduceStats) {
    let original_count = points.len();

    if min_distance_m <= 0.0 || original_count <= 2 {
        return (
            points,
            ReduceStats {
                original_count,
                reduced_count: original_count,
            },
        );
    }

    let min_distance_km = min_distance_m / 1000.0;
    let last_index = original_count - 1;
    let mut reduced: Vec<GeoPoint> = Vec::with_capacity(original_count);

    for (i, point) in points.into_iter().enumerate() {
        let keep = match reduced.last() {
            None => true,
            Some(anchor) => {
                i == last_index
                    || haversine_km(Point::from(anchor), Point::from(&point)) >= min_distance_km
            }
        };
        if keep {
            reduced.push(point);
        }
    }

    let stats = ReduceStats {
        original_count,
        reduced_count: reduced.len(),
    };
    debug!(
        "Reduced {} points to {} (min distance {}m)",
        stats.original_count, stats.reduced_count, min_distance_m
    );

    (reduced, stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceStats {
    pub original_count: usize,
    pub reduced_count: usize,
}

impl ReduceStats {
    pub fn removed_count(&self) -> usize {
        self.original_count - self.reduced_count
    }

    pub fn removal_percentage(&self) -> f64 {
        if self.original_count == 0 {
            return 0.0;
        }
        (self.removed_count() as f64 / self.original_count as f64) * 100.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::distance::EARTH_RADIUS_KM;

    /// Points along the equator, each `spacings_m[i]` meters after the previous.
    pub(crate) fn equator_track(spacings_m: &[f64]) -> Vec<GeoPoint> {
        let km_per_degree = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        let mut offset_m = 0.0;
        let mut points = vec![GeoPoint::new(0.0, 0.0)];
        for spacing in spacings_m {
            offset_m += spacing;
            points.push(GeoPoint::new(0.0, offset_m / 1000.0 / km_per_degree));
        }
        points
    }

    fn lons(points: &[GeoPoint]) -> Vec<f64> {
        points.iter().map(|p| p.lon).collect()
    }

    #[test]
    fn non_positive_threshold_is_identity() {
        let track = equator_track(&[0.5, 2.0, 0.3, 4.0]);
        for threshold in [0.0, -5.0] {
            let (reduced, stats) = reduce(track.clone(), threshold);
            assert_eq!(reduced, track);
            assert_eq!(stats.removed_count(), 0);
        }
    }

    #[test]
    fn keeps_points_beyond_threshold_from_last_retained() {
        let track = equator_track(&[0.5, 2.0, 0.3, 4.0]);
        let (reduced, stats) = reduce(track.clone(), 1.0);

        assert_eq!(lons(&reduced), vec![track[0].lon, track[2].lon, track[4].lon]);
        assert_eq!(stats.original_count, 5);
        assert_eq!(stats.reduced_count, 3);
        assert!((stats.removal_percentage() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn last_point_is_always_retained() {
        let track = equator_track(&[5.0, 5.0, 0.2]);
        let (reduced, _) = reduce(track.clone(), 1.0);

        assert_eq!(reduced.len(), 4);
        assert_eq!(reduced.first(), track.first());
        assert_eq!(reduced.last(), track.last());
    }

    #[test]
    fn dense_track_collapses_to_endpoints() {
        let track = equator_track(&[0.1; 20]);
        let (reduced, _) = reduce(track.clone(), 10.0);

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0], track[0]);
        assert_eq!(reduced[1], track[20]);
    }

    #[test]
    fn tiny_tracks_pass_through() {
        let (empty, stats) = reduce(Vec::new(), 1.0);
        assert!(empty.is_empty());
        assert_eq!(stats.removal_percentage(), 0.0);

        let single = equator_track(&[]);
        assert_eq!(reduce(single.clone(), 1.0).0, single);
    }
}
