use crate::dataset::{CombinedPoint, CombinedRouteDataset, RouteDataset};
use crate::error::{Result, TrackError};

/// Concatenate two day routes into one route with continuous distance.
///
/// Day-1 points are stamped with the original distance of the point before
/// them (the first with 0), so the last day-1 point carries its predecessor's
/// distance. Existing route files depend on this stamping; keep it.
/// Day-2 points are offset by day 1's total distance.
pub fn stitch(day1: &RouteDataset, day2: &RouteDataset) -> Result<CombinedRouteDataset> {
    if day1.points.is_empty() {
        return Err(TrackError::EmptyDataset { day: 1 });
    }
    if day2.points.is_empty() {
        return Err(TrackError::EmptyDataset { day: 2 });
    }

    let mut points = Vec::with_capacity(day1.points.len() + day2.points.len());

    let mut offset = 0.0;
    for point in &day1.points {
        let mut stitched = point.clone();
        stitched.distance = offset;
        offset = point.distance;
        points.push(CombinedPoint {
            point: stitched,
            day: 1,
            original_distance: point.distance,
        });
    }

    for point in &day2.points {
        let mut stitched = point.clone();
        stitched.distance = day1.total_distance + point.distance;
        points.push(CombinedPoint {
            point: stitched,
            day: 2,
            original_distance: point.distance,
        });
    }

    Ok(CombinedRouteDataset {
        total_distance: day1.total_distance + day2.total_distance,
        day1_distance: day1.total_distance,
        day2_distance: day2.total_distance,
        start_time: day1.start_time.clone(),
        end_time: day2.end_time.clone(),
        day1_start_index: 0,
        day1_end_index: day1.points.len() - 1,
        day2_start_index: day1.points.len(),
        day2_end_index: points.len() - 1,
        points,
    })
}
