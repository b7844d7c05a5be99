use super::Parser;
use crate::error::{Result, TrackError};
use crate::geo_point::{GeoPoint, format_clock};
use ::gpx::{Gpx, Time, Waypoint};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use time::OffsetDateTime;

/**
 * Parse .gpx exports (Strava, Garmin). Only the first segment of the first
 * track is used.
 */
pub struct GpxParser;

impl Parser for GpxParser {
    fn parse(&self, path: &Path) -> Result<Vec<GeoPoint>> {
        let file = File::open(path)?;
        extract_points_from_gpx(BufReader::new(file), path)
    }

    fn handles(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
    }

    fn name(&self) -> &'static str {
        "GPX Parser"
    }
}

/// `source` only labels errors.
pub fn extract_points_from_gpx<R: Read>(reader: R, source: &Path) -> Result<Vec<GeoPoint>> {
    let gpx: Gpx =
        ::gpx::read(reader).map_err(|e| TrackError::malformed(source, e.to_string()))?;

    let track = gpx
        .tracks
        .first()
        .ok_or_else(|| TrackError::malformed(source, "no tracks found"))?;
    let segment = track
        .segments
        .first()
        .ok_or_else(|| TrackError::malformed(source, "no segments found in track"))?;

    Ok(segment.points.iter().map(geo_point_from_waypoint).collect())
}

fn geo_point_from_waypoint(waypoint: &Waypoint) -> GeoPoint {
    let point = waypoint.point();
    GeoPoint::new(point.y(), point.x())
        .with_elevation(waypoint.elevation)
        .with_time(waypoint.time.clone().map(clock_time))
}

// HH:MM in the offset the time was recorded with
fn clock_time(time: Time) -> String {
    let datetime = OffsetDateTime::from(time);
    format_clock(datetime.hour(), datetime.minute())
}
