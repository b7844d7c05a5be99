use super::{Parser, file_name};
use crate::error::{Result, TrackError};
use crate::geo_point::GeoPoint;
use fitparser::Value;
use fitparser::profile::MesgNum;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/**
 * Parse .fit and .fit.gz activity files, which Strava hands out for newer
 * activities. Every positioned `record` message becomes one point.
 */
pub struct FitParser;

impl Parser for FitParser {
    fn parse(&self, path: &Path) -> Result<Vec<GeoPoint>> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        if file_name(path).to_ascii_lowercase().ends_with(".gz") {
            GzDecoder::new(file).read_to_end(&mut data)?;
        } else {
            file.read_to_end(&mut data)?;
        }

        let records =
            fitparser::from_bytes(&data).map_err(|e| TrackError::malformed(path, e.to_string()))?;

        let points: Vec<GeoPoint> = records
            .iter()
            .filter(|record| record.kind() == MesgNum::Record)
            .filter_map(|record| {
                point_from_fields(
                    record
                        .fields()
                        .iter()
                        .map(|field| (field.name(), field.value())),
                )
            })
            .collect();

        if points.is_empty() {
            return Err(TrackError::malformed(path, "no positioned records found"));
        }
        Ok(points)
    }

    fn handles(&self, path: &Path) -> bool {
        let name = file_name(path).to_ascii_lowercase();
        name.ends_with(".fit") || name.ends_with(".fit.gz")
    }

    fn name(&self) -> &'static str {
        "FIT Parser"
    }
}

fn point_from_fields<'a>(fields: impl Iterator<Item = (&'a str, &'a Value)>) -> Option<GeoPoint> {
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut altitude: Option<f64> = None;
    let mut enhanced_altitude: Option<f64> = None;
    let mut time: Option<String> = None;

    for (name, value) in fields {
        match name {
            "position_lat" => latitude = numeric_value(value).map(semicircles_to_degrees),
            "position_long" => longitude = numeric_value(value).map(semicircles_to_degrees),
            "altitude" => altitude = numeric_value(value),
            "enhanced_altitude" => enhanced_altitude = numeric_value(value),
            "timestamp" => {
                if let Value::Timestamp(t) = value {
                    time = Some(t.naive_utc().format("%H:%M").to_string());
                }
            }
            _ => {} // ignore other fields
        }
    }

    let (lat, lon) = (latitude?, longitude?);
    Some(
        GeoPoint::new(lat, lon)
            .with_elevation(enhanced_altitude.or(altitude))
            .with_time(time),
    )
}

fn semicircles_to_degrees(value: f64) -> f64 {
    value * (180.0 / 2_147_483_648.0)
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::SInt32(v) => Some(*v as f64),
        Value::UInt32(v) => Some(*v as f64),
        Value::SInt16(v) => Some(*v as f64),
        Value::UInt16(v) => Some(*v as f64),
        Value::SInt8(v) => Some(*v as f64),
        Value::UInt8(v) => Some(*v as f64),
        Value::Float32(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        _ => None,
    }
}
