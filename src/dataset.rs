//! JSON datasets consumed by the web map and elevation chart.
//!
//! Field names are part of the output format and must not change.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::geo_point::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
    /// Missing elevation is stored as 0 in the route.
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub distance: f64,
}

impl From<&GeoPoint> for RoutePoint {
    fn from(p: &GeoPoint) -> Self {
        RoutePoint {
            lat: p.lat,
            lon: p.lon,
            elevation: p.elevation.unwrap_or(0.0),
            time: p.time.clone(),
            distance: p.distance,
        }
    }
}

impl From<&RoutePoint> for Point {
    fn from(p: &RoutePoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDataset {
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub points: Vec<RoutePoint>,
}

impl RouteDataset {
    /// Build a single-day dataset; totals and times come from the endpoints.
    pub fn from_points(points: Vec<RoutePoint>) -> Self {
        RouteDataset {
            total_distance: points.last().map_or(0.0, |p| p.distance),
            start_time: points.first().and_then(|p| p.time.clone()),
            end_time: points.last().and_then(|p| p.time.clone()),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationPoint {
    pub distance: f64,
    pub elevation: f64,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationDataset {
    pub total_distance: f64,
    pub points: Vec<ElevationPoint>,
}

/// A route point after stitching: `distance` is continuous across both days,
/// `original_distance` is the value it had in its own day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPoint {
    #[serde(flatten)]
    pub point: RoutePoint,
    pub day: u8,
    pub original_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRouteDataset {
    pub total_distance: f64,
    pub day1_distance: f64,
    pub day2_distance: f64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub day1_start_index: usize,
    pub day1_end_index: usize,
    pub day2_start_index: usize,
    pub day2_end_index: usize,
    pub points: Vec<CombinedPoint>,
}
