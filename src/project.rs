use geo::{BoundingRect, MultiPoint, Point};
use std::path::Path;

use crate::dataset::RouteDataset;
use crate::error::{Result, TrackError};

/// Default SVG viewport.
pub const SVG_WIDTH: f64 = 1000.0;
pub const SVG_HEIGHT: f64 = 500.0;

/// True when the points span a non-zero extent in both latitude and longitude,
/// which [`project`] requires.
pub fn has_extent(points: &[Point]) -> bool {
    match MultiPoint::new(points.to_vec()).bounding_rect() {
        Some(rect) => rect.width() > 0.0 && rect.height() > 0.0,
        None => false,
    }
}

/// Scale the points linearly into a `width` x `height` SVG path, longitude on
/// x and latitude on y with north at the top.
///
/// Callers must check [`has_extent`] first: a zero span divides by zero.
pub fn project(points: &[Point], width: f64, height: f64) -> String {
    let Some(rect) = MultiPoint::new(points.to_vec()).bounding_rect() else {
        return String::new();
    };
    let (min, max) = (rect.min(), rect.max());

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = (p.x() - min.x) / (max.x - min.x) * width;
            let y = (max.y - p.y()) / (max.y - min.y) * height;
            let command = if i == 0 { "M" } else { "L" };
            format!("{} {:.2} {:.2}", command, x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// SVG path of a route dataset. Routes with fewer than two points or without
/// extent in both directions are rejected; `source` only labels the error.
pub fn route_svg_path(route: &RouteDataset, source: &Path, width: f64, height: f64) -> Result<String> {
    let points: Vec<Point> = route.points.iter().map(Point::from).collect();
    if points.len() < 2 || !has_extent(&points) {
        return Err(TrackError::malformed(
            source,
            "route needs at least two points spanning both latitude and longitude",
        ));
    }
    Ok(project(&points, width, height))
}
