use indicatif::ParallelProgressIterator;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::accumulate::accumulate;
use crate::dataset::{CombinedRouteDataset, ElevationDataset, RouteDataset};
use crate::error::Result;
use crate::geo_point::GeoPoint;
use crate::io::{find_track_files, read_route_dataset, to_json, write_all_atomic, write_json};
use crate::parsers::parse_track;
use crate::reduce::{ReduceStats, reduce};
use crate::stitch::stitch;

/// Output of reducing and accumulating one track.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub route: RouteDataset,
    pub elevation: ElevationDataset,
    pub stats: ReduceStats,
}

pub fn convert_points(points: Vec<GeoPoint>, min_distance_m: f64) -> Conversion {
    let (reduced, stats) = reduce(points, min_distance_m);
    let (route, elevation) = accumulate(reduced);
    Conversion {
        route,
        elevation,
        stats,
    }
}

pub fn route_path(output_dir: &Path, label: &str) -> PathBuf {
    output_dir.join(format!("route-{}.json", label))
}

pub fn elevation_path(output_dir: &Path, label: &str) -> PathBuf {
    output_dir.join(format!("elevation-{}.json", label))
}

/// Convert one track file into `route-<label>.json` and
/// `elevation-<label>.json` inside `output_dir`.
///
/// Both documents are serialized before anything touches the disk, and either
/// both files are written or neither is.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    label: &str,
    min_distance_m: f64,
) -> Result<Conversion> {
    let points = parse_track(input)?;
    let conversion = convert_points(points, min_distance_m);

    let route_json = to_json(&conversion.route)?;
    let elevation_json = to_json(&conversion.elevation)?;

    let route_file = route_path(output_dir, label);
    let elevation_file = elevation_path(output_dir, label);
    write_all_atomic(&[
        (route_json.as_str(), route_file.as_path()),
        (elevation_json.as_str(), elevation_file.as_path()),
    ])?;

    info!(
        "Reduced points from {} to {} ({:.2}% removed, min_distance={}m)",
        conversion.stats.original_count,
        conversion.stats.reduced_count,
        conversion.stats.removal_percentage(),
        min_distance_m
    );
    info!("Route data saved to {}", route_file.display());
    info!("Elevation data saved to {}", elevation_file.display());
    info!("Total distance: {:.2} km", conversion.route.total_distance);
    info!("Route points: {}", conversion.route.points.len());
    info!("Elevation points: {}", conversion.elevation.points.len());

    Ok(conversion)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Convert every track file below `input_dir` in parallel. Outputs are
/// labelled by [`batch_label`]; a failing file is logged and skipped.
///
/// Files whose labels collide would overwrite each other's outputs, so all of
/// them are reported as failed and none is converted.
pub fn convert_dir(input_dir: &Path, output_dir: &Path, min_distance_m: f64) -> Result<BatchSummary> {
    let files = find_track_files(input_dir)?;
    info!("Found {} track files in {}", files.len(), input_dir.display());

    let labelled: Vec<(PathBuf, String)> = files
        .into_iter()
        .map(|file| {
            let label = batch_label(input_dir, &file);
            (file, label)
        })
        .collect();

    let mut label_counts: HashMap<String, usize> = HashMap::new();
    for (_, label) in &labelled {
        *label_counts.entry(label.clone()).or_default() += 1;
    }

    let (jobs, collisions): (Vec<_>, Vec<_>) = labelled
        .into_iter()
        .partition(|(_, label)| label_counts[label] == 1);

    let mut summary = BatchSummary::default();
    for (file, label) in collisions {
        warn!(
            "✗ Skipping {}: output label \"{}\" is shared with another file",
            file.display(),
            label
        );
        summary.failed.push(file);
    }

    let results: Vec<(PathBuf, bool)> = jobs
        .into_par_iter()
        .progress()
        .map(|(file, label)| {
            match convert_file(&file, output_dir, &label, min_distance_m) {
                Ok(_) => (file, true),
                Err(e) => {
                    warn!("✗ Error processing {}: {}", file.display(), e);
                    (file, false)
                }
            }
        })
        .collect();

    for (file, ok) in results {
        if ok {
            summary.converted.push(file);
        } else {
            summary.failed.push(file);
        }
    }
    summary.failed.sort();

    info!(
        "✓ Converted {} files, {} failed",
        summary.converted.len(),
        summary.failed.len()
    );
    Ok(summary)
}

/// Output label for `file` found below `input_dir`: the relative directories
/// and the bare file name joined with `-` (`2024/alps/hike.gpx` ->
/// `2024-alps-hike`).
pub fn batch_label(input_dir: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(input_dir).unwrap_or(file);
    let mut parts: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    parts.push(track_label(file));
    parts.join("-")
}

/// File name without any track extension (`ride.fit.gz` -> `ride`).
pub fn track_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = name.to_ascii_lowercase();
    for ext in [".fit.gz", ".fit", ".gpx"] {
        if lower.ends_with(ext) {
            return name[..name.len() - ext.len()].to_string();
        }
    }
    name
}

/// Stitch two day route files into one combined route file.
pub fn combine_files(
    day1_path: &Path,
    day2_path: &Path,
    output_path: &Path,
) -> Result<CombinedRouteDataset> {
    let day1 = read_route_dataset(day1_path)?;
    let day2 = read_route_dataset(day2_path)?;
    let combined = stitch(&day1, &day2)?;

    write_json(&combined, output_path)?;

    info!("Combined route saved to {}", output_path.display());
    info!("Total distance: {:.2} km", combined.total_distance);
    info!(
        "Day 1: {:.2} km ({} points)",
        combined.day1_distance,
        day1.points.len()
    );
    info!(
        "Day 2: {:.2} km ({} points)",
        combined.day2_distance,
        day2.points.len()
    );
    info!("Combined: {} points", combined.points.len());
    info!(
        "Day 1 points: {} to {}",
        combined.day1_start_index, combined.day1_end_index
    );
    info!(
        "Day 2 points: {} to {}",
        combined.day2_start_index, combined.day2_end_index
    );

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::tests::equator_track;

    #[test]
    fn convert_points_reduces_before_accumulating() {
        let conversion = convert_points(equator_track(&[0.5, 2.0, 0.3, 4.0]), 1.0);

        assert_eq!(conversion.stats.original_count, 5);
        assert_eq!(conversion.route.points.len(), 3);
        assert_eq!(conversion.route.points[0].distance, 0.0);
        assert!((conversion.route.total_distance - 0.0068).abs() < 1e-9);
    }

    #[test]
    fn output_file_names() {
        let dir = Path::new("data");
        assert_eq!(route_path(dir, "day1"), Path::new("data/route-day1.json"));
        assert_eq!(elevation_path(dir, "day2"), Path::new("data/elevation-day2.json"));
    }

    #[test]
    fn labels_strip_track_extensions() {
        assert_eq!(track_label(Path::new("a/Morning_Hike.gpx")), "Morning_Hike");
        assert_eq!(track_label(Path::new("1234.FIT.gz")), "1234");
        assert_eq!(track_label(Path::new("ride.fit")), "ride");
    }

    #[test]
    fn batch_labels_include_relative_directories() {
        let root = Path::new("/tracks");
        assert_eq!(batch_label(root, Path::new("/tracks/hike.gpx")), "hike");
        assert_eq!(batch_label(root, Path::new("/tracks/d07/hike.gpx")), "d07-hike");
        assert_eq!(
            batch_label(root, Path::new("/tracks/2024/alps/ride.fit.gz")),
            "2024-alps-ride"
        );
    }
}
