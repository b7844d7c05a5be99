//! Turn a recorded GPS track into the route and elevation-profile JSON used by
//! the trip map, and stitch two days into one continuous route.

pub mod accumulate;
pub mod convert;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod geo_point;
pub mod io;
pub mod parsers;
pub mod project;
pub mod reduce;
pub mod stitch;

pub use accumulate::accumulate;
pub use convert::{Conversion, combine_files, convert_dir, convert_file, convert_points};
pub use dataset::{
    CombinedPoint, CombinedRouteDataset, ElevationDataset, ElevationPoint, RouteDataset,
    RoutePoint,
};
pub use distance::haversine_km;
pub use error::{Result, TrackError};
pub use geo_point::GeoPoint;
pub use project::project;
pub use reduce::{ReduceStats, reduce};
pub use stitch::stitch;

pub const DATA_DIR: &str = "data";
pub const COMBINED_PATH: &str = "data/route-combined.json";
pub const DEFAULT_MIN_DISTANCE_M: f64 = 1.0;
