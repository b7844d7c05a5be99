pub mod fit;
pub mod gpx;

use log::info;
use std::path::Path;

use crate::error::{Result, TrackError};
use crate::geo_point::GeoPoint;
use self::fit::FitParser;
use self::gpx::GpxParser;

// extract one track's points from a single file
pub trait Parser: Sync {
    fn parse(&self, path: &Path) -> Result<Vec<GeoPoint>>;

    fn handles(&self, path: &Path) -> bool;

    fn name(&self) -> &'static str;
}

pub static PARSERS: [&dyn Parser; 2] = [&GpxParser, &FitParser];

pub fn parser_for(path: &Path) -> Result<&'static dyn Parser> {
    PARSERS
        .iter()
        .copied()
        .find(|parser| parser.handles(path))
        .ok_or_else(|| TrackError::malformed(path, "unsupported track format"))
}

/// Parse a track file with whichever parser handles its extension.
pub fn parse_track(path: &Path) -> Result<Vec<GeoPoint>> {
    if !path.is_file() {
        return Err(TrackError::MissingInput(path.to_path_buf()));
    }
    let parser = parser_for(path)?;
    info!("Parsing {} with {}", path.display(), parser.name());
    let points = parser.parse(path)?;
    if points.is_empty() {
        return Err(TrackError::malformed(path, "track has no points"));
    }
    Ok(points)
}

pub(crate) fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_parser_by_extension() {
        assert_eq!(parser_for(Path::new("a/day1.gpx")).unwrap().name(), "GPX Parser");
        assert_eq!(parser_for(Path::new("ride.fit")).unwrap().name(), "FIT Parser");
        assert_eq!(parser_for(Path::new("ride.fit.gz")).unwrap().name(), "FIT Parser");
    }

    #[test]
    fn unknown_extension_is_malformed() {
        assert!(matches!(
            parser_for(Path::new("notes.txt")),
            Err(TrackError::MalformedInput { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            parse_track(Path::new("/definitely/not/here.gpx")),
            Err(TrackError::MissingInput(_))
        ));
    }
}
