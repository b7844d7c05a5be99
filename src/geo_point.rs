use geo::Point;

/// One recorded sample of a track.
///
/// `elevation` and `time` are genuinely optional: a missing elevation is not
/// the same as an elevation of 0 m, and the elevation profile relies on that.
/// `distance` is the cumulative distance from the start of the track in km and
/// is only assigned by [`crate::accumulate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    pub time: Option<String>,
    pub distance: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint {
            lat,
            lon,
            elevation: None,
            time: None,
            distance: 0.0,
        }
    }

    pub fn with_elevation(mut self, elevation: Option<f64>) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn with_time(mut self, time: Option<String>) -> Self {
        self.time = time;
        self
    }

    /// Usable positive elevation, if any.
    pub fn profile_elevation(&self) -> Option<f64> {
        self.elevation.filter(|e| *e > 0.0)
    }
}

impl From<&GeoPoint> for Point {
    fn from(p: &GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

/// Clock-time granularity used in the output datasets.
pub fn format_clock(hour: u8, minute: u8) -> String {
    format!("{:02}:{:02}", hour, minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_zero_elevation_are_not_profiled() {
        assert_eq!(GeoPoint::new(0.0, 0.0).profile_elevation(), None);
        assert_eq!(
            GeoPoint::new(0.0, 0.0)
                .with_elevation(Some(0.0))
                .profile_elevation(),
            None
        );
        assert_eq!(
            GeoPoint::new(0.0, 0.0)
                .with_elevation(Some(412.5))
                .profile_elevation(),
            Some(412.5)
        );
    }

    #[test]
    fn point_uses_lon_as_x() {
        let p: Point = Point::from(&GeoPoint::new(51.5, -0.12));
        assert_eq!(p.x(), -0.12);
        assert_eq!(p.y(), 51.5);
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(7, 5), "07:05");
        assert_eq!(format_clock(23, 59), "23:59");
    }
}
