use serde::{Deserialize, Serialize};

/// A WGS84 position in `[longitude, latitude]` order, the order the renderer
/// and the geocoding service both use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Build a coordinate only when both values are finite and within the
    /// valid geographic range.
    pub fn checked(longitude: f64, latitude: f64) -> Option<Self> {
        let valid = longitude.is_finite()
            && latitude.is_finite()
            && (-180.0..=180.0).contains(&longitude)
            && (-90.0..=90.0).contains(&latitude);
        valid.then(|| Self::new(longitude, latitude))
    }

    /// `[lng, lat]` pair as expected by the renderer.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}
