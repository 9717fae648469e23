//! Geographic points and boundary vertices
//!
//! Points are stored in degrees. All trigonometry converts to radians at the
//! point of use.

use crate::error::BoundaryError;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point without range checks
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that both coordinates are finite and within range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Return the point if it is valid, otherwise `InvalidCoordinate`
    pub fn validated(self) -> Result<Self, BoundaryError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(BoundaryError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// (latitude, longitude) in radians
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }

    /// Coordinate equality within `epsilon` degrees
    pub fn approx_eq(&self, other: &GeoPoint, epsilon: f64) -> bool {
        (self.latitude - other.latitude).abs() <= epsilon
            && (self.longitude - other.longitude).abs() <= epsilon
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A boundary point together with its position in the ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    pub index: usize,
    pub point: GeoPoint,
}
