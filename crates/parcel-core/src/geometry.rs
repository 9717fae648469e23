//! Spherical geometry over rings of geographic points
//!
//! Area uses the spherical-excess method: every edge forms a triangle with the
//! north pole and the signed triangle areas are summed. Distances use the
//! haversine formula. Both use the same mean Earth radius.
//!
//! The centroid is a plain average of latitudes and longitudes. It is not a
//! geodesic centroid and drifts for large or skewed polygons; consumers of the
//! farm record depend on the averaged value as-is.

use crate::error::BoundaryError;
use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Minimum number of points that enclose an area
pub const MIN_RING_POINTS: usize = 3;

/// Orientation of a ring as seen from above with north up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Great-circle distance between two points in meters (haversine)
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lng1) = a.to_radians();
    let (lat2, lng2) = b.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = lng2 - lng1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Signed area of the ring in square meters
///
/// Counter-clockwise rings are positive, clockwise rings negative. The ring
/// is closed implicitly from the last point back to the first.
pub fn signed_area(points: &[GeoPoint]) -> Result<f64, BoundaryError> {
    if points.len() < MIN_RING_POINTS {
        return Err(BoundaryError::DegeneratePolygon {
            required: MIN_RING_POINTS,
            actual: points.len(),
        });
    }

    let (mut prev_tan, mut prev_lng) = polar_coordinates(&points[points.len() - 1]);
    let mut total = 0.0;

    for point in points {
        let (tan, lng) = polar_coordinates(point);
        total += polar_triangle_area(tan, lng, prev_tan, prev_lng);
        prev_tan = tan;
        prev_lng = lng;
    }

    Ok(total * EARTH_RADIUS_M * EARTH_RADIUS_M)
}

/// Area enclosed by the ring in square meters, independent of winding
///
/// Fewer than three points yield `DegeneratePolygon`; callers that want the
/// zero fallback use `unwrap_or(0.0)`.
pub fn area(points: &[GeoPoint]) -> Result<f64, BoundaryError> {
    signed_area(points).map(f64::abs)
}

/// Orientation of the ring
pub fn winding(points: &[GeoPoint]) -> Result<Winding, BoundaryError> {
    let signed = signed_area(points)?;
    Ok(if signed < 0.0 { Winding::Clockwise } else { Winding::CounterClockwise })
}

/// Perimeter of the closed ring in meters, including the closing edge
pub fn perimeter(points: &[GeoPoint]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    (0..n).map(|i| distance(&points[i], &points[(i + 1) % n])).sum()
}

/// Length of the open path in meters (no closing edge)
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Arithmetic mean of latitudes and longitudes
pub fn centroid(points: &[GeoPoint]) -> Result<GeoPoint, BoundaryError> {
    if points.is_empty() {
        return Err(BoundaryError::EmptyInput);
    }

    let n = points.len() as f64;
    let sum_lat: f64 = points.iter().map(|p| p.latitude).sum();
    let sum_lng: f64 = points.iter().map(|p| p.longitude).sum();

    Ok(GeoPoint::new(sum_lat / n, sum_lng / n))
}

/// tan of half the colatitude, and longitude in radians
fn polar_coordinates(point: &GeoPoint) -> (f64, f64) {
    let (lat, lng) = point.to_radians();
    (((FRAC_PI_2 - lat) / 2.0).tan(), lng)
}

/// Signed area of the triangle (north pole, p1, p2) on the unit sphere
fn polar_triangle_area(tan1: f64, lng1: f64, tan2: f64, lng2: f64) -> f64 {
    let delta_lng = lng1 - lng2;
    let t = tan1 * tan2;
    2.0 * (t * delta_lng.sin()).atan2(1.0 + t * delta_lng.cos())
}
