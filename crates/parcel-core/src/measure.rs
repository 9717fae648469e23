//! Derived boundary metrics
//!
//! A `BoundaryResult` is never edited in place. Every vertex change produces a
//! fresh one that replaces the previous result.

use crate::geometry;
use crate::point::GeoPoint;
use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};

/// Area, perimeter and centroid of a boundary, with the vertices they came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryResult {
    /// Enclosed area in square meters (0 below three vertices)
    pub area_square_meters: f64,
    /// Perimeter in meters
    pub perimeter_meters: f64,
    /// Coordinate mean of the vertices
    pub centroid: GeoPoint,
    /// Vertices in ring order
    pub vertices: Vec<GeoPoint>,
}

impl BoundaryResult {
    /// Metrics for a closed ring, including the closing edge
    ///
    /// Returns `None` when there are no points.
    pub fn closed(points: &[GeoPoint]) -> Option<Self> {
        Self::compute(points, geometry::perimeter(points))
    }

    /// Provisional metrics for a ring that is still being drawn
    ///
    /// The perimeter is the open path length; the closing edge is only counted
    /// once the ring is completed. Area treats the points as closed so a
    /// running estimate is available from the third vertex on.
    pub fn open(points: &[GeoPoint]) -> Option<Self> {
        Self::compute(points, geometry::path_length(points))
    }

    /// Metrics for a completed polygon
    pub fn for_polygon(polygon: &Polygon) -> Self {
        let points = polygon.points();
        Self {
            area_square_meters: geometry::area(points).unwrap_or(0.0),
            perimeter_meters: geometry::perimeter(points),
            centroid: geometry::centroid(points).unwrap_or_else(|_| polygon.first()),
            vertices: points.to_vec(),
        }
    }

    fn compute(points: &[GeoPoint], perimeter_meters: f64) -> Option<Self> {
        let centroid = geometry::centroid(points).ok()?;
        let area_square_meters = geometry::area(points).unwrap_or(0.0);

        Some(Self { area_square_meters, perimeter_meters, centroid, vertices: points.to_vec() })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
