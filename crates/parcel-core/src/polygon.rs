//! Closed boundary rings

use crate::error::BoundaryError;
use crate::geometry::MIN_RING_POINTS;
use crate::measure::BoundaryResult;
use crate::point::{GeoPoint, Vertex};

/// An ordered ring of at least three vertices
///
/// Edges run between consecutive vertices plus an implicit closing edge from
/// the last vertex back to the first. Self-intersection is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) points: Vec<GeoPoint>,
}

impl Polygon {
    /// Build a polygon, checking vertex count and coordinates
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, BoundaryError> {
        if points.len() < MIN_RING_POINTS {
            return Err(BoundaryError::InsufficientVertices { count: points.len() });
        }

        for point in &points {
            point.validated()?;
        }

        Ok(Self { points })
    }

    /// Build from points that were validated on entry
    pub(crate) fn from_ring(points: Vec<GeoPoint>) -> Self {
        debug_assert!(points.len() >= MIN_RING_POINTS);
        Self { points }
    }

    /// Vertex coordinates in ring order
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Vertices with their ring positions
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.points.iter().enumerate().map(|(index, point)| Vertex { index, point: *point })
    }

    /// Number of vertices (always >= 3)
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// The vertex the ring closes back to
    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    /// Area, perimeter and centroid of the ring
    pub fn measure(&self) -> BoundaryResult {
        BoundaryResult::for_polygon(self)
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }
}
