//! Vertex editing for completed boundaries
//!
//! Map toolkits report edits on an editable overlay as insert/move/remove
//! events on its path. Each event is applied to the ring and the metrics are
//! recomputed before the next one is accepted.

use crate::error::BoundaryError;
use crate::geometry::MIN_RING_POINTS;
use crate::measure::BoundaryResult;
use crate::point::GeoPoint;
use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};

/// A single mutation of a completed ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum VertexEdit {
    /// Insert a new vertex before `index` (`index == len` appends)
    InsertAt { index: usize, point: GeoPoint },
    /// Move the vertex at `index`
    MoveAt { index: usize, point: GeoPoint },
    /// Remove the vertex at `index`
    RemoveAt { index: usize },
}

/// A completed polygon kept in sync with its derived metrics
#[derive(Debug, Clone, PartialEq)]
pub struct EditablePolygon {
    polygon: Polygon,
    result: BoundaryResult,
}

impl EditablePolygon {
    pub fn new(polygon: Polygon) -> Self {
        let result = polygon.measure();
        Self { polygon, result }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Metrics for the current vertices
    pub fn result(&self) -> &BoundaryResult {
        &self.result
    }

    /// Apply one edit and recompute
    ///
    /// A refused edit leaves both the vertices and the result untouched.
    pub fn apply(&mut self, edit: VertexEdit) -> Result<&BoundaryResult, BoundaryError> {
        apply_vertex_edit(&mut self.polygon, edit)?;
        self.result = self.polygon.measure();
        log::trace!(
            "recomputed boundary after {:?}: {:.2} m², {} vertices",
            edit,
            self.result.area_square_meters,
            self.result.vertex_count()
        );
        Ok(&self.result)
    }

    pub fn into_polygon(self) -> Polygon {
        self.polygon
    }
}

/// Apply `edit` to the polygon's vertex list
pub fn apply_vertex_edit(polygon: &mut Polygon, edit: VertexEdit) -> Result<(), BoundaryError> {
    let len = polygon.points.len();

    match edit {
        VertexEdit::InsertAt { index, point } => {
            let point = point.validated()?;
            if index > len {
                return Err(BoundaryError::VertexIndexOutOfRange { index, len });
            }
            polygon.points.insert(index, point);
        }
        VertexEdit::MoveAt { index, point } => {
            let point = point.validated()?;
            let Some(slot) = polygon.points.get_mut(index) else {
                return Err(BoundaryError::VertexIndexOutOfRange { index, len });
            };
            *slot = point;
        }
        VertexEdit::RemoveAt { index } => {
            if index >= len {
                return Err(BoundaryError::VertexIndexOutOfRange { index, len });
            }
            if len <= MIN_RING_POINTS {
                return Err(BoundaryError::MinimumVertexViolation { remaining: len - 1 });
            }
            polygon.points.remove(index);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::{offset, square, ORIGIN};

    fn triangle() -> EditablePolygon {
        let points = vec![ORIGIN, offset(ORIGIN, 200.0, 0.0), offset(ORIGIN, 0.0, 200.0)];
        EditablePolygon::new(Polygon::new(points).unwrap())
    }

    #[test]
    fn test_insert_recomputes() {
        let mut editable = triangle();
        let before = editable.result().area_square_meters;

        let result = editable
            .apply(VertexEdit::InsertAt { index: 2, point: offset(ORIGIN, 200.0, 200.0) })
            .unwrap();

        assert_eq!(result.vertex_count(), 4);
        assert!(result.area_square_meters > before * 1.9);
        assert_eq!(editable.polygon().points()[2], offset(ORIGIN, 200.0, 200.0));
    }

    #[test]
    fn test_insert_at_end_appends() {
        let mut editable = triangle();
        let point = offset(ORIGIN, -50.0, 100.0);
        editable.apply(VertexEdit::InsertAt { index: 3, point }).unwrap();
        assert_eq!(editable.polygon().points()[3], point);
    }

    #[test]
    fn test_move_same_point_is_idempotent() {
        let mut editable = triangle();
        let before = editable.result().clone();
        let point = editable.polygon().points()[1];

        editable.apply(VertexEdit::MoveAt { index: 1, point }).unwrap();

        assert_eq!(editable.result(), &before);
    }

    #[test]
    fn test_move_changes_metrics() {
        let mut editable = triangle();
        let before = editable.result().clone();

        editable.apply(VertexEdit::MoveAt { index: 1, point: offset(ORIGIN, 400.0, 0.0) }).unwrap();

        assert!(editable.result().area_square_meters > before.area_square_meters);
        assert!(editable.result().perimeter_meters > before.perimeter_meters);
        assert_ne!(editable.result().centroid, before.centroid);
    }

    #[test]
    fn test_remove_refused_at_three_vertices() {
        let mut editable = triangle();
        let before = editable.clone();

        let err = editable.apply(VertexEdit::RemoveAt { index: 0 }).unwrap_err();

        assert_eq!(err, BoundaryError::MinimumVertexViolation { remaining: 2 });
        assert_eq!(editable, before);
    }

    #[test]
    fn test_remove_from_square() {
        let mut editable = EditablePolygon::new(Polygon::new(square(100.0)).unwrap());
        let result = editable.apply(VertexEdit::RemoveAt { index: 2 }).unwrap();

        assert_eq!(result.vertex_count(), 3);
        assert!((result.area_square_meters - 5_000.0).abs() < 50.0);
    }

    #[test]
    fn test_out_of_range_edits() {
        let mut editable = triangle();

        assert_eq!(
            editable.apply(VertexEdit::MoveAt { index: 3, point: ORIGIN }).unwrap_err(),
            BoundaryError::VertexIndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            editable.apply(VertexEdit::InsertAt { index: 4, point: ORIGIN }).unwrap_err(),
            BoundaryError::VertexIndexOutOfRange { index: 4, len: 3 }
        );
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let mut editable = triangle();
        let before = editable.clone();

        let err = editable
            .apply(VertexEdit::MoveAt { index: 0, point: GeoPoint::new(0.0, 200.0) })
            .unwrap_err();

        assert!(matches!(err, BoundaryError::InvalidCoordinate { .. }));
        assert_eq!(editable, before);
    }
}
