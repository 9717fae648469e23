//! Vertex capture state machine
//!
//! Tracks a boundary from the first tap to a completed ring:
//!
//! ```text
//! Idle --start--> Drawing --tap near first vertex / finish--> Completed
//!   ^               |  ^                                         |
//!   +----cancel-----+  +-- tap (append)                          |
//!   +------------------------------reset-------------------------+
//! ```
//!
//! Completed rings are edited through [`EditablePolygon`] without leaving the
//! `Completed` state.

use crate::edit::EditablePolygon;
use crate::error::BoundaryError;
use crate::point::GeoPoint;
use crate::polygon::Polygon;
use crate::snap::{can_finish, SnapDetector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally visible session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Drawing,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Drawing => "drawing",
            SessionState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// What a tap did to the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap was appended as the vertex at `index`
    Appended { index: usize },
    /// The tap was near the first vertex and closed the ring
    Closed,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Drawing(Vec<GeoPoint>),
    Completed(EditablePolygon),
}

/// Owns the in-progress vertex list and the completed ring
#[derive(Debug, Clone)]
pub struct VertexCapture {
    phase: Phase,
    snap: SnapDetector,
}

impl Default for VertexCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexCapture {
    pub fn new() -> Self {
        Self::with_snap(SnapDetector::new())
    }

    pub fn with_snap(snap: SnapDetector) -> Self {
        Self { phase: Phase::Idle, snap }
    }

    pub fn snap(&self) -> &SnapDetector {
        &self.snap
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Drawing(_) => SessionState::Drawing,
            Phase::Completed(_) => SessionState::Completed,
        }
    }

    /// Current vertices, in progress or completed
    pub fn vertices(&self) -> &[GeoPoint] {
        match &self.phase {
            Phase::Idle => &[],
            Phase::Drawing(points) => points,
            Phase::Completed(editable) => editable.polygon().points(),
        }
    }

    /// The completed ring, if any
    pub fn polygon(&self) -> Option<&EditablePolygon> {
        match &self.phase {
            Phase::Completed(editable) => Some(editable),
            _ => None,
        }
    }

    pub fn polygon_mut(&mut self) -> Option<&mut EditablePolygon> {
        match &mut self.phase {
            Phase::Completed(editable) => Some(editable),
            _ => None,
        }
    }

    /// Begin a new boundary, discarding any in-progress vertices
    pub fn start(&mut self) -> Result<(), BoundaryError> {
        if let Phase::Completed(_) = self.phase {
            return Err(self.invalid("start"));
        }

        self.phase = Phase::Drawing(Vec::new());
        Ok(())
    }

    /// Feed one tap into the boundary
    pub fn tap(&mut self, point: GeoPoint) -> Result<TapOutcome, BoundaryError> {
        let Phase::Drawing(points) = &mut self.phase else {
            return Err(self.invalid("tap"));
        };
        let point = point.validated()?;

        if let Some(first) = points.first() {
            if self.snap.should_close(&point, first, points.len()) {
                self.complete()?;
                return Ok(TapOutcome::Closed);
            }
        }

        points.push(point);
        Ok(TapOutcome::Appended { index: points.len() - 1 })
    }

    /// Close the ring explicitly, bypassing the snap distance
    pub fn finish(&mut self) -> Result<(), BoundaryError> {
        self.complete()
    }

    /// Abandon the in-progress boundary
    pub fn cancel(&mut self) -> Result<(), BoundaryError> {
        if !matches!(self.phase, Phase::Drawing(_)) {
            return Err(self.invalid("cancel"));
        }

        self.phase = Phase::Idle;
        Ok(())
    }

    /// Discard everything and return to `Idle`
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    fn complete(&mut self) -> Result<(), BoundaryError> {
        let Phase::Drawing(points) = &mut self.phase else {
            return Err(self.invalid("finish"));
        };

        if !can_finish(points.len()) {
            return Err(BoundaryError::InsufficientVertices { count: points.len() });
        }

        let ring = Polygon::from_ring(std::mem::take(points));
        self.phase = Phase::Completed(EditablePolygon::new(ring));
        Ok(())
    }

    fn invalid(&self, operation: &'static str) -> BoundaryError {
        BoundaryError::InvalidState { operation, state: self.state() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::{offset, ORIGIN};
    use crate::snap::SnapConfig;

    fn drawing_with(points: &[GeoPoint]) -> VertexCapture {
        let mut capture = VertexCapture::new();
        capture.start().unwrap();
        for point in points {
            capture.tap(*point).unwrap();
        }
        capture
    }

    fn triangle() -> [GeoPoint; 3] {
        [ORIGIN, offset(ORIGIN, 200.0, 0.0), offset(ORIGIN, 200.0, 200.0)]
    }

    #[test]
    fn test_starts_idle() {
        let capture = VertexCapture::new();
        assert_eq!(capture.state(), SessionState::Idle);
        assert!(capture.vertices().is_empty());
    }

    #[test]
    fn test_taps_append_in_order() {
        let mut capture = VertexCapture::new();
        capture.start().unwrap();

        assert_eq!(capture.tap(ORIGIN).unwrap(), TapOutcome::Appended { index: 0 });
        assert_eq!(
            capture.tap(offset(ORIGIN, 100.0, 0.0)).unwrap(),
            TapOutcome::Appended { index: 1 }
        );
        assert_eq!(capture.state(), SessionState::Drawing);
        assert_eq!(capture.vertices().len(), 2);
    }

    #[test]
    fn test_tap_near_first_vertex_closes_ring() {
        let mut capture = drawing_with(&triangle());

        let outcome = capture.tap(offset(ORIGIN, 10.0, 10.0)).unwrap();

        assert_eq!(outcome, TapOutcome::Closed);
        assert_eq!(capture.state(), SessionState::Completed);
        assert_eq!(capture.vertices(), &triangle());
    }

    #[test]
    fn test_tap_near_first_vertex_with_two_vertices_appends() {
        let mut capture = drawing_with(&triangle()[..2]);

        let outcome = capture.tap(offset(ORIGIN, 10.0, 10.0)).unwrap();

        assert_eq!(outcome, TapOutcome::Appended { index: 2 });
        assert_eq!(capture.state(), SessionState::Drawing);
    }

    #[test]
    fn test_snap_disabled_appends_near_first_vertex() {
        let detector =
            SnapDetector::with_config(SnapConfig { enabled: false, ..Default::default() });
        let mut capture = VertexCapture::with_snap(detector);
        capture.start().unwrap();
        for point in triangle() {
            capture.tap(point).unwrap();
        }

        assert_eq!(
            capture.tap(offset(ORIGIN, 10.0, 10.0)).unwrap(),
            TapOutcome::Appended { index: 3 }
        );
    }

    #[test]
    fn test_finish_requires_three_vertices() {
        for count in 0..3 {
            let mut capture = drawing_with(&triangle()[..count]);
            assert_eq!(capture.finish(), Err(BoundaryError::InsufficientVertices { count }));
            assert_eq!(capture.state(), SessionState::Drawing);
            assert_eq!(capture.vertices().len(), count);
        }
    }

    #[test]
    fn test_finish_completes_far_from_first_vertex() {
        let mut capture = drawing_with(&triangle());
        capture.finish().unwrap();

        assert_eq!(capture.state(), SessionState::Completed);
        assert_eq!(capture.polygon().unwrap().polygon().vertex_count(), 3);
    }

    #[test]
    fn test_cancel_only_while_drawing() {
        let mut capture = VertexCapture::new();
        assert!(matches!(capture.cancel(), Err(BoundaryError::InvalidState { .. })));

        capture.start().unwrap();
        capture.tap(ORIGIN).unwrap();
        capture.cancel().unwrap();
        assert_eq!(capture.state(), SessionState::Idle);
        assert!(capture.vertices().is_empty());

        let mut completed = drawing_with(&triangle());
        completed.finish().unwrap();
        assert_eq!(
            completed.cancel(),
            Err(BoundaryError::InvalidState { operation: "cancel", state: SessionState::Completed })
        );
    }

    #[test]
    fn test_start_clears_in_progress_vertices() {
        let mut capture = drawing_with(&triangle()[..2]);
        capture.start().unwrap();
        assert!(capture.vertices().is_empty());
        assert_eq!(capture.state(), SessionState::Drawing);
    }

    #[test]
    fn test_start_refused_when_completed() {
        let mut capture = drawing_with(&triangle());
        capture.finish().unwrap();

        assert!(matches!(capture.start(), Err(BoundaryError::InvalidState { .. })));
        assert_eq!(capture.state(), SessionState::Completed);
    }

    #[test]
    fn test_tap_requires_drawing() {
        let mut capture = VertexCapture::new();
        assert_eq!(
            capture.tap(ORIGIN),
            Err(BoundaryError::InvalidState { operation: "tap", state: SessionState::Idle })
        );
    }

    #[test]
    fn test_invalid_tap_leaves_vertices_untouched() {
        let mut capture = drawing_with(&triangle()[..2]);

        let err = capture.tap(GeoPoint::new(-91.0, 0.0)).unwrap_err();

        assert!(matches!(err, BoundaryError::InvalidCoordinate { .. }));
        assert_eq!(capture.vertices().len(), 2);
    }

    #[test]
    fn test_reset_from_completed() {
        let mut capture = drawing_with(&triangle());
        capture.finish().unwrap();
        capture.reset();

        assert_eq!(capture.state(), SessionState::Idle);
        assert!(capture.polygon().is_none());
    }
}
