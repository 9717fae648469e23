//! Boundary session controller
//!
//! The host UI drives a [`BoundarySession`] with discrete events and receives a
//! [`SessionUpdate`] after every successful state-changing call, both as the
//! return value and through any subscribed observers. Refused calls return the
//! error and notify nobody.
//!
//! All calls are synchronous and assume a single event loop.

use crate::capture::{SessionState, TapOutcome, VertexCapture};
use crate::config::BoundaryConfig;
use crate::edit::VertexEdit;
use crate::error::BoundaryError;
use crate::measure::BoundaryResult;
use crate::point::GeoPoint;
use crate::snap::SnapDetector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a drawing session, renewed on every reset
pub type SessionId = uuid::Uuid;

/// State and metrics emitted after each state-changing call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUpdate {
    pub session_id: SessionId,
    pub state: SessionState,
    /// `None` until the first vertex exists
    pub result: Option<BoundaryResult>,
}

/// Receives session updates
pub trait BoundaryObserver {
    fn on_update(&mut self, update: &SessionUpdate);
}

impl<F> BoundaryObserver for F
where
    F: FnMut(&SessionUpdate),
{
    fn on_update(&mut self, update: &SessionUpdate) {
        self(update)
    }
}

/// A discrete host event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BoundaryAction {
    Start,
    Tap { point: GeoPoint },
    Finish,
    Cancel,
    EditVertex { index: usize, point: GeoPoint },
    InsertVertex { index: usize, point: GeoPoint },
    RemoveVertex { index: usize },
    Reset,
}

/// Map viewport seeded from a device location fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

pub struct BoundarySession {
    id: SessionId,
    config: BoundaryConfig,
    capture: VertexCapture,
    result: Option<BoundaryResult>,
    observers: Vec<Box<dyn BoundaryObserver>>,
}

impl fmt::Debug for BoundarySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundarySession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("capture", &self.capture)
            .field("result", &self.result)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for BoundarySession {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundarySession {
    /// Create an idle session with the default configuration
    pub fn new() -> Self {
        Self::with_config(BoundaryConfig::default())
    }

    pub fn with_config(config: BoundaryConfig) -> Self {
        Self {
            id: SessionId::new_v4(),
            config,
            capture: VertexCapture::with_snap(SnapDetector::with_config(config.snap)),
            result: None,
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.capture.state()
    }

    /// Current vertices, in progress or completed
    pub fn vertices(&self) -> &[GeoPoint] {
        self.capture.vertices()
    }

    /// Last computed result, `None` while no vertices exist
    pub fn current_result(&self) -> Option<&BoundaryResult> {
        self.result.as_ref()
    }

    /// Register an observer for every future update
    pub fn subscribe(&mut self, observer: impl BoundaryObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Idle -> Drawing
    pub fn start(&mut self) -> Result<SessionUpdate, BoundaryError> {
        self.guard("start", |capture| capture.start())?;
        Ok(self.commit())
    }

    /// Feed one map tap into the boundary
    pub fn add_point(&mut self, point: GeoPoint) -> Result<SessionUpdate, BoundaryError> {
        let outcome = self.guard("add_point", |capture| capture.tap(point))?;
        if outcome == TapOutcome::Closed {
            log::debug!("session {}: tap near first vertex closed the boundary", self.id);
        }
        Ok(self.commit())
    }

    /// Complete the boundary explicitly
    pub fn finish(&mut self) -> Result<SessionUpdate, BoundaryError> {
        self.guard("finish", |capture| capture.finish())?;
        Ok(self.commit())
    }

    /// Drawing -> Idle, discarding in-progress vertices
    pub fn cancel(&mut self) -> Result<SessionUpdate, BoundaryError> {
        self.guard("cancel", |capture| capture.cancel())?;
        Ok(self.commit())
    }

    pub fn edit_vertex(
        &mut self,
        index: usize,
        point: GeoPoint,
    ) -> Result<SessionUpdate, BoundaryError> {
        self.apply_edit("edit_vertex", VertexEdit::MoveAt { index, point })
    }

    pub fn insert_vertex(
        &mut self,
        index: usize,
        point: GeoPoint,
    ) -> Result<SessionUpdate, BoundaryError> {
        self.apply_edit("insert_vertex", VertexEdit::InsertAt { index, point })
    }

    pub fn remove_vertex(&mut self, index: usize) -> Result<SessionUpdate, BoundaryError> {
        self.apply_edit("remove_vertex", VertexEdit::RemoveAt { index })
    }

    /// Discard everything and start over with a fresh session id
    pub fn reset(&mut self) -> SessionUpdate {
        let previous = self.id;
        self.capture.reset();
        self.id = SessionId::new_v4();
        log::debug!("session {previous} reset, new session {}", self.id);
        self.commit()
    }

    /// Run a host event through the matching operation
    pub fn dispatch(&mut self, action: BoundaryAction) -> Result<SessionUpdate, BoundaryError> {
        match action {
            BoundaryAction::Start => self.start(),
            BoundaryAction::Tap { point } => self.add_point(point),
            BoundaryAction::Finish => self.finish(),
            BoundaryAction::Cancel => self.cancel(),
            BoundaryAction::EditVertex { index, point } => self.edit_vertex(index, point),
            BoundaryAction::InsertVertex { index, point } => self.insert_vertex(index, point),
            BoundaryAction::RemoveVertex { index } => self.remove_vertex(index),
            BoundaryAction::Reset => Ok(self.reset()),
        }
    }

    /// Viewport centered on a device location fix
    ///
    /// The fix only positions the map. It is never added as a vertex.
    pub fn locate(&self, fix: GeoPoint) -> Result<Viewport, BoundaryError> {
        let center = fix.validated()?;
        Ok(Viewport { center, zoom: self.config.viewport_zoom })
    }

    fn apply_edit(
        &mut self,
        operation: &'static str,
        edit: VertexEdit,
    ) -> Result<SessionUpdate, BoundaryError> {
        self.guard(operation, |capture| {
            let state = capture.state();
            let editable = capture
                .polygon_mut()
                .ok_or(BoundaryError::InvalidState { operation, state })?;
            editable.apply(edit).map(|_| ())
        })?;
        Ok(self.commit())
    }

    /// Run a capture transition, logging refusals
    fn guard<T>(
        &mut self,
        operation: &'static str,
        transition: impl FnOnce(&mut VertexCapture) -> Result<T, BoundaryError>,
    ) -> Result<T, BoundaryError> {
        transition(&mut self.capture).inspect_err(|error| {
            log::debug!("session {}: {operation} refused: {error}", self.id);
        })
    }

    /// Recompute the result and notify observers
    fn commit(&mut self) -> SessionUpdate {
        self.result = match self.capture.state() {
            SessionState::Idle => None,
            SessionState::Drawing => BoundaryResult::open(self.capture.vertices()),
            SessionState::Completed => self.capture.polygon().map(|p| p.result().clone()),
        };

        let update = SessionUpdate {
            session_id: self.id,
            state: self.capture.state(),
            result: self.result.clone(),
        };

        log::debug!(
            "session {}: {} with {} vertices",
            self.id,
            update.state,
            self.capture.vertices().len()
        );

        for observer in &mut self.observers {
            observer.on_update(&update);
        }

        update
    }
}
