//! Ring-closing snap detection
//!
//! A tap close enough to the first vertex closes the ring instead of adding a
//! new vertex. Explicit finishing bypasses the distance check but is subject to
//! the same minimum vertex count.

use crate::geometry::{self, MIN_RING_POINTS};
use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Default snap radius around the first vertex, in meters
pub const DEFAULT_SNAP_RADIUS_M: f64 = 50.0;

/// Configuration for ring-closing snapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Enable/disable automatic closing on a tap near the first vertex
    pub enabled: bool,

    /// Snap radius in meters (exclusive)
    pub radius_m: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { enabled: true, radius_m: DEFAULT_SNAP_RADIUS_M }
    }
}

/// Decides whether a tap closes the ring
#[derive(Debug, Clone, Default)]
pub struct SnapDetector {
    config: SnapConfig,
}

impl SnapDetector {
    /// Create a snap detector with the default 50 m radius
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snap detector with custom configuration
    pub fn with_config(config: SnapConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Update configuration
    pub fn set_config(&mut self, config: SnapConfig) {
        self.config = config;
    }

    /// True when `candidate` should close the ring back to `first_vertex`
    pub fn should_close(
        &self,
        candidate: &GeoPoint,
        first_vertex: &GeoPoint,
        vertex_count: usize,
    ) -> bool {
        if !self.config.enabled || !can_finish(vertex_count) {
            return false;
        }

        geometry::distance(candidate, first_vertex) < self.config.radius_m
    }
}

/// True when a ring with `vertex_count` vertices may be completed
pub fn can_finish(vertex_count: usize) -> bool {
    vertex_count >= MIN_RING_POINTS
}

/// Snap check with the default configuration
pub fn should_close(candidate: &GeoPoint, first_vertex: &GeoPoint, vertex_count: usize) -> bool {
    SnapDetector::new().should_close(candidate, first_vertex, vertex_count)
}
