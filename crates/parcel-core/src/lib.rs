//! Parcel Core Library
//!
//! Interactive land-parcel boundary capture: a host UI feeds map taps and
//! vertex edits into a [`BoundarySession`] and receives the enclosed area,
//! perimeter and centroid of the boundary after every change.
//!
//! ```
//! use parcel_core::{BoundarySession, GeoPoint, SessionState};
//!
//! let mut session = BoundarySession::new();
//! session.start().unwrap();
//! session.add_point(GeoPoint::new(12.9716, 77.5946)).unwrap();
//! session.add_point(GeoPoint::new(12.9734, 77.5946)).unwrap();
//! session.add_point(GeoPoint::new(12.9734, 77.5964)).unwrap();
//!
//! let update = session.finish().unwrap();
//! assert_eq!(update.state, SessionState::Completed);
//! assert!(update.result.unwrap().area_square_meters > 0.0);
//! ```

pub mod capture;
pub mod config;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod point;
pub mod polygon;
pub mod session;
pub mod snap;

pub use capture::{SessionState, TapOutcome, VertexCapture};
pub use config::{BoundaryConfig, ConfigError};
pub use edit::{apply_vertex_edit, EditablePolygon, VertexEdit};
pub use error::BoundaryError;
pub use geometry::{
    area, centroid, distance, path_length, perimeter, signed_area, winding, Winding,
    EARTH_RADIUS_M,
};
pub use measure::BoundaryResult;
pub use point::{GeoPoint, Vertex};
pub use polygon::Polygon;
pub use session::{
    BoundaryAction, BoundaryObserver, BoundarySession, SessionId, SessionUpdate, Viewport,
};
pub use snap::{should_close, SnapConfig, SnapDetector};
