//! Field report produced from a boundary result
//!
//! Unit conversion and export formats belong to the host, not to the boundary
//! core, so they live here.

use parcel_core::{BoundaryResult, GeoPoint, SessionState};
use serde::Serialize;
use std::io::Write;

/// Square meters per international acre
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.856_42;

/// Square meters per hectare
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SessionState>,
    pub area_square_meters: f64,
    pub area_acres: f64,
    pub area_hectares: f64,
    pub perimeter_meters: f64,
    pub centroid: GeoPoint,
    pub vertices: Vec<GeoPoint>,
}

impl FieldReport {
    pub fn new(result: &BoundaryResult) -> Self {
        Self {
            state: None,
            area_square_meters: result.area_square_meters,
            area_acres: result.area_square_meters / SQUARE_METERS_PER_ACRE,
            area_hectares: result.area_square_meters / SQUARE_METERS_PER_HECTARE,
            perimeter_meters: result.perimeter_meters,
            centroid: result.centroid,
            vertices: result.vertices.clone(),
        }
    }

    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Plain-text export in the farm record's coordinate listing format
    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.vertices.len() + 6);

        if let Some(state) = self.state {
            lines.push(format!("State: {state}"));
        }
        lines.push(format!(
            "Area: {:.2} m² ({:.2} acres, {:.2} ha)",
            self.area_square_meters, self.area_acres, self.area_hectares
        ));
        lines.push(format!("Perimeter: {:.2} m", self.perimeter_meters));
        lines.push(format!(
            "Center: {:.8}, {:.8}",
            self.centroid.latitude, self.centroid.longitude
        ));
        lines.push(String::new());
        lines.push("Boundary Points:".to_owned());
        for (index, point) in self.vertices.iter().enumerate() {
            lines.push(format!(
                "Point {}: {:.8}, {:.8}",
                index + 1,
                point.latitude,
                point.longitude
            ));
        }

        lines.join("\n")
    }

    /// One CSV row per vertex: point number (1-based), latitude, longitude
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(["point", "latitude", "longitude"])?;
        for (index, point) in self.vertices.iter().enumerate() {
            csv_writer.write_record([
                (index + 1).to_string(),
                format!("{:.8}", point.latitude),
                format!("{:.8}", point.longitude),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
