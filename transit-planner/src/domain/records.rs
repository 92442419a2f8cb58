//! Station and route records as supplied by the storage layer.
//!
//! These mirror whatever the calling application persists. They are
//! untrusted: `RouteRecord::validate` is the single place where a raw
//! record becomes something the graph builder may insert.

use serde::{Deserialize, Serialize};

use super::{DomainError, LineId, StationName};

/// A station as stored by the calling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Display name, in whatever form it was entered
    pub name: String,
}

impl StationRecord {
    /// Create a station record.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An undirected physical connection between two stations on one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub from_name: String,
    pub to_name: String,
    pub line_id: String,
    pub distance_km: f64,
}

impl RouteRecord {
    /// Create a route record.
    pub fn new(
        from_name: impl Into<String>,
        to_name: impl Into<String>,
        line_id: impl Into<String>,
        distance_km: f64,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            to_name: to_name.into(),
            line_id: line_id.into(),
            distance_km,
        }
    }

    /// Validate the record and normalize its fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedRoute` if either endpoint is blank,
    /// the line identifier is blank, or the distance is negative or not
    /// finite.
    pub fn validate(&self) -> Result<ValidRoute, DomainError> {
        let malformed = |reason: String| DomainError::MalformedRoute {
            from: self.from_name.clone(),
            to: self.to_name.clone(),
            line: self.line_id.clone(),
            reason,
        };

        let from = StationName::new(&self.from_name).map_err(|e| malformed(format!("from: {e}")))?;
        let to = StationName::new(&self.to_name).map_err(|e| malformed(format!("to: {e}")))?;
        let line = LineId::new(&self.line_id).map_err(|e| malformed(e.to_string()))?;

        if !self.distance_km.is_finite() {
            return Err(malformed(format!(
                "distance must be finite, got {}",
                self.distance_km
            )));
        }
        if self.distance_km < 0.0 {
            return Err(malformed(format!(
                "distance must be non-negative, got {}",
                self.distance_km
            )));
        }

        Ok(ValidRoute {
            from,
            to,
            line,
            distance_km: self.distance_km,
        })
    }
}

/// A route record that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRoute {
    pub from: StationName,
    pub to: StationName,
    pub line: LineId,
    pub distance_km: f64,
}
