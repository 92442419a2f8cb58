//! Domain types for the transit trip planner.
//!
//! This module contains the validated value types the planner works
//! with. Station names are always normalized and line identifiers are
//! never blank, so code that receives these types can trust them.

mod error;
mod line;
mod records;
mod station;

pub use error::DomainError;
pub use line::LineId;
pub use records::{RouteRecord, StationRecord, ValidRoute};
pub use station::{StationName, normalize_name};
