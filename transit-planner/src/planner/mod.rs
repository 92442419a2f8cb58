//! Trip planner using a transfer-aware Dijkstra search.
//!
//! This module implements the core planning algorithm that answers:
//! "what is the cheapest way from this stop to that one?", where cost
//! is distance travelled plus a fixed penalty for every change of line.
//!
//! `find_path` produces a station-by-station path, `analyze_segments`
//! groups it into rides per line, and `Planner` wraps both for callers.

mod config;
mod search;
mod segments;
mod trip;

pub use config::{ConfigError, SameStationPolicy, SearchConfig};
pub use search::{Endpoint, PathEntry, PathResult, SearchError, find_path};
pub use segments::{Segment, analyze_segments, transfer_count};
pub use trip::{PlanError, Planner, Trip, TripSummary};
