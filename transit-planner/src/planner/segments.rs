//! Segment analysis.
//!
//! Collapses a station-by-station path into rides: one segment per
//! maximal run of hops on the same line.

use serde::Serialize;
use tracing::warn;

use super::search::PathEntry;
use crate::domain::{LineId, StationName};

/// A continuous ride on one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub line: LineId,

    /// Stations in riding order, boarding and alighting included.
    pub stations: Vec<StationName>,

    /// Sum of the hop distances, without transfer penalties.
    pub distance_km: f64,

    pub start_station: StationName,
    pub end_station: StationName,
}

impl Segment {
    fn open(line: &LineId, from: &StationName, entry: &PathEntry) -> Self {
        Self {
            line: line.clone(),
            stations: vec![from.clone(), entry.station.clone()],
            distance_km: entry.distance_from_previous,
            start_station: from.clone(),
            end_station: entry.station.clone(),
        }
    }

    fn extend(&mut self, entry: &PathEntry) {
        self.stations.push(entry.station.clone());
        self.distance_km += entry.distance_from_previous;
        self.end_station = entry.station.clone();
    }

    /// Number of hops ridden in this segment.
    pub fn hop_count(&self) -> usize {
        self.stations.len() - 1
    }
}

/// Group a path into per-line segments.
///
/// A new segment starts whenever the arriving line differs from the
/// current segment's line. Paths with fewer than two entries have no
/// segments.
pub fn analyze_segments(path: &[PathEntry]) -> Vec<Segment> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut segments: Vec<Segment> = Vec::new();
    let mut previous = &first.station;

    for entry in rest {
        let Some(line) = entry.line.as_ref() else {
            warn!(station = %entry.station, "path entry has no line, skipping");
            previous = &entry.station;
            continue;
        };

        match segments.last_mut() {
            Some(segment) if &segment.line == line => segment.extend(entry),
            _ => segments.push(Segment::open(line, previous, entry)),
        }
        previous = &entry.station;
    }

    segments
}

/// Number of line changes implied by a list of segments.
pub fn transfer_count(segments: &[Segment]) -> usize {
    segments.len().saturating_sub(1)
}
