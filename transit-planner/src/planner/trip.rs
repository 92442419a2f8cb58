//! Caller-facing trip planning.
//!
//! `Planner` is the entry point an application calls with whatever the
//! user typed. It applies input policy, runs the search, and packages
//! the result as a `Trip` with the summary figures a front end shows.

use chrono::Duration;
use serde::Serialize;
use tracing::info;

use super::config::{SameStationPolicy, SearchConfig};
use super::search::{Endpoint, PathEntry, SearchError, find_path};
use super::segments::{Segment, analyze_segments, transfer_count};
use crate::domain::{LineId, StationName};
use crate::network::TransitGraph;

/// Error from trip planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Start or destination was left blank
    #[error("please enter both start and destination stations")]
    MissingInput,

    /// Start and destination are the same and the policy rejects that
    #[error("start and destination are both {0}")]
    SameStation(StationName),

    /// No sequence of lines connects the two stations
    #[error("no route found between {from} and {to}")]
    NoRoute { from: StationName, to: StationName },

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl PlanError {
    /// Which end of the query this error refers to, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            PlanError::Search(SearchError::UnknownStation { role, .. }) => Some(*role),
            _ => None,
        }
    }
}

/// A planned trip.
#[derive(Debug, Clone)]
pub struct Trip {
    cost: f64,
    path: Vec<PathEntry>,
    segments: Vec<Segment>,
    travel_time: Duration,
}

impl Trip {
    /// Station the trip starts at.
    pub fn origin(&self) -> &StationName {
        &self.path[0].station
    }

    /// Station the trip ends at.
    pub fn destination(&self) -> &StationName {
        &self.path[self.path.len() - 1].station
    }

    pub fn path(&self) -> &[PathEntry] {
        &self.path
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Search cost: distance plus transfer penalties, in kilometers.
    pub fn total_cost(&self) -> f64 {
        self.cost
    }

    /// Physical distance travelled, in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.path.iter().map(|e| e.distance_from_previous).sum()
    }

    /// Number of stations visited, both ends included.
    pub fn station_count(&self) -> usize {
        self.path.len()
    }

    pub fn transfer_count(&self) -> usize {
        transfer_count(&self.segments)
    }

    /// Travel time estimated from the search cost, so transfers count
    /// as time too.
    pub fn estimated_travel_time(&self) -> Duration {
        self.travel_time
    }

    /// Lines ridden, in order.
    pub fn lines_used(&self) -> Vec<&LineId> {
        self.segments.iter().map(|s| &s.line).collect()
    }

    /// Flatten into a serializable summary.
    pub fn summary(&self) -> TripSummary {
        TripSummary {
            from: self.origin().to_string(),
            to: self.destination().to_string(),
            stations: self.path.iter().map(|e| e.station.to_string()).collect(),
            total_cost_km: round2(self.cost),
            total_distance_km: round2(self.total_distance_km()),
            station_count: self.station_count(),
            transfer_count: self.transfer_count(),
            travel_time_mins: self.travel_time.num_minutes(),
            lines_used: self.lines_used().iter().map(|l| l.to_string()).collect(),
            segments: self.segments.clone(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Summary of a trip for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub from: String,
    pub to: String,
    pub stations: Vec<String>,
    pub total_cost_km: f64,
    pub total_distance_km: f64,
    pub station_count: usize,
    pub transfer_count: usize,
    pub travel_time_mins: i64,
    pub lines_used: Vec<String>,
    pub segments: Vec<Segment>,
}

/// Trip planner over one network snapshot.
pub struct Planner<'a> {
    graph: &'a TransitGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Plan a trip between two stations given as free text.
    pub fn plan(&self, from: &str, to: &str) -> Result<Trip, PlanError> {
        let (Ok(from), Ok(to)) = (StationName::new(from), StationName::new(to)) else {
            return Err(PlanError::MissingInput);
        };

        if from == to && self.config.same_station == SameStationPolicy::Reject {
            return Err(PlanError::SameStation(from));
        }

        let result = find_path(self.graph, from.as_str(), to.as_str(), self.config)
            .map_err(|e| self.with_suggestions(e))?;

        if !result.is_found() {
            return Err(PlanError::NoRoute { from, to });
        }

        let segments = analyze_segments(&result.path);
        let trip = Trip {
            cost: result.cost,
            travel_time: self.config.travel_time(result.cost),
            path: result.path,
            segments,
        };

        info!(
            from = %from,
            to = %to,
            cost = trip.total_cost(),
            transfers = trip.transfer_count(),
            "trip planned"
        );
        Ok(trip)
    }

    /// Replace the sampled station list with names resembling the input,
    /// when there are any.
    fn with_suggestions(&self, err: SearchError) -> SearchError {
        let (station, role, suggestions) = match err {
            SearchError::UnknownStation {
                station,
                role,
                suggestions,
            } => (station, role, suggestions),
            other => return other,
        };

        let similar = self
            .graph
            .stations_matching(&station, self.config.suggestion_limit);

        SearchError::UnknownStation {
            suggestions: if similar.is_empty() { suggestions } else { similar },
            station,
            role,
        }
    }
}
