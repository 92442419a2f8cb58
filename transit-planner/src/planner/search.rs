//! Transfer-aware shortest path search.
//!
//! Plain Dijkstra tracks the best cost per station. That is not enough
//! here: arriving at a station on line L1 and arriving on L2 are
//! different situations, because continuing on the same line is free
//! while switching costs a transfer penalty. The search therefore runs
//! over (station, current line) states, where the current line is
//! `None` only at the source before anything has been boarded.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::config::{ConfigError, SearchConfig};
use crate::domain::{LineId, StationName, normalize_name};
use crate::network::TransitGraph;

/// Which end of the query a station was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Error from path search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The source or target is not a station of the graph
    #[error("{role} station '{station}' not found in graph; known stations include: {}", join_names(.suggestions))]
    UnknownStation {
        station: String,
        role: Endpoint,
        suggestions: Vec<StationName>,
    },

    /// The configuration cannot drive a terminating search
    #[error("invalid search configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

fn join_names(names: &[StationName]) -> String {
    let names: Vec<&str> = names.iter().map(StationName::as_str).collect();
    format!("[{}]", names.join(", "))
}

/// One station on a found path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEntry {
    pub station: StationName,

    /// Line ridden to arrive here. `None` only for the first entry.
    pub line: Option<LineId>,

    /// Whether arriving here required changing line.
    pub is_transfer: bool,

    /// Physical distance of the hop, without any penalty.
    pub distance_from_previous: f64,

    /// Penalty charged for this hop, 0.0 unless it is a transfer.
    pub transfer_penalty: f64,
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Total cost: distance plus transfer penalties. Infinite when the
    /// target is unreachable.
    pub cost: f64,

    /// The path from source to target, empty when unreachable.
    pub path: Vec<PathEntry>,

    /// Number of states taken off the queue.
    pub iterations: usize,
}

impl PathResult {
    /// The "no path" result.
    pub fn not_found(iterations: usize) -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
            iterations,
        }
    }

    pub fn is_found(&self) -> bool {
        self.cost.is_finite()
    }

    /// Number of hops that changed line.
    pub fn transfer_count(&self) -> usize {
        self.path.iter().filter(|e| e.is_transfer).count()
    }
}

/// A step in the search tree. Paths are rebuilt by following parents.
struct Hop<'g> {
    station: &'g StationName,
    line: Option<&'g LineId>,
    is_transfer: bool,
    distance: f64,
    penalty: f64,
    parent: Option<usize>,
}

/// Priority queue entry.
///
/// Ordered by cost, then by insertion sequence, so equal-cost entries
/// pop first-in first-out and every run is reproducible.
struct QueueEntry {
    cost: f64,
    seq: u64,
    hop: usize,
}

// Reversed so that `BinaryHeap` behaves as a min-heap
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Find the cheapest path from `source` to `target`.
///
/// Both names are normalized before lookup. The cost of a path is the
/// sum of its edge distances plus `config.transfer_penalty_km` for
/// every change of line; boarding the first line is free. The first
/// time the target station comes off the queue, on any line, its path
/// is optimal.
///
/// An unreachable target, a target whose cost would overflow to
/// infinity, or running out of `config.max_iterations`, yields
/// `PathResult::not_found` rather than an error. A query whose
/// source equals its target returns the zero-cost single-entry path.
///
/// # Errors
///
/// Returns `SearchError::InvalidConfig` if `config` fails
/// `SearchConfig::validate`, and `SearchError::UnknownStation` if either
/// station is not in the graph.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::RouteRecord;
/// use transit_planner::network::TransitGraph;
/// use transit_planner::planner::{SearchConfig, find_path};
///
/// let graph = TransitGraph::build(
///     &[],
///     &[
///         RouteRecord::new("A", "B", "R1", 3.0),
///         RouteRecord::new("B", "C", "R2", 4.0),
///     ],
/// )
/// .unwrap();
///
/// let result = find_path(&graph, "a", "c", &SearchConfig::default()).unwrap();
/// assert_eq!(result.cost, 12.0);
/// assert_eq!(result.transfer_count(), 1);
/// ```
pub fn find_path(
    graph: &TransitGraph,
    source: &str,
    target: &str,
    config: &SearchConfig,
) -> Result<PathResult, SearchError> {
    config.validate()?;
    let source = resolve(graph, source, Endpoint::Source, config)?;
    let target = resolve(graph, target, Endpoint::Target, config)?;

    debug!(
        source = %source,
        target = %target,
        transfer_penalty = config.transfer_penalty_km,
        "starting path search"
    );

    let routes = graph.routes();

    let mut hops = vec![Hop {
        station: source,
        line: None,
        is_transfer: false,
        distance: 0.0,
        penalty: 0.0,
        parent: None,
    }];
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        cost: 0.0,
        seq: 0,
        hop: 0,
    });
    let mut next_seq = 1;

    // Lowest cost at which each (station, line) state has been settled
    let mut settled: HashMap<(&StationName, Option<&LineId>), f64> = HashMap::new();
    let mut iterations = 0;

    while let Some(QueueEntry { cost, hop, .. }) = queue.pop() {
        iterations += 1;
        if config.max_iterations.is_some_and(|max| iterations > max) {
            warn!(
                source = %source,
                target = %target,
                iterations,
                "search iteration cap reached"
            );
            return Ok(PathResult::not_found(iterations - 1));
        }

        let station = hops[hop].station;
        let current_line = hops[hop].line;

        if settled
            .get(&(station, current_line))
            .is_some_and(|&best| best <= cost)
        {
            continue;
        }
        settled.insert((station, current_line), cost);

        if station == target {
            let path = rebuild_path(&hops, hop);
            debug!(
                cost,
                iterations,
                stations = path.len(),
                transfers = path.iter().filter(|e| e.is_transfer).count(),
                "path found"
            );
            return Ok(PathResult {
                cost,
                path,
                iterations,
            });
        }

        for (neighbor, distance) in graph.neighbors(station) {
            let Some(lines) = routes.lines_on_edge(station, neighbor) else {
                continue;
            };

            for next_line in lines {
                let is_transfer = current_line.is_some_and(|l| l != next_line);
                let penalty = if is_transfer {
                    config.transfer_penalty_km
                } else {
                    0.0
                };
                let next_cost = cost + distance + penalty;
                if !next_cost.is_finite() {
                    continue;
                }

                if settled
                    .get(&(neighbor, Some(next_line)))
                    .is_some_and(|&best| best <= next_cost)
                {
                    continue;
                }

                if is_transfer {
                    trace!(
                        at = %station,
                        from_line = ?current_line,
                        to_line = %next_line,
                        "transfer"
                    );
                }

                hops.push(Hop {
                    station: neighbor,
                    line: Some(next_line),
                    is_transfer,
                    distance,
                    penalty,
                    parent: Some(hop),
                });
                queue.push(QueueEntry {
                    cost: next_cost,
                    seq: next_seq,
                    hop: hops.len() - 1,
                });
                next_seq += 1;
            }
        }
    }

    debug!(source = %source, target = %target, iterations, "no path found");
    Ok(PathResult::not_found(iterations))
}

/// Look up a station by its normalized name.
fn resolve<'g>(
    graph: &'g TransitGraph,
    raw: &str,
    role: Endpoint,
    config: &SearchConfig,
) -> Result<&'g StationName, SearchError> {
    let normalized = normalize_name(raw);
    graph
        .adjacency()
        .get_key_value(normalized.as_str())
        .map(|(name, _)| name)
        .ok_or_else(|| SearchError::UnknownStation {
            station: normalized,
            role,
            suggestions: graph.sample_stations(config.suggestion_limit),
        })
}

/// Walk parent links back to the source.
fn rebuild_path(hops: &[Hop<'_>], last: usize) -> Vec<PathEntry> {
    let mut path = Vec::new();
    let mut cursor = Some(last);

    while let Some(idx) = cursor {
        let hop = &hops[idx];
        path.push(PathEntry {
            station: hop.station.clone(),
            line: hop.line.cloned(),
            is_transfer: hop.is_transfer,
            distance_from_previous: hop.distance,
            transfer_penalty: hop.penalty,
        });
        cursor = hop.parent;
    }

    path.reverse();
    path
}
