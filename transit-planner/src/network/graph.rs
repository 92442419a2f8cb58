//! Graph builder.
//!
//! Turns flat station and route records into the weighted multigraph
//! the search runs over. The graph is immutable once built; refreshing
//! the network means building a new one.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::domain::{DomainError, LineId, RouteRecord, StationName, StationRecord, ValidRoute};

/// Station → neighbor → distance in kilometers.
pub type Adjacency = BTreeMap<StationName, BTreeMap<StationName, f64>>;

/// Which lines serve each directed edge.
///
/// Every edge present in the adjacency has a non-empty set here, stored
/// under both directions. An edge with no entry must not be traversed.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    lines: BTreeMap<StationName, BTreeMap<StationName, BTreeSet<LineId>>>,
}

impl RouteIndex {
    /// Lines serving the edge `from → to`, if any.
    pub fn lines_on_edge(&self, from: &StationName, to: &StationName) -> Option<&BTreeSet<LineId>> {
        self.lines.get(from)?.get(to)
    }

    /// Record that `line` runs between `a` and `b`, in both directions.
    ///
    /// Lines accumulate per edge; a second line on the same pair adds an
    /// alternative rather than replacing the first.
    fn insert(&mut self, a: &StationName, b: &StationName, line: &LineId) {
        for (from, to) in [(a, b), (b, a)] {
            self.lines
                .entry(from.clone())
                .or_default()
                .entry(to.clone())
                .or_default()
                .insert(line.clone());
        }
    }
}

/// The transit network as a weighted multigraph.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    adjacency: Adjacency,
    routes: RouteIndex,
    lines_at_station: BTreeMap<StationName, BTreeSet<LineId>>,
}

impl TransitGraph {
    /// Build a graph from the full set of stations and routes.
    ///
    /// Every station becomes a vertex even if no route touches it, and
    /// so does every route endpoint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedRoute` for the first route with a
    /// blank endpoint or line, or a negative or non-finite distance. No
    /// graph is produced in that case.
    pub fn build(stations: &[StationRecord], routes: &[RouteRecord]) -> Result<Self, DomainError> {
        let mut builder = GraphBuilder::new();
        for station in stations {
            builder.add_station(station);
        }
        for route in routes {
            builder.add_route(route)?;
        }
        Ok(builder.build())
    }

    /// Returns true if the station is a vertex of the graph.
    pub fn contains(&self, station: &StationName) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Neighbors of a station with their distances.
    ///
    /// Unknown stations have no neighbors.
    pub fn neighbors<'a>(
        &'a self,
        station: &StationName,
    ) -> impl Iterator<Item = (&'a StationName, f64)> + use<'a> {
        self.adjacency
            .get(station)
            .into_iter()
            .flat_map(|n| n.iter().map(|(name, d)| (name, *d)))
    }

    /// Distance of the edge between two stations, if they are adjacent.
    pub fn distance(&self, from: &StationName, to: &StationName) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn routes(&self) -> &RouteIndex {
        &self.routes
    }

    /// Lines touching a station.
    pub fn lines_at(&self, station: &StationName) -> Option<&BTreeSet<LineId>> {
        self.lines_at_station.get(station)
    }

    /// All stations in name order.
    pub fn stations(&self) -> impl Iterator<Item = &StationName> {
        self.adjacency.keys()
    }

    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected station pairs with at least one line.
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .map(|(station, neighbors)| neighbors.keys().filter(|n| *n >= station).count())
            .sum()
    }

    /// Number of distinct lines in the network.
    pub fn line_count(&self) -> usize {
        self.lines_at_station
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Returns true if the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Up to `limit` station names, for error messages.
    pub fn sample_stations(&self, limit: usize) -> Vec<StationName> {
        self.adjacency.keys().take(limit).cloned().collect()
    }

    /// Stations whose name contains `partial`, ignoring case.
    ///
    /// The partial input is normalized first. Blank input matches
    /// nothing.
    pub fn stations_matching(&self, partial: &str, limit: usize) -> Vec<StationName> {
        let Ok(needle) = StationName::new(partial) else {
            return Vec::new();
        };
        let needle = needle.as_str().to_lowercase();

        self.adjacency
            .keys()
            .filter(|name| name.as_str().to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Incremental builder for a `TransitGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: TransitGraph,
    route_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a station as a vertex with no neighbors.
    ///
    /// Stations whose name is blank are skipped.
    pub fn add_station(&mut self, station: &StationRecord) -> &mut Self {
        match StationName::new(&station.name) {
            Ok(name) => {
                self.graph.adjacency.entry(name).or_default();
            }
            Err(e) => warn!(raw = %station.name, error = %e, "skipping station"),
        }
        self
    }

    /// Insert a route record in both directions.
    ///
    /// Duplicate records are no-ops. If two records give the same pair
    /// different distances the shorter one is kept.
    pub fn add_route(&mut self, route: &RouteRecord) -> Result<&mut Self, DomainError> {
        let ValidRoute {
            from,
            to,
            line,
            distance_km,
        } = route.validate()?;

        let graph = &mut self.graph;
        if let Some(existing) = graph.distance(&from, &to)
            && existing != distance_km
        {
            warn!(
                from = %from,
                to = %to,
                line = %line,
                existing,
                distance_km,
                "conflicting distances for station pair, keeping the shorter"
            );
        }

        for (a, b) in [(&from, &to), (&to, &from)] {
            let d = graph
                .adjacency
                .entry(a.clone())
                .or_default()
                .entry(b.clone())
                .or_insert(distance_km);
            *d = d.min(distance_km);
        }

        graph.routes.insert(&from, &to, &line);

        for station in [&from, &to] {
            graph
                .lines_at_station
                .entry(station.clone())
                .or_default()
                .insert(line.clone());
        }

        self.route_count += 1;
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> TransitGraph {
        info!(
            stations = self.graph.station_count(),
            routes = self.route_count,
            edges = self.graph.edge_count(),
            "built transit graph"
        );
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::new(s).unwrap()
    }

    fn line(s: &str) -> LineId {
        LineId::new(s).unwrap()
    }

    fn stations(names: &[&str]) -> Vec<StationRecord> {
        names.iter().map(|n| StationRecord::new(*n)).collect()
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = TransitGraph::build(
            &stations(&["A", "B"]),
            &[RouteRecord::new("A", "B", "R1", 3.0)],
        )
        .unwrap();

        assert_eq!(graph.distance(&name("A"), &name("B")), Some(3.0));
        assert_eq!(graph.distance(&name("B"), &name("A")), Some(3.0));
    }

    #[test]
    fn isolated_stations_are_vertices() {
        let graph = TransitGraph::build(
            &stations(&["A", "B", "Lonely"]),
            &[RouteRecord::new("A", "B", "R1", 3.0)],
        )
        .unwrap();

        assert!(graph.contains(&name("Lonely")));
        assert_eq!(graph.neighbors(&name("Lonely")).count(), 0);
        assert_eq!(graph.station_count(), 3);
    }

    #[test]
    fn route_endpoints_become_vertices() {
        let graph =
            TransitGraph::build(&[], &[RouteRecord::new("a", "b", "R1", 1.0)]).unwrap();

        assert!(graph.contains(&name("A")));
        assert!(graph.contains(&name("B")));
    }

    #[test]
    fn names_are_normalized() {
        let graph = TransitGraph::build(
            &stations(&["  blue   AREA "]),
            &[RouteRecord::new("blue area", "zero point", "R1", 2.0)],
        )
        .unwrap();

        assert_eq!(graph.station_count(), 2);
        assert_eq!(graph.distance(&name("Blue Area"), &name("Zero Point")), Some(2.0));
    }

    #[test]
    fn parallel_lines_accumulate() {
        let graph = TransitGraph::build(
            &[],
            &[
                RouteRecord::new("A", "B", "R1", 3.0),
                RouteRecord::new("A", "B", "R2", 3.0),
                RouteRecord::new("B", "A", "R3", 3.0),
            ],
        )
        .unwrap();

        let expected: BTreeSet<LineId> = [line("R1"), line("R2"), line("R3")].into();
        assert_eq!(graph.routes().lines_on_edge(&name("A"), &name("B")), Some(&expected));
        assert_eq!(graph.routes().lines_on_edge(&name("B"), &name("A")), Some(&expected));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn duplicate_route_is_noop() {
        let graph = TransitGraph::build(
            &[],
            &[
                RouteRecord::new("A", "B", "R1", 3.0),
                RouteRecord::new("A", "B", "R1", 3.0),
            ],
        )
        .unwrap();

        assert_eq!(graph.distance(&name("A"), &name("B")), Some(3.0));
        assert_eq!(graph.routes().lines_on_edge(&name("A"), &name("B")).unwrap().len(), 1);
    }

    #[test]
    fn conflicting_distance_keeps_shorter() {
        let graph = TransitGraph::build(
            &[],
            &[
                RouteRecord::new("A", "B", "R1", 5.0),
                RouteRecord::new("A", "B", "R2", 4.0),
                RouteRecord::new("A", "B", "R3", 6.0),
            ],
        )
        .unwrap();

        assert_eq!(graph.distance(&name("A"), &name("B")), Some(4.0));
        assert_eq!(graph.distance(&name("B"), &name("A")), Some(4.0));
    }

    #[test]
    fn lines_at_station() {
        let graph = TransitGraph::build(
            &[],
            &[
                RouteRecord::new("A", "B", "R1", 1.0),
                RouteRecord::new("B", "C", "R2", 1.0),
            ],
        )
        .unwrap();

        let at_b: BTreeSet<LineId> = [line("R1"), line("R2")].into();
        assert_eq!(graph.lines_at(&name("B")), Some(&at_b));
        assert_eq!(graph.lines_at(&name("A")).unwrap().len(), 1);
        assert_eq!(graph.line_count(), 2);
    }

    #[test]
    fn malformed_route_fails_whole_build() {
        let result = TransitGraph::build(
            &[],
            &[
                RouteRecord::new("A", "B", "R1", 1.0),
                RouteRecord::new("B", "C", "R1", -4.0),
            ],
        );

        assert!(matches!(result, Err(DomainError::MalformedRoute { .. })));
    }

    #[test]
    fn blank_station_is_skipped() {
        let graph = TransitGraph::build(&stations(&["   ", "A"]), &[]).unwrap();
        assert_eq!(graph.station_count(), 1);
    }

    #[test]
    fn stations_matching_partial_name() {
        let graph = TransitGraph::build(
            &stations(&["Saddar", "Sadiqabad", "Faizabad", "Committee Chowk"]),
            &[],
        )
        .unwrap();

        assert_eq!(graph.stations_matching("sad", 10), vec![name("Saddar"), name("Sadiqabad")]);
        assert_eq!(graph.stations_matching("ABAD", 10), vec![name("Faizabad"), name("Sadiqabad")]);
        assert_eq!(graph.stations_matching("abad", 1), vec![name("Faizabad")]);
        assert!(graph.stations_matching("  ", 10).is_empty());
        assert!(graph.stations_matching("xyz", 10).is_empty());
    }

    #[test]
    fn sample_stations_is_bounded() {
        let graph = TransitGraph::build(&stations(&["A", "B", "C"]), &[]).unwrap();
        assert_eq!(graph.sample_stations(2), vec![name("A"), name("B")]);
        assert_eq!(graph.sample_stations(10).len(), 3);
    }

    #[test]
    fn empty_graph() {
        let graph = TransitGraph::build(&[], &[]).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.line_count(), 0);
    }
}
