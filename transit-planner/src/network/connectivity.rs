//! Connectivity diagnostics.
//!
//! Offline data-quality checks over a built graph: which stations can
//! reach each other, and which have no connections at all. None of this
//! runs on the query path.

use std::cmp::Reverse;
use std::collections::{BTreeSet, VecDeque};

use super::TransitGraph;
use crate::domain::StationName;

/// Connected components and isolated stations of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Components, largest first. Stations within a component are sorted.
    pub components: Vec<Vec<StationName>>,

    /// Stations with no neighbors.
    pub isolated: Vec<StationName>,
}

impl ConnectivityReport {
    /// Enumerate the components of `graph` by breadth-first traversal.
    pub fn analyze(graph: &TransitGraph) -> Self {
        let isolated = graph
            .stations()
            .filter(|s| graph.neighbors(s).next().is_none())
            .cloned()
            .collect();

        let mut visited: BTreeSet<&StationName> = BTreeSet::new();
        let mut components = Vec::new();

        for station in graph.stations() {
            if visited.contains(station) {
                continue;
            }
            let component = reachable_from(graph, station);
            visited.extend(component.iter());
            components.push(component.into_iter().cloned().collect::<Vec<_>>());
        }

        // Stable sort keeps name order among equal sizes.
        components.sort_by_key(|c| Reverse(c.len()));

        Self {
            components,
            isolated,
        }
    }

    /// Sizes of the components, largest first.
    pub fn component_sizes(&self) -> Vec<usize> {
        self.components.iter().map(Vec::len).collect()
    }

    /// True if every station can reach every other station.
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }

    /// Human-readable descriptions of what is wrong, if anything.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.isolated.is_empty() {
            issues.push(format!(
                "isolated stations (no connections): {} stations",
                self.isolated.len()
            ));
        }

        if self.components.len() > 1 {
            issues.push(format!(
                "graph has {} disconnected components of sizes: {:?}",
                self.components.len(),
                self.component_sizes()
            ));
        }

        issues
    }
}

/// All stations reachable from `start`, including `start` itself.
pub fn reachable_from<'g>(graph: &'g TransitGraph, start: &'g StationName) -> BTreeSet<&'g StationName> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::from([start]);

    while let Some(station) = queue.pop_front() {
        if !visited.insert(station) {
            continue;
        }
        for (neighbor, _) in graph.neighbors(station) {
            if !visited.contains(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

/// Report connectivity problems in `graph`.
///
/// Returns an empty list when the graph is a single component with no
/// isolated stations.
pub fn validate_connectivity(graph: &TransitGraph) -> Vec<String> {
    ConnectivityReport::analyze(graph).issues()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteRecord, StationRecord};

    fn name(s: &str) -> StationName {
        StationName::new(s).unwrap()
    }

    fn graph(stations: &[&str], routes: &[(&str, &str)]) -> TransitGraph {
        let stations: Vec<_> = stations.iter().map(|s| StationRecord::new(*s)).collect();
        let routes: Vec<_> = routes
            .iter()
            .map(|(a, b)| RouteRecord::new(*a, *b, "R1", 1.0))
            .collect();
        TransitGraph::build(&stations, &routes).unwrap()
    }

    #[test]
    fn connected_graph_has_no_issues() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

        let report = ConnectivityReport::analyze(&g);
        assert!(report.is_connected());
        assert!(report.isolated.is_empty());
        assert_eq!(report.component_sizes(), vec![3]);
        assert!(validate_connectivity(&g).is_empty());
    }

    #[test]
    fn empty_graph_has_no_issues() {
        let g = graph(&[], &[]);
        let report = ConnectivityReport::analyze(&g);
        assert!(report.components.is_empty());
        assert!(validate_connectivity(&g).is_empty());
    }

    #[test]
    fn reports_isolated_stations() {
        let g = graph(&["A", "B", "Lonely"], &[("A", "B")]);

        let report = ConnectivityReport::analyze(&g);
        assert_eq!(report.isolated, vec![name("Lonely")]);
        assert_eq!(report.component_sizes(), vec![2, 1]);

        assert_eq!(
            validate_connectivity(&g),
            vec![
                "isolated stations (no connections): 1 stations".to_string(),
                "graph has 2 disconnected components of sizes: [2, 1]".to_string(),
            ]
        );
    }

    #[test]
    fn enumerates_components_largest_first() {
        let g = graph(
            &[],
            &[("A", "B"), ("X", "Y"), ("Y", "Z"), ("P", "Q")],
        );

        let report = ConnectivityReport::analyze(&g);
        assert_eq!(report.component_sizes(), vec![3, 2, 2]);
        assert_eq!(report.components[0], vec![name("X"), name("Y"), name("Z")]);
        assert_eq!(report.components[1], vec![name("A"), name("B")]);
        assert_eq!(report.components[2], vec![name("P"), name("Q")]);
        assert!(report.isolated.is_empty());
        assert_eq!(
            report.issues(),
            vec!["graph has 3 disconnected components of sizes: [3, 2, 2]".to_string()]
        );
    }

    #[test]
    fn reachable_from_includes_start() {
        let g = graph(&["Lonely"], &[("A", "B")]);
        let lonely = name("Lonely");

        let reached = reachable_from(&g, &lonely);
        assert_eq!(reached.len(), 1);
        assert!(reached.contains(&lonely));
    }

    #[test]
    fn self_loop_is_not_isolated() {
        let g = graph(&[], &[("Loop", "Loop")]);
        let report = ConnectivityReport::analyze(&g);
        assert!(report.isolated.is_empty());
        assert_eq!(report.component_sizes(), vec![1]);
    }
}
