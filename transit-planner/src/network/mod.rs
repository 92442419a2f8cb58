//! The transit network: graph construction, loading and diagnostics.
//!
//! A `TransitGraph` is built from station and route records, either
//! directly or through a `NetworkSource`. `SharedNetwork` holds the
//! current snapshot for concurrent readers and swaps in a freshly built
//! graph on refresh.

mod connectivity;
mod graph;
mod shared;
mod source;

pub use connectivity::{ConnectivityReport, reachable_from, validate_connectivity};
pub use graph::{Adjacency, GraphBuilder, RouteIndex, TransitGraph};
pub use shared::SharedNetwork;
pub use source::{JsonFileSource, NetworkData, NetworkError, NetworkSource};
