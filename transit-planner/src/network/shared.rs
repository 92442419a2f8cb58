//! Shared network snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use super::{NetworkError, NetworkSource, TransitGraph};

/// Thread-safe handle to the current network graph.
///
/// Readers get an `Arc` to an immutable graph and search it without
/// holding any lock. A refresh builds the replacement completely before
/// swapping it in, so no reader ever sees a partially built graph.
#[derive(Clone)]
pub struct SharedNetwork {
    inner: Arc<RwLock<Arc<TransitGraph>>>,
}

impl SharedNetwork {
    /// Wrap an already built graph.
    pub fn new(graph: TransitGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    /// Build the initial snapshot from a source.
    ///
    /// This will fail if the source is unavailable or holds a malformed
    /// route.
    pub fn load(source: &impl NetworkSource) -> Result<Self, NetworkError> {
        let graph = source.load()?.build_graph()?;
        Ok(Self::new(graph))
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<TransitGraph> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rebuild the graph from the source.
    ///
    /// On success, replaces the current snapshot and returns its station
    /// count. On failure, the existing snapshot is preserved and the
    /// error is returned.
    pub fn refresh(&self, source: &impl NetworkSource) -> Result<usize, NetworkError> {
        let graph = match source.load().and_then(|data| Ok(data.build_graph()?)) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(error = %e, "network refresh failed, keeping previous snapshot");
                return Err(e);
            }
        };
        let count = graph.station_count();

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(graph);
        drop(guard);

        info!(stations = count, "network snapshot refreshed");
        Ok(count)
    }
}
