//! Network data sources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::TransitGraph;
use crate::domain::{DomainError, RouteRecord, StationRecord};

/// Errors that can occur while loading network data.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Reading or writing the network file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The network file is not valid JSON for `NetworkData`
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A record could not be placed in the graph
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A snapshot of all station and route records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
}

impl NetworkData {
    pub fn new(stations: Vec<StationRecord>, routes: Vec<RouteRecord>) -> Self {
        Self { stations, routes }
    }

    /// Build the graph for this snapshot.
    pub fn build_graph(&self) -> Result<TransitGraph, DomainError> {
        TransitGraph::build(&self.stations, &self.routes)
    }
}

/// Something that can supply the current station and route records.
///
/// The storage layer owns the records; the planner only reads them.
pub trait NetworkSource {
    /// Fetch a complete snapshot of the network.
    fn load(&self) -> Result<NetworkData, NetworkError>;
}

impl NetworkSource for NetworkData {
    fn load(&self) -> Result<NetworkData, NetworkError> {
        Ok(self.clone())
    }
}

/// A network stored as a JSON file on disk.
///
/// The file holds a single object with `stations` and `routes` arrays.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write a network snapshot to the file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, data: &NetworkData) -> Result<(), NetworkError> {
        let io_error = |source: std::io::Error| NetworkError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| NetworkError::Json {
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(io_error)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NetworkSource for JsonFileSource {
    fn load(&self) -> Result<NetworkData, NetworkError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| NetworkError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|e| NetworkError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> NetworkData {
        NetworkData::new(
            vec![StationRecord::new("Saddar"), StationRecord::new("Faizabad")],
            vec![RouteRecord::new("Saddar", "Faizabad", "R1", 6.5)],
        )
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("network.json"));

        source.save(&sample()).unwrap();

        let loaded = source.load().unwrap();
        assert_eq!(loaded.stations.len(), 2);
        assert_eq!(loaded.routes[0].line_id, "R1");
        assert_eq!(loaded.routes[0].distance_km, 6.5);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("network.json");
        let source = JsonFileSource::new(&path);

        source.save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = JsonFileSource::new("/nonexistent/path/network.json");

        let err = source.load().unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
        assert!(err.to_string().starts_with("I/O error on /nonexistent/path/network.json"));
    }

    #[test]
    fn invalid_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, NetworkError::Json { .. }));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(
            &path,
            r#"{"routes":[{"from_name":"A","to_name":"B","line_id":"R1","distance_km":1.0}]}"#,
        )
        .unwrap();

        let data = JsonFileSource::new(&path).load().unwrap();
        assert!(data.stations.is_empty());
        assert_eq!(data.build_graph().unwrap().station_count(), 2);
    }

    #[test]
    fn in_memory_source() {
        let data = sample();
        assert_eq!(data.load().unwrap(), data);
    }
}
