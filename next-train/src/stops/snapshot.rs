//! In-memory stop store loaded from a JSON snapshot.
//!
//! The snapshot is one JSON object mapping table name to its stop rows:
//!
//! ```json
//! {
//!   "OrangeLineStopDetails": [
//!     { "id": "70001", "name": "Forest Hills", "latitude": 42.30, "longitude": -71.11 }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::domain::{Coordinates, RouteRef, StopId, StopRef};

use super::error::StoreError;
use super::store::{StopRecord, StopStore};

/// Stop tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct StopSnapshot {
    tables: HashMap<String, Vec<StopRecord>>,
}

impl StopSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table.
    pub fn with_table(mut self, table: impl Into<String>, records: Vec<StopRecord>) -> Self {
        self.tables.insert(table.into(), records);
        self
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let tables: HashMap<String, Vec<StopRecord>> = serde_json::from_str(json)?;
        Ok(Self { tables })
    }

    /// Load a snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let snapshot = Self::from_json(&json)?;
        debug!(path = %path.display(), tables = snapshot.tables.len(), "Loaded stop snapshot");
        Ok(snapshot)
    }

    /// Names of the tables in the snapshot, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn table(&self, table: &str) -> Result<&[StopRecord], StoreError> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::UnknownTable {
                table: table.to_string(),
            })
    }

    fn by_name(&self, table: &str, name: &str) -> Result<Option<&StopRecord>, StoreError> {
        Ok(self.table(table)?.iter().find(|r| r.name == name))
    }

    fn by_id(&self, table: &str, id: &StopId) -> Result<Option<&StopRecord>, StoreError> {
        Ok(self.table(table)?.iter().find(|r| &r.id == id))
    }
}

impl StopStore for StopSnapshot {
    async fn find_id_by_name(
        &self,
        table: &str,
        name: &str,
    ) -> Result<Option<StopId>, StoreError> {
        Ok(self.by_name(table, name)?.map(|r| r.id.clone()))
    }

    async fn search_by_partial_name(
        &self,
        table: &str,
        fragment: &str,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .table(table)?
            .iter()
            .filter(|r| r.name.contains(fragment))
            .map(|r| r.name.clone())
            .collect())
    }

    async fn coordinates_by_name(
        &self,
        table: &str,
        name: &str,
    ) -> Result<Option<Coordinates>, StoreError> {
        Ok(self.by_name(table, name)?.map(StopRecord::coordinates))
    }

    async fn all_stops(&self, table: &str) -> Result<Vec<StopRecord>, StoreError> {
        Ok(self.table(table)?.to_vec())
    }

    async fn branch_label_by_id(
        &self,
        table: &str,
        id: &StopId,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.by_id(table, id)?.and_then(|r| r.line.clone()))
    }

    async fn find_by_name_prefix(
        &self,
        table: &str,
        prefix: &str,
    ) -> Result<Option<StopRef>, StoreError> {
        Ok(self
            .table(table)?
            .iter()
            .find(|r| r.name.starts_with(prefix))
            .map(StopRecord::stop_ref))
    }

    async fn routes_by_stop_id(
        &self,
        table: &str,
        id: &StopId,
    ) -> Result<Vec<RouteRef>, StoreError> {
        Ok(self
            .by_id(table, id)?
            .map(|r| r.routes.iter().map(RouteRef::new).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SNAPSHOT: &str = r#"{
        "GreenLinesIntegratedStopDetails": [
            { "id": "70154", "name": "Copley - Inbound", "latitude": 42.3499, "longitude": -71.0774, "line": "B" },
            { "id": "70200", "name": "Kenmore - Inbound", "latitude": 42.3489, "longitude": -71.0951, "line": "C" },
            { "id": "70239", "name": "Heath Street", "latitude": 42.3283, "longitude": -71.1105, "line": "E" }
        ],
        "RedLineStopDetails": [
            { "id": "70061", "name": "Alewife", "latitude": 42.3954, "longitude": -71.1425, "routes": ["931_", "933_"] }
        ]
    }"#;

    fn snapshot() -> StopSnapshot {
        StopSnapshot::from_json(SNAPSHOT).unwrap()
    }

    #[tokio::test]
    async fn exact_name_lookups() {
        let store = snapshot();
        let table = "GreenLinesIntegratedStopDetails";

        let id = store.find_id_by_name(table, "Heath Street").await.unwrap();
        assert_eq!(id, Some(StopId::parse("70239").unwrap()));

        assert_eq!(store.find_id_by_name(table, "Heath").await.unwrap(), None);

        let coords = store
            .coordinates_by_name(table, "Heath Street")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(coords.latitude, 42.3283);
    }

    #[tokio::test]
    async fn partial_and_prefix_matches() {
        let store = snapshot();
        let table = "GreenLinesIntegratedStopDetails";

        let names = store.search_by_partial_name(table, "Inbound").await.unwrap();
        assert_eq!(names, vec!["Copley - Inbound", "Kenmore - Inbound"]);

        let hub = store.find_by_name_prefix(table, "Kenmore").await.unwrap().unwrap();
        assert_eq!(hub.id.as_str(), "70200");
        assert_eq!(hub.name, "Kenmore - Inbound");
    }

    #[tokio::test]
    async fn branch_labels_and_routes() {
        let store = snapshot();
        let heath = StopId::parse("70239").unwrap();
        let alewife = StopId::parse("70061").unwrap();

        let label = store
            .branch_label_by_id("GreenLinesIntegratedStopDetails", &heath)
            .await
            .unwrap();
        assert_eq!(label.as_deref(), Some("E"));

        let routes = store
            .routes_by_stop_id("RedLineStopDetails", &alewife)
            .await
            .unwrap();
        assert_eq!(routes, vec![RouteRef::new("931_"), RouteRef::new("933_")]);
    }

    #[tokio::test]
    async fn unknown_table_is_an_error() {
        let store = snapshot();
        let result = store.all_stops("PurpleLineStopDetails").await;
        assert!(matches!(result, Err(StoreError::UnknownTable { .. })));
    }

    #[tokio::test]
    async fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stops.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let store = StopSnapshot::load(&path).await.unwrap();
        assert_eq!(
            store.table_names(),
            vec!["GreenLinesIntegratedStopDetails", "RedLineStopDetails"]
        );
        assert_eq!(store.all_stops("RedLineStopDetails").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = StopSnapshot::load("/nonexistent/path/stops.json").await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn invalid_stop_id_is_rejected() {
        let json = r#"{ "T": [ { "id": "", "name": "x", "latitude": 0, "longitude": 0 } ] }"#;
        assert!(matches!(
            StopSnapshot::from_json(json),
            Err(StoreError::Json(_))
        ));
    }
}
