//! The stop metadata boundary.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, RouteRef, StopId, StopRef};

use super::error::StoreError;

/// One stop row of a line family's table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: StopId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Branch label, for line families with several branches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Route ids serving this stop, for lines that keep them in the store.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<String>,
}

impl StopRecord {
    pub fn stop_ref(&self) -> StopRef {
        StopRef::new(self.id.clone(), self.name.clone())
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Static stop metadata, one table per line family.
///
/// Name lookups are exact; `search_by_partial_name` and
/// `find_by_name_prefix` match substrings and prefixes respectively.
// Only used as a generic bound; the engine awaits it on the calling task.
#[allow(async_fn_in_trait)]
pub trait StopStore {
    /// Id of the stop with exactly this name.
    async fn find_id_by_name(&self, table: &str, name: &str)
    -> Result<Option<StopId>, StoreError>;

    /// Names of all stops whose name contains `fragment`, in table order.
    async fn search_by_partial_name(
        &self,
        table: &str,
        fragment: &str,
    ) -> Result<Vec<String>, StoreError>;

    /// Coordinates of the stop with exactly this name.
    async fn coordinates_by_name(
        &self,
        table: &str,
        name: &str,
    ) -> Result<Option<Coordinates>, StoreError>;

    /// Every stop in the table.
    async fn all_stops(&self, table: &str) -> Result<Vec<StopRecord>, StoreError>;

    /// Branch label of a stop, for multi-branch families.
    async fn branch_label_by_id(
        &self,
        table: &str,
        id: &StopId,
    ) -> Result<Option<String>, StoreError>;

    /// First stop whose name starts with `prefix`.
    async fn find_by_name_prefix(
        &self,
        table: &str,
        prefix: &str,
    ) -> Result<Option<StopRef>, StoreError>;

    /// Route ids recorded for a stop.
    async fn routes_by_stop_id(
        &self,
        table: &str,
        id: &StopId,
    ) -> Result<Vec<RouteRef>, StoreError>;
}
