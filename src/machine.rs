//! Cached Machine Proxy
//!
//! The machine is the bridge's view of one appliance: live collections of
//! disks, pools, and datasets, refreshed together in a single poll cycle.
//! Sensor entities read from the cached state and never trigger their own
//! network calls.
//!
//! Identity fields (disk serial, pool guid, dataset pool name + id) are
//! stable across refreshes so successive snapshots correlate to the same
//! logical entity. A failed refresh keeps the previous collections in
//! place; availability is tracked by the coordinator, not here.

use crate::error::Result;
use crate::truenas::types::{self, DatasetKind, DiskKind, PoolStatus};
use crate::truenas::TrueNasClient;
use std::sync::Arc;
use tracing::debug;

/// Domain view of a physical disk.
#[derive(Debug, Clone)]
pub struct Disk {
    pub name: String,
    pub serial: String,
    pub model: String,
    pub size: u64,
    pub kind: DiskKind,
    pub temperature: Option<f64>,
}

/// Domain view of a storage pool.
#[derive(Debug, Clone)]
pub struct Pool {
    pub name: String,
    pub guid: String,
    pub status: PoolStatus,
}

/// Domain view of a dataset.
///
/// `id` is the path relative to the pool ("media", "media/photos"); the
/// composite `pool_name` + `id` identifies the dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub pool_name: String,
    pub id: String,
    pub kind: DatasetKind,
    pub comments: String,
    pub compression_ratio: String,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl Disk {
    fn from_wire(disk: types::DiskInfo) -> Self {
        Self {
            name: disk.name,
            serial: disk.serial,
            model: disk.model,
            size: disk.size,
            kind: disk.kind,
            temperature: disk.temperature,
        }
    }
}

impl Pool {
    fn from_wire(pool: types::Pool) -> Self {
        Self {
            name: pool.name,
            guid: pool.guid,
            status: pool.status,
        }
    }
}

impl Dataset {
    fn from_wire(dataset: types::Dataset) -> Self {
        let pool_name = if dataset.pool.is_empty() {
            dataset
                .id
                .split('/')
                .next()
                .unwrap_or(dataset.id.as_str())
                .to_string()
        } else {
            dataset.pool
        };

        // "tank/media/photos" with pool "tank" → "media/photos"; the pool's
        // root dataset keeps the pool name as its id.
        let id = dataset
            .id
            .strip_prefix(&format!("{}/", pool_name))
            .unwrap_or(dataset.id.as_str())
            .to_string();

        let available_bytes = dataset.available.map(|v| v.parsed).unwrap_or_default();
        let used_bytes = dataset.used.map(|v| v.parsed).unwrap_or_default();

        Self {
            pool_name,
            id,
            kind: dataset.kind,
            comments: dataset.comments.map(|v| v.parsed).unwrap_or_default(),
            compression_ratio: dataset.compressratio.map(|v| v.parsed).unwrap_or_default(),
            available_bytes,
            used_bytes,
            total_bytes: available_bytes + used_bytes,
        }
    }
}

/// The cached object graph, replaced wholesale on every successful refresh.
#[derive(Debug, Clone, Default)]
pub struct MachineState {
    pub disks: Vec<Disk>,
    pub pools: Vec<Pool>,
    pub datasets: Vec<Dataset>,
}

impl MachineState {
    pub fn disk_by_serial(&self, serial: &str) -> Option<&Disk> {
        self.disks.iter().find(|d| d.serial == serial)
    }

    pub fn pool_by_guid(&self, guid: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.guid == guid)
    }

    pub fn dataset(&self, pool_name: &str, id: &str) -> Option<&Dataset> {
        self.datasets
            .iter()
            .find(|d| d.pool_name == pool_name && d.id == id)
    }
}

/// Proxy for one appliance: shares the API client and owns the cached state.
pub struct Machine {
    client: Arc<TrueNasClient>,
    state: MachineState,
}

impl Machine {
    pub fn new(client: Arc<TrueNasClient>) -> Self {
        Self {
            client,
            state: MachineState::default(),
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Refresh all collections in one cycle.
    ///
    /// Any failed query fails the whole cycle and leaves the previous
    /// collections untouched.
    pub async fn refresh(&mut self) -> Result<()> {
        let disks = self.client.query_disks().await?;
        let pools = self.client.query_pools().await?;
        let datasets = self.client.query_datasets().await?;

        self.state = MachineState {
            disks: disks.into_iter().map(Disk::from_wire).collect(),
            pools: pools.into_iter().map(Pool::from_wire).collect(),
            datasets: datasets.into_iter().map(Dataset::from_wire).collect(),
        };

        debug!(
            "Machine refreshed: {} disks, {} pools, {} datasets",
            self.state.disks.len(),
            self.state.pools.len(),
            self.state.datasets.len()
        );

        Ok(())
    }
}
