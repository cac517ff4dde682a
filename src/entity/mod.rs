//! Sensor Entity Adapters
//!
//! One sensor entity per monitored object instance (disk, pool, dataset).
//! Each entity exposes a display name, a stable unique identifier, a current
//! value, and a map of auxiliary display attributes, all derived from the
//! machine's cached state.
//!
//! Entities never fetch anything themselves: every read goes through a
//! [`MachineView`] of the snapshot published by the coordinator. An entity
//! whose underlying object is missing from the snapshot, or whose last poll
//! failed, reports itself unavailable and its value as absent.

use crate::machine::MachineState;
use serde::Serialize;
use std::collections::BTreeMap;

pub mod dataset;
pub mod disk;
pub mod pool;

pub use dataset::DatasetSensor;
pub use disk::DiskTemperatureSensor;
pub use pool::PoolStatusSensor;

// Attribute keys are fixed display strings, rendered verbatim.
pub const ATTR_DS_AVAIL_BYTES: &str = "Available Bytes";
pub const ATTR_DS_COMMENTS: &str = "Dataset Comments";
pub const ATTR_DS_COMP_RATIO: &str = "Compression Ratio";
pub const ATTR_DS_NAME: &str = "Dataset";
pub const ATTR_DS_POOL_NAME: &str = "Dataset Pool";
pub const ATTR_DS_TOTAL_BYTES: &str = "Total Bytes";
pub const ATTR_DS_TYPE: &str = "Dataset Type";
pub const ATTR_DS_USED_BYTES: &str = "Used Bytes";
pub const ATTR_POOL_GUID: &str = "GUID";
pub const ATTR_POOL_NAME: &str = "Pool Name";

/// A sensor's current value.
///
/// Serialized untagged, so a temperature renders as a bare number and a pool
/// status as a bare string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Read-only view of one poll cycle's outcome.
#[derive(Debug, Clone, Copy)]
pub struct MachineView<'a> {
    pub state: &'a MachineState,
    /// Whether the most recent refresh succeeded.
    pub last_refresh_ok: bool,
}

/// A read-only sensor entity backed by the machine's cached state.
pub trait Sensor: Send + Sync {
    /// Human-readable display name.
    fn name(&self) -> String;

    /// Stable identifier; must not change across poll cycles.
    fn unique_id(&self) -> String;

    /// Display icon, in Material Design Icons notation.
    fn icon(&self) -> &'static str;

    /// Whether the entity currently has a live backing object.
    fn available(&self, view: &MachineView<'_>) -> bool;

    /// Current value, absent when the entity is unavailable.
    fn state(&self, view: &MachineView<'_>) -> Option<StateValue>;

    /// Auxiliary display attributes, keyed by fixed display strings.
    fn attributes(&self, view: &MachineView<'_>) -> BTreeMap<&'static str, String> {
        let _ = view;
        BTreeMap::new()
    }
}

/// Normalize a string into a stable slug: lowercase alphanumerics with
/// single underscores between runs of anything else.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_passes_through_simple_ids() {
        assert_eq!(slugify("abc123"), "abc123");
    }

    #[test]
    fn slugify_lowercases_and_separates() {
        assert_eq!(slugify("Disk WD-123 Temp"), "disk_wd_123_temp");
    }

    #[test]
    fn slugify_collapses_runs_of_separators() {
        assert_eq!(slugify("tank//media -- photos"), "tank_media_photos");
    }

    #[test]
    fn slugify_trims_leading_and_trailing_separators() {
        assert_eq!(slugify("--tank--"), "tank");
    }

    #[test]
    fn state_value_serializes_untagged() {
        assert_eq!(
            serde_json::to_string(&StateValue::Text("ONLINE".to_string())).unwrap(),
            "\"ONLINE\""
        );
        assert_eq!(serde_json::to_string(&StateValue::Float(38.0)).unwrap(), "38.0");
        assert_eq!(serde_json::to_string(&StateValue::Bool(true)).unwrap(), "true");
    }
}
