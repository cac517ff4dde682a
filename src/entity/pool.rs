//! Pool Status Sensor
//!
//! Reports the textual status of one storage pool ("ONLINE", "DEGRADED", ...),
//! identified by the pool's guid. Attributes carry the pool name and guid
//! under their display keys.

use super::{MachineView, Sensor, StateValue, ATTR_POOL_GUID, ATTR_POOL_NAME};
use crate::entity::slugify;
use std::collections::BTreeMap;

pub struct PoolStatusSensor {
    name: String,
    guid: String,
}

impl PoolStatusSensor {
    pub fn new(name: &str, guid: &str) -> Self {
        Self {
            name: name.to_string(),
            guid: guid.to_string(),
        }
    }
}

impl Sensor for PoolStatusSensor {
    fn name(&self) -> String {
        format!("{} Pool", self.name)
    }

    fn unique_id(&self) -> String {
        slugify(&self.guid)
    }

    fn icon(&self) -> &'static str {
        "mdi:database"
    }

    fn available(&self, view: &MachineView<'_>) -> bool {
        view.last_refresh_ok && view.state.pool_by_guid(&self.guid).is_some()
    }

    fn state(&self, view: &MachineView<'_>) -> Option<StateValue> {
        view.state
            .pool_by_guid(&self.guid)
            .filter(|_| view.last_refresh_ok)
            .map(|pool| StateValue::Text(pool.status.as_str().to_string()))
    }

    fn attributes(&self, view: &MachineView<'_>) -> BTreeMap<&'static str, String> {
        let mut attrs = BTreeMap::new();
        if let Some(pool) = view.state.pool_by_guid(&self.guid) {
            attrs.insert(ATTR_POOL_NAME, pool.name.clone());
            attrs.insert(ATTR_POOL_GUID, pool.guid.clone());
        }
        attrs
    }
}
