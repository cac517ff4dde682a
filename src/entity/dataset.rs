//! Dataset Sensor
//!
//! Reports the overall availability of one dataset, identified by the
//! composite of pool name and dataset id. Attributes project the dataset's
//! type, comments, compression ratio, and byte counters verbatim as strings.

use super::{
    MachineView, Sensor, StateValue, ATTR_DS_AVAIL_BYTES, ATTR_DS_COMMENTS, ATTR_DS_COMP_RATIO,
    ATTR_DS_NAME, ATTR_DS_POOL_NAME, ATTR_DS_TOTAL_BYTES, ATTR_DS_TYPE, ATTR_DS_USED_BYTES,
};
use crate::entity::slugify;
use std::collections::BTreeMap;

pub struct DatasetSensor {
    pool_name: String,
    id: String,
}

impl DatasetSensor {
    pub fn new(pool_name: &str, id: &str) -> Self {
        Self {
            pool_name: pool_name.to_string(),
            id: id.to_string(),
        }
    }
}

impl Sensor for DatasetSensor {
    fn name(&self) -> String {
        format!("{}{} Dataset", self.pool_name, self.id)
    }

    fn unique_id(&self) -> String {
        slugify(&format!("{}{}", self.pool_name, self.id))
    }

    fn icon(&self) -> &'static str {
        "mdi:file-cabinet"
    }

    fn available(&self, view: &MachineView<'_>) -> bool {
        view.last_refresh_ok && view.state.dataset(&self.pool_name, &self.id).is_some()
    }

    /// The dataset's value is its own availability flag.
    fn state(&self, view: &MachineView<'_>) -> Option<StateValue> {
        Some(StateValue::Bool(self.available(view)))
    }

    fn attributes(&self, view: &MachineView<'_>) -> BTreeMap<&'static str, String> {
        let mut attrs = BTreeMap::new();
        if let Some(dataset) = view.state.dataset(&self.pool_name, &self.id) {
            attrs.insert(ATTR_DS_NAME, dataset.id.clone());
            attrs.insert(ATTR_DS_POOL_NAME, dataset.pool_name.clone());
            attrs.insert(ATTR_DS_COMMENTS, dataset.comments.clone());
            attrs.insert(ATTR_DS_TYPE, dataset.kind.as_str().to_string());
            attrs.insert(ATTR_DS_COMP_RATIO, dataset.compression_ratio.clone());
            attrs.insert(ATTR_DS_AVAIL_BYTES, dataset.available_bytes.to_string());
            attrs.insert(ATTR_DS_USED_BYTES, dataset.used_bytes.to_string());
            attrs.insert(ATTR_DS_TOTAL_BYTES, dataset.total_bytes.to_string());
        }
        attrs
    }
}
