//! Disk Temperature Sensor
//!
//! Reports the current temperature of one physical disk, identified by its
//! serial number. The value is in degrees Celsius and goes absent whenever
//! the disk drops out of the snapshot, its reading is missing, or the last
//! poll failed.

use super::{MachineView, Sensor, StateValue};
use crate::entity::slugify;

pub struct DiskTemperatureSensor {
    entry_name: String,
    serial: String,
}

impl DiskTemperatureSensor {
    pub fn new(entry_name: &str, serial: &str) -> Self {
        Self {
            entry_name: entry_name.to_string(),
            serial: serial.to_string(),
        }
    }
}

impl Sensor for DiskTemperatureSensor {
    fn name(&self) -> String {
        format!("Disk {} Temperature", self.serial)
    }

    fn unique_id(&self) -> String {
        slugify(&format!(
            "{}-{}_temperature_sensor",
            self.entry_name, self.serial
        ))
    }

    fn icon(&self) -> &'static str {
        "mdi:thermometer"
    }

    fn available(&self, view: &MachineView<'_>) -> bool {
        view.last_refresh_ok && view.state.disk_by_serial(&self.serial).is_some()
    }

    fn state(&self, view: &MachineView<'_>) -> Option<StateValue> {
        if !self.available(view) {
            return None;
        }
        view.state
            .disk_by_serial(&self.serial)?
            .temperature
            .map(StateValue::Float)
    }
}
