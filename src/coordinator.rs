//! Poll Coordinator
//!
//! One coordinator per bridged appliance drives the shared poll cycle:
//! refresh the machine's object graph, register sensors for newly discovered
//! objects, render every entity against the fresh snapshot, and publish the
//! result to subscribers over a watch channel.
//!
//! The loop never exits. A failed refresh is logged and flips the snapshot's
//! `ok` flag, which renders every entity unavailable until the next
//! successful cycle; the previous object graph is retained so identifiers
//! stay stable.

use crate::entity::{
    DatasetSensor, DiskTemperatureSensor, MachineView, PoolStatusSensor, Sensor, StateValue,
};
use crate::machine::{Machine, MachineState};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

/// Rendered state of one entity for one poll cycle.
#[derive(Debug, Clone, Serialize)]
pub struct EntityState {
    pub entity_id: String,
    pub name: String,
    pub state: Option<StateValue>,
    pub attributes: BTreeMap<&'static str, String>,
    pub available: bool,
    pub icon: &'static str,
}

/// Everything subscribers see from one poll cycle.
#[derive(Debug, Clone, Serialize, Default)]
pub struct BridgeSnapshot {
    /// Whether the cycle's refresh succeeded.
    pub ok: bool,
    pub entities: Vec<EntityState>,
}

/// Sensors keyed by unique id.
///
/// Objects gain a sensor when first discovered and sensors are never
/// removed; an object that disappears from the machine leaves its sensor
/// unavailable.
pub struct EntityRegistry {
    entry_name: String,
    sensors: BTreeMap<String, Box<dyn Sensor>>,
}

impl EntityRegistry {
    pub fn new(entry_name: &str) -> Self {
        Self {
            entry_name: entry_name.to_string(),
            sensors: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Register sensors for objects not seen before.
    pub fn sync(&mut self, state: &MachineState) {
        for disk in &state.disks {
            // A disk without a serial has no stable identity to key on.
            if disk.serial.is_empty() {
                continue;
            }
            self.register(DiskTemperatureSensor::new(&self.entry_name, &disk.serial));
        }

        for pool in &state.pools {
            if pool.guid.is_empty() {
                continue;
            }
            self.register(PoolStatusSensor::new(&pool.name, &pool.guid));
        }

        for dataset in &state.datasets {
            self.register(DatasetSensor::new(&dataset.pool_name, &dataset.id));
        }
    }

    fn register<S: Sensor + 'static>(&mut self, sensor: S) {
        let id = sensor.unique_id();
        if !self.sensors.contains_key(&id) {
            info!("Discovered entity: {} ({})", sensor.name(), id);
            self.sensors.insert(id, Box::new(sensor));
        }
    }

    /// Render every registered entity against a snapshot view.
    pub fn render(&self, view: &MachineView<'_>) -> Vec<EntityState> {
        self.sensors
            .iter()
            .map(|(id, sensor)| EntityState {
                entity_id: id.clone(),
                name: sensor.name(),
                state: sensor.state(view),
                attributes: sensor.attributes(view),
                available: sensor.available(view),
                icon: sensor.icon(),
            })
            .collect()
    }
}

/// Drives the poll cycle for one appliance.
pub struct Coordinator {
    machine: Machine,
    registry: EntityRegistry,
    period: Duration,
    tx: watch::Sender<Arc<BridgeSnapshot>>,
}

impl Coordinator {
    pub fn new(
        machine: Machine,
        entry_name: &str,
        interval_seconds: u64,
    ) -> (Self, watch::Receiver<Arc<BridgeSnapshot>>) {
        let (tx, rx) = watch::channel(Arc::new(BridgeSnapshot::default()));
        (
            Self {
                machine,
                registry: EntityRegistry::new(entry_name),
                period: Duration::from_secs(interval_seconds),
                tx,
            },
            rx,
        )
    }

    /// Run the poll loop forever.
    pub async fn run(mut self) {
        let mut ticker = interval(self.period);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// One poll cycle: refresh, sync the registry, publish a snapshot.
    pub async fn poll_once(&mut self) {
        let ok = match self.machine.refresh().await {
            Ok(()) => {
                self.registry.sync(self.machine.state());
                true
            }
            Err(e) => {
                warn!("Failed to refresh machine state: {}", e);
                false
            }
        };

        let view = MachineView {
            state: self.machine.state(),
            last_refresh_ok: ok,
        };
        let entities = self.registry.render(&view);
        debug!("Publishing snapshot: ok={}, {} entities", ok, entities.len());

        self.tx.send_replace(Arc::new(BridgeSnapshot { ok, entities }));
    }
}
