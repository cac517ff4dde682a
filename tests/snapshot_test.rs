//! Snapshot rendering tests
//!
//! Tests for the JSON shape served to subscribers.

use truenas_bridge::coordinator::EntityRegistry;
use truenas_bridge::entity::MachineView;
use truenas_bridge::machine::{Dataset, Disk, MachineState, Pool};
use truenas_bridge::truenas::types::{DatasetKind, DiskKind, PoolStatus};

fn sample_state() -> MachineState {
    MachineState {
        disks: vec![Disk {
            name: "ada0".to_string(),
            serial: "WD-123".to_string(),
            model: "WDC".to_string(),
            size: 4096,
            kind: DiskKind::Hdd,
            temperature: Some(38.5),
        }],
        pools: vec![Pool {
            name: "tank".to_string(),
            guid: "abc123".to_string(),
            status: PoolStatus::Online,
        }],
        datasets: vec![Dataset {
            pool_name: "tank".to_string(),
            id: "data1".to_string(),
            kind: DatasetKind::Filesystem,
            comments: "bulk storage".to_string(),
            compression_ratio: "1.12x".to_string(),
            available_bytes: 2048,
            used_bytes: 1024,
            total_bytes: 3072,
        }],
    }
}

#[test]
fn test_rendered_entities_serialize_to_json() {
    // Given: A registry synced against a sample snapshot
    let mut registry = EntityRegistry::new("truenas");
    let state = sample_state();
    registry.sync(&state);

    // When: Rendering and serializing the entities
    let view = MachineView {
        state: &state,
        last_refresh_ok: true,
    };
    let rendered = registry.render(&view);
    let json = serde_json::to_value(&rendered).expect("Failed to serialize entities");

    // Then: Every entity carries id, name, state, attributes, availability
    let entities = json.as_array().expect("Expected a JSON array");
    assert_eq!(entities.len(), 3);
    for entity in entities {
        assert!(entity.get("entity_id").is_some());
        assert!(entity.get("name").is_some());
        assert!(entity.get("attributes").is_some());
        assert_eq!(entity["available"], serde_json::json!(true));
    }
}

#[test]
fn test_state_values_render_untagged() {
    // Given: A synced registry
    let mut registry = EntityRegistry::new("truenas");
    let state = sample_state();
    registry.sync(&state);

    let view = MachineView {
        state: &state,
        last_refresh_ok: true,
    };
    let json = serde_json::to_value(registry.render(&view)).expect("Failed to serialize");
    let entities = json.as_array().unwrap();

    // Then: The disk reports a bare number, the pool a bare string, the
    // dataset a bare boolean
    let by_id = |needle: &str| {
        entities
            .iter()
            .find(|e| e["entity_id"].as_str().unwrap().contains(needle))
            .unwrap()
    };
    assert_eq!(by_id("temperature")["state"], serde_json::json!(38.5));
    assert_eq!(by_id("abc123")["state"], serde_json::json!("ONLINE"));
    assert_eq!(by_id("tankdata1")["state"], serde_json::json!(true));
}

#[test]
fn test_failed_cycle_serializes_null_states() {
    // Given: A registry rendered against a failed poll cycle
    let mut registry = EntityRegistry::new("truenas");
    let state = sample_state();
    registry.sync(&state);

    let view = MachineView {
        state: &state,
        last_refresh_ok: false,
    };
    let json = serde_json::to_value(registry.render(&view)).expect("Failed to serialize");

    // Then: The disk's value serializes as null and nothing is available
    let entities = json.as_array().unwrap();
    let disk = entities
        .iter()
        .find(|e| e["entity_id"].as_str().unwrap().contains("temperature"))
        .unwrap();
    assert!(disk["state"].is_null());
    assert!(entities.iter().all(|e| e["available"] == serde_json::json!(false)));
}

#[test]
fn test_attribute_keys_are_display_strings() {
    // Given: A synced registry
    let mut registry = EntityRegistry::new("truenas");
    let state = sample_state();
    registry.sync(&state);

    let view = MachineView {
        state: &state,
        last_refresh_ok: true,
    };
    let json = serde_json::to_value(registry.render(&view)).expect("Failed to serialize");
    let entities = json.as_array().unwrap();

    // Then: The dataset's attribute map uses the documented display keys
    let dataset = entities
        .iter()
        .find(|e| e["entity_id"] == serde_json::json!("tankdata1"))
        .unwrap();
    let attrs = dataset["attributes"].as_object().unwrap();
    assert_eq!(attrs["Available Bytes"], serde_json::json!("2048"));
    assert_eq!(attrs["Dataset Comments"], serde_json::json!("bulk storage"));
    assert_eq!(attrs["Compression Ratio"], serde_json::json!("1.12x"));
    assert_eq!(attrs["Total Bytes"], serde_json::json!("3072"));
    assert_eq!(attrs.len(), 8);
}
