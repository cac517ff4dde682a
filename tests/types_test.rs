use serde_json::json;
use truenas_bridge::truenas::types::*;

#[test]
fn test_deserialize_disk() {
    let json = json!({
        "name": "ada0",
        "serial": "WD-123",
        "model": "WDC WD40EFRX",
        "size": 4000787030016u64,
        "type": "HDD",
        "temperature": 38.0
    });

    let disk: DiskInfo = serde_json::from_value(json).expect("Failed to parse DiskInfo");
    assert_eq!(disk.serial, "WD-123");
    assert_eq!(disk.kind, DiskKind::Hdd);
    assert_eq!(disk.temperature, Some(38.0));
}

#[test]
fn test_deserialize_disk_without_temperature() {
    // The API omits the temperature when the reading is unavailable
    let json = json!({
        "name": "ada1",
        "serial": "WD-456",
        "type": "SSD"
    });

    let disk: DiskInfo = serde_json::from_value(json).expect("Failed to parse DiskInfo");
    assert_eq!(disk.temperature, None);
    assert_eq!(disk.model, "");
    assert_eq!(disk.size, 0);
}

#[test]
fn test_deserialize_disk_with_unknown_type() {
    let json = json!({
        "name": "nvd0",
        "serial": "S123",
        "type": "NVME"
    });

    let disk: DiskInfo = serde_json::from_value(json).expect("Failed to parse DiskInfo");
    assert_eq!(disk.kind, DiskKind::Unknown);
}

#[test]
fn test_deserialize_pool() {
    let json = json!({
        "name": "tank",
        "guid": "abc123",
        "status": "ONLINE"
    });

    let pool: Pool = serde_json::from_value(json).expect("Failed to parse Pool");
    assert_eq!(pool.name, "tank");
    assert_eq!(pool.guid, "abc123");
    assert_eq!(pool.status, PoolStatus::Online);
    assert_eq!(pool.status.as_str(), "ONLINE");
}

#[test]
fn test_deserialize_pool_with_unknown_status() {
    // A status introduced by a newer appliance release must not break parsing
    let json = json!({
        "name": "tank",
        "guid": "abc123",
        "status": "SPLIT"
    });

    let pool: Pool = serde_json::from_value(json).expect("Failed to parse Pool");
    assert_eq!(pool.status, PoolStatus::Unknown);
    assert_eq!(pool.status.as_str(), "UNKNOWN");
}

#[test]
fn test_pool_status_names() {
    assert_eq!(PoolStatus::Degraded.as_str(), "DEGRADED");
    assert_eq!(PoolStatus::Faulted.as_str(), "FAULTED");
    assert_eq!(PoolStatus::Offline.as_str(), "OFFLINE");
    assert_eq!(PoolStatus::Unavail.as_str(), "UNAVAIL");
    assert_eq!(PoolStatus::Removed.as_str(), "REMOVED");
}

#[test]
fn test_deserialize_dataset() {
    let json = json!({
        "id": "tank/data1",
        "pool": "tank",
        "type": "FILESYSTEM",
        "comments": {"parsed": "bulk storage"},
        "compressratio": {"parsed": "1.12x"},
        "available": {"parsed": 2048},
        "used": {"parsed": 1024}
    });

    let dataset: Dataset = serde_json::from_value(json).expect("Failed to parse Dataset");
    assert_eq!(dataset.id, "tank/data1");
    assert_eq!(dataset.kind, DatasetKind::Filesystem);
    assert_eq!(dataset.comments.unwrap().parsed, "bulk storage");
    assert_eq!(dataset.available.unwrap().parsed, 2048);
}

#[test]
fn test_deserialize_dataset_with_missing_properties() {
    let json = json!({
        "id": "tank/empty",
        "pool": "tank",
        "type": "VOLUME"
    });

    let dataset: Dataset = serde_json::from_value(json).expect("Failed to parse Dataset");
    assert_eq!(dataset.kind, DatasetKind::Volume);
    assert!(dataset.comments.is_none());
    assert!(dataset.compressratio.is_none());
    assert!(dataset.available.is_none());
    assert!(dataset.used.is_none());
}

#[test]
fn test_deserialize_json_rpc_error_response() {
    let json = json!({
        "id": "7",
        "msg": "result",
        "error": {"error": 13, "errname": "EACCES", "reason": "Not authenticated"}
    });

    let response: JsonRpcResponse =
        serde_json::from_value(json).expect("Failed to parse JsonRpcResponse");
    assert!(response.result.is_none());
    let error = response.error.expect("Expected an error payload");
    assert_eq!(error.reason.as_deref(), Some("Not authenticated"));
}
