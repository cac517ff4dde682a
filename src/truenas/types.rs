//! TrueNAS API Type Definitions
//!
//! Rust struct definitions for the appliance API responses the bridge
//! consumes, used for deserializing JSON responses from the WebSocket API.
//!
//! # Design Notes
//!
//! - **Optional Fields**: Many fields are `Option<T>` because the API may omit them or return null.
//! - **Serde Defaults**: `#[serde(default)]` is used to handle missing fields gracefully.
//! - **Enumerations**: Status/type fields the API reports as uppercase strings map to enums
//!   with an `Unknown` fallback so a newer appliance release cannot break deserialization.
//!
//! # API Endpoints Covered
//!
//! - `disk.query` → [`DiskInfo`]
//! - `pool.query` → [`Pool`]
//! - `pool.dataset.query` → [`Dataset`]
//!
//! # JSON-RPC Protocol
//!
//! - [`JsonRpcRequest`] - Outgoing method calls
//! - [`JsonRpcResponse`] - Incoming responses
//! - [`DdpConnect`] - Initial handshake message

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    pub id: String,
    pub msg: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[allow(dead_code)] // Part of JSON-RPC spec
    pub id: String,
    #[allow(dead_code)] // Part of JSON-RPC spec
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub error: Option<i32>,
    #[serde(default)]
    pub errname: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// DDP Connect message
#[derive(Debug, Serialize)]
pub struct DdpConnect {
    pub msg: String,
    pub version: String,
    pub support: Vec<String>,
}

impl Default for DdpConnect {
    fn default() -> Self {
        Self {
            msg: "connect".to_string(),
            version: "1".to_string(),
            support: vec!["1".to_string()],
        }
    }
}

/// Disk information from disk.query
#[derive(Debug, Deserialize, Clone)]
pub struct DiskInfo {
    pub name: String,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub kind: DiskKind,
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiskKind {
    Hdd,
    Ssd,
    #[serde(other)]
    #[default]
    Unknown,
}

impl DiskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiskKind::Hdd => "HDD",
            DiskKind::Ssd => "SSD",
            DiskKind::Unknown => "UNKNOWN",
        }
    }
}

/// Pool information from pool.query
#[derive(Debug, Deserialize, Clone)]
pub struct Pool {
    pub name: String,
    #[serde(default)]
    pub guid: String,
    pub status: PoolStatus,
}

/// ZFS pool status as reported by the appliance.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoolStatus {
    Online,
    Degraded,
    Faulted,
    Offline,
    Unavail,
    Removed,
    #[serde(other)]
    #[default]
    Unknown,
}

impl PoolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolStatus::Online => "ONLINE",
            PoolStatus::Degraded => "DEGRADED",
            PoolStatus::Faulted => "FAULTED",
            PoolStatus::Offline => "OFFLINE",
            PoolStatus::Unavail => "UNAVAIL",
            PoolStatus::Removed => "REMOVED",
            PoolStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Dataset information from pool.dataset.query
///
/// `id` is the full ZFS path ("tank/media"); the pool prefix is split off
/// when building the domain view.
#[derive(Debug, Deserialize, Clone)]
pub struct Dataset {
    pub id: String,
    #[serde(default)]
    pub pool: String,
    #[serde(rename = "type", default)]
    pub kind: DatasetKind,
    #[serde(default)]
    pub comments: Option<DatasetValue<String>>,
    #[serde(default)]
    pub compressratio: Option<DatasetValue<String>>,
    #[serde(default)]
    pub available: Option<DatasetValue<u64>>,
    #[serde(default)]
    pub used: Option<DatasetValue<u64>>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatasetKind {
    Filesystem,
    Volume,
    #[serde(other)]
    #[default]
    Unknown,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Filesystem => "FILESYSTEM",
            DatasetKind::Volume => "VOLUME",
            DatasetKind::Unknown => "UNKNOWN",
        }
    }
}

/// Composite value wrapper used by dataset properties; the API reports both
/// a raw string and a parsed representation, only the latter is read.
#[derive(Debug, Deserialize, Clone)]
pub struct DatasetValue<T> {
    pub parsed: T,
}
