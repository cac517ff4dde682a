//! TrueNAS WebSocket API Client
//!
//! This module provides a client for interacting with the TrueNAS WebSocket API.
//! The API uses JSON-RPC 2.0 over WebSocket for all communication.
//!
//! # Architecture
//!
//! - **Connection**: WebSocket (ws:// or wss://) to `/websocket` endpoint
//! - **Authentication**: API key or username/password, per the configured mode
//! - **Protocol**: JSON-RPC 2.0 with DDP (Distributed Data Protocol) handshake
//!
//! # Example
//!
//! ```no_run
//! use truenas_bridge::config::{AuthConfig, TrueNasConfig};
//! use truenas_bridge::truenas::TrueNasClient;
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TrueNasConfig {
//!     host: "truenas.local:443".to_string(),
//!     auth: AuthConfig::ApiKey {
//!         api_key: SecretString::from("your-api-key"),
//!     },
//!     use_tls: true,
//!     verify_ssl: false,
//! };
//!
//! let client = TrueNasClient::new(config);
//! let pools = client.query_pools().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::TrueNasConfig;
use crate::error::Result;
use crate::truenas::connection::ConnectionManager;
use crate::truenas::types::*;
use std::sync::Arc;

/// Client for the TrueNAS WebSocket API
///
/// Handles WebSocket connection lifecycle, authentication, and JSON-RPC method calls.
/// Uses a persistent `ConnectionManager` to reuse a single WebSocket connection across
/// multiple API calls, which is required for TrueNAS SCALE 25.04+ authentication.
///
/// # Thread Safety
///
/// This client is `Send` and `Sync`, allowing it to be shared across async tasks.
/// Request IDs are managed atomically to prevent collisions.
pub struct TrueNasClient {
    connection_manager: ConnectionManager,
}

impl TrueNasClient {
    pub fn new(config: TrueNasConfig) -> Self {
        let config = Arc::new(config);
        let connection_manager = ConnectionManager::new(config.clone());
        Self { connection_manager }
    }

    /// Execute a JSON-RPC method call over WebSocket
    ///
    /// This method delegates to the `ConnectionManager` to handle the persistent
    /// connection, authentication, and request execution.
    async fn execute_query<T>(&self, method: &str, params: Option<serde_json::Value>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.connection_manager.execute_query(method, params).await
    }

    /// Query disk information
    pub async fn query_disks(&self) -> Result<Vec<DiskInfo>> {
        self.execute_query("disk.query", Some(serde_json::json!([])))
            .await
    }

    /// Query pool information
    pub async fn query_pools(&self) -> Result<Vec<Pool>> {
        self.execute_query("pool.query", Some(serde_json::Value::Null))
            .await
    }

    pub async fn query_datasets(&self) -> Result<Vec<Dataset>> {
        let params = serde_json::json!([
            [],
            {"select": ["id", "pool", "type", "comments", "compressratio", "available", "used"]}
        ]);
        self.execute_query("pool.dataset.query", Some(params)).await
    }

    /// Start a virtual machine, optionally overcommitting memory
    pub async fn vm_start(&self, id: i64, overcommit: bool) -> Result<serde_json::Value> {
        let params = serde_json::json!([id, {"overcommit": overcommit}]);
        self.execute_query("vm.start", Some(params)).await
    }

    /// Stop a virtual machine, optionally forcing power-off
    pub async fn vm_stop(&self, id: i64, force: bool) -> Result<serde_json::Value> {
        let params = serde_json::json!([id, {"force": force}]);
        self.execute_query("vm.stop", Some(params)).await
    }

    /// Restart a virtual machine
    pub async fn vm_restart(&self, id: i64) -> Result<serde_json::Value> {
        self.execute_query("vm.restart", Some(serde_json::json!([id])))
            .await
    }

    /// Start a jail
    pub async fn jail_start(&self, name: &str) -> Result<serde_json::Value> {
        self.execute_query("jail.start", Some(serde_json::json!([name])))
            .await
    }

    /// Stop a jail, optionally forcing shutdown
    pub async fn jail_stop(&self, name: &str, force: bool) -> Result<serde_json::Value> {
        let params = serde_json::json!([name, {"force": force}]);
        self.execute_query("jail.stop", Some(params)).await
    }

    /// Restart a jail
    pub async fn jail_restart(&self, name: &str) -> Result<serde_json::Value> {
        self.execute_query("jail.restart", Some(serde_json::json!([name])))
            .await
    }

    /// Close the underlying connection
    pub async fn close(&self) {
        self.connection_manager.close().await;
    }
}
