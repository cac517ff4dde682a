//! WebSocket Connection Management
//!
//! This module handles persistent WebSocket connections to TrueNAS.
//! It maintains a single long-lived connection that is reused across multiple API calls,
//! which is required for proper authentication in TrueNAS 25.04+.

use crate::config::{AuthConfig, TrueNasConfig};
use crate::error::{BridgeError, Result};
use crate::truenas::types::{DdpConnect, JsonRpcRequest, JsonRpcResponse};
use futures_util::{SinkExt, StreamExt};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Manages a persistent WebSocket connection to TrueNAS
pub struct ConnectionManager {
    config: Arc<TrueNasConfig>,
    connection: Arc<Mutex<Option<ActiveConnection>>>,
    request_id: Arc<std::sync::atomic::AtomicU64>,
}

/// An active WebSocket connection
struct ActiveConnection {
    stream: WsStream,
    authenticated: bool,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new(config: Arc<TrueNasConfig>) -> Self {
        Self {
            config,
            connection: Arc::new(Mutex::new(None)),
            request_id: Arc::new(std::sync::atomic::AtomicU64::new(0)),
        }
    }

    /// Get next request ID
    fn next_id(&self) -> String {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            .to_string()
    }

    /// Build WebSocket URL
    fn websocket_url(&self) -> String {
        let protocol = if self.config.use_tls { "wss" } else { "ws" };
        format!("{}://{}/websocket", protocol, self.config.host)
    }

    /// Ensure we have an active, authenticated connection
    async fn ensure_connected(&self) -> Result<()> {
        let mut conn_guard = self.connection.lock().await;

        // Check if we have a connection
        if conn_guard.is_none() {
            info!("Establishing WebSocket connection to TrueNAS...");
            let stream = self.connect_websocket().await?;
            *conn_guard = Some(ActiveConnection {
                stream,
                authenticated: false,
            });
        }

        // Check if we need to authenticate
        if let Some(conn) = conn_guard.as_mut() {
            if !conn.authenticated {
                info!("Authenticating with TrueNAS...");
                if let Err(e) = self.authenticate_connection(conn).await {
                    warn!("Authentication failed, dropping connection: {}", e);
                    *conn_guard = None;
                    return Err(e);
                }
                conn.authenticated = true;
                info!("Successfully authenticated to TrueNAS");
            }
        }

        Ok(())
    }

    /// Connect to WebSocket
    async fn connect_websocket(&self) -> Result<WsStream> {
        let url = self.websocket_url();
        debug!("Connecting to {}", url);

        let (ws_stream, _) = if self.config.use_tls && !self.config.verify_ssl {
            // Custom TLS connector for self-signed certs
            let connector = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(|e| BridgeError::Config(e.to_string()))?;

            let connector = tokio_tungstenite::Connector::NativeTls(connector);
            tokio_tungstenite::connect_async_tls_with_config(&url, None, false, Some(connector))
                .await
                .map_err(|e| BridgeError::Config(format!("TLS connection failed: {}", e)))?
        } else {
            connect_async(&url)
                .await
                .map_err(BridgeError::WebSocket)?
        };

        Ok(ws_stream)
    }

    /// Build the login request for the configured credential mode
    fn auth_request(&self) -> JsonRpcRequest {
        let (method, params) = match &self.config.auth {
            AuthConfig::ApiKey { api_key } => (
                "auth.login_with_api_key",
                serde_json::json!([api_key.expose_secret().trim()]),
            ),
            AuthConfig::Password { username, password } => (
                "auth.login",
                serde_json::json!([username, password.expose_secret()]),
            ),
        };

        JsonRpcRequest {
            id: self.next_id(),
            msg: "method".to_string(),
            method: method.to_string(),
            params: Some(params),
        }
    }

    /// Authenticate an active connection
    async fn authenticate_connection(&self, conn: &mut ActiveConnection) -> Result<()> {
        // Send DDP connect
        let connect_msg = serde_json::to_string(&DdpConnect::default())?;
        conn.stream
            .send(Message::Text(connect_msg.into()))
            .await
            .map_err(BridgeError::WebSocket)?;

        // Read connect response
        if let Some(msg) = conn.stream.next().await {
            let msg = msg.map_err(BridgeError::WebSocket)?;
            debug!("Received raw DDP response: {:?}", msg);
            if let Message::Text(text) = msg {
                debug!("DDP connect response: {}", text);
            }
        }

        // Wait a bit to ensure server is ready (mitigate potential race condition)
        tokio::time::sleep(std::time::Duration::from_millis(2000)).await;

        // Send auth request
        let auth_request = self.auth_request();
        let auth_json = serde_json::to_string(&auth_request)?;
        debug!("Sending auth request");
        conn.stream
            .send(Message::Text(auth_json.into()))
            .await
            .map_err(BridgeError::WebSocket)?;

        // Read auth response
        if let Some(msg) = conn.stream.next().await {
            let msg = msg.map_err(BridgeError::WebSocket)?;
            if let Message::Text(text) = msg {
                debug!("Auth response: {}", text);
                let response: JsonRpcResponse = serde_json::from_str(&text)?;

                // Check for errors
                if let Some(error) = response.error {
                    let error_msg = error.reason.unwrap_or_else(|| "Unknown error".to_string());
                    return Err(BridgeError::Auth(format!(
                        "Authentication failed: {}",
                        error_msg
                    )));
                }

                // Check result
                if let Some(result) = response.result {
                    if result == serde_json::Value::Bool(true) {
                        return Ok(());
                    } else if result == serde_json::Value::Bool(false) {
                        return Err(BridgeError::Auth(
                            "Authentication failed: credentials rejected by TrueNAS".to_string(),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Execute a query on the persistent connection
    pub async fn execute_query<T>(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // Ensure we're connected and authenticated
        self.ensure_connected().await?;

        let mut conn_guard = self.connection.lock().await;
        // Take ownership of the connection (temporarily remove from mutex)
        let mut conn = conn_guard
            .take()
            .ok_or_else(|| BridgeError::Config("No active connection".to_string()))?;

        // Send request
        let request = JsonRpcRequest {
            id: self.next_id(),
            msg: "method".to_string(),
            method: method.to_string(),
            params,
        };

        let request_json = serde_json::to_string(&request)?;
        debug!("Sending request: {}", method);

        if let Err(e) = conn.stream.send(Message::Text(request_json.into())).await {
            // Connection failed, do not put it back (it remains None)
            return Err(BridgeError::WebSocket(e));
        }

        // Read response
        let response_msg = conn.stream.next().await;

        // Put connection back immediately if we got a response (IO is okay)
        // If response is None, it means stream closed, so we don't put it back
        let msg = match response_msg {
            Some(Ok(msg)) => {
                *conn_guard = Some(conn);
                msg
            }
            Some(Err(e)) => return Err(BridgeError::WebSocket(e)),
            None => {
                return Err(BridgeError::TrueNasApi(
                    "Connection closed by server".to_string(),
                ))
            }
        };

        if let Message::Text(text) = msg {
            debug!("{} response received", method);
            let response: JsonRpcResponse = serde_json::from_str(&text)?;

            // Check for errors
            if let Some(error) = response.error {
                let error_msg = error.reason.unwrap_or_else(|| "Unknown error".to_string());

                // If not authenticated, clear connection to force re-auth
                if error_msg.contains("ENOTAUTHENTICATED") {
                    warn!("Session expired, will re-authenticate on next request");
                    *conn_guard = None;
                }

                return Err(BridgeError::TrueNasApi(error_msg));
            }

            // Parse result
            if let Some(result) = response.result {
                return serde_json::from_value(result).map_err(BridgeError::Json);
            }
        }

        Err(BridgeError::TrueNasApi(
            "No valid JSON-RPC response received".to_string(),
        ))
    }

    /// Close the connection
    pub async fn close(&self) {
        let mut conn_guard = self.connection.lock().await;
        if let Some(mut conn) = conn_guard.take() {
            let _ = conn.stream.close(None).await;
            info!("WebSocket connection closed");
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        // Connection will be closed when the stream is dropped
        debug!("ConnectionManager dropped");
    }
}
