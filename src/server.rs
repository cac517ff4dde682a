//! HTTP Server and Poll Cycle
//!
//! This module wires the poll coordinator to the HTTP surface through which
//! the bridge publishes entity states.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing entity states and service endpoints
//! - **Poll Loop**: Background coordinator task that refreshes the machine and
//!   publishes snapshots on a watch channel
//! - **State Management**: Shared state (client, snapshot receiver) using Arc for thread-safety
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to states and health
//! - `GET /states` - All entity states as JSON
//! - `GET /states/{entity_id}` - One entity state, 404 if unknown
//! - `GET /health` - Health check (200 if the last poll succeeded, 503 otherwise)
//! - `POST /services/vm/{action}/{id}` - VM start/stop/restart pass-through
//! - `POST /services/jail/{action}/{name}` - Jail start/stop/restart pass-through
//!
//! # Error Handling
//!
//! A failed poll cycle is logged by the coordinator and surfaces here only as
//! unavailable entities and a 503 health check. Service call failures map to
//! 502 with the appliance's error text.

use crate::config::Config;
use crate::coordinator::{BridgeSnapshot, Coordinator, EntityState};
use crate::machine::Machine;
use crate::services::{self, ServiceAction, ServiceFlags};
use crate::truenas::TrueNasClient;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    client: Arc<TrueNasClient>,
    snapshot: watch::Receiver<Arc<BridgeSnapshot>>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let client = Arc::new(TrueNasClient::new(config.truenas.clone()));
    let machine = Machine::new(client.clone());

    let (coordinator, snapshot) = Coordinator::new(
        machine,
        &config.entry.name,
        config.polling.interval_seconds,
    );

    // Start the background poll cycle
    tokio::spawn(coordinator.run());

    let state = AppState { client, snapshot };

    // Build the router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/states", get(states_handler))
        .route("/states/{entity_id}", get(entity_handler))
        .route("/health", get(health_handler))
        .route("/services/vm/{action}/{id}", post(vm_service_handler))
        .route("/services/jail/{action}/{name}", post(jail_service_handler))
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("State server listening on {}", addr);
    info!("Entity states available at http://{}/states", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    Html(
        r#"<html>
<head><title>TrueNAS Bridge</title></head>
<body>
<h1>TrueNAS Sensor Bridge</h1>
<p><a href="/states">Entity states</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn states_handler(State(state): State<AppState>) -> Json<Vec<EntityState>> {
    let snapshot = state.snapshot.borrow().clone();
    Json(snapshot.entities.clone())
}

async fn entity_handler(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Response {
    let snapshot = state.snapshot.borrow().clone();
    match snapshot.entities.iter().find(|e| e.entity_id == entity_id) {
        Some(entity) => Json(entity.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("No entity with id {}", entity_id),
        )
            .into_response(),
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.snapshot.borrow().ok {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "TrueNAS API unreachable")
    }
}

/// Parse an optional JSON body into service flags; an empty body means no flags.
fn parse_flags(body: &Bytes) -> Result<ServiceFlags, Response> {
    if body.is_empty() {
        return Ok(ServiceFlags::default());
    }
    serde_json::from_slice(body.as_ref()).map_err(|e| {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)).into_response()
    })
}

fn relay_result(result: crate::error::Result<serde_json::Value>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            warn!("Service call failed: {}", e);
            (StatusCode::BAD_GATEWAY, format!("Service call failed: {}", e)).into_response()
        }
    }
}

async fn vm_service_handler(
    State(state): State<AppState>,
    Path((action, id)): Path<(ServiceAction, i64)>,
    body: Bytes,
) -> Response {
    let flags = match parse_flags(&body) {
        Ok(flags) => flags,
        Err(rejection) => return rejection,
    };
    relay_result(services::call_vm(&state.client, action, id, flags).await)
}

async fn jail_service_handler(
    State(state): State<AppState>,
    Path((action, name)): Path<(ServiceAction, String)>,
    body: Bytes,
) -> Response {
    let flags = match parse_flags(&body) {
        Ok(flags) => flags,
        Err(rejection) => return rejection,
    };
    relay_result(services::call_jail(&state.client, action, &name, flags).await)
}
