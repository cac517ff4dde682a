//! TrueNAS Sensor Bridge
//!
//! A home-automation bridge that polls a TrueNAS storage appliance and
//! republishes its state as read-only sensor entities.
//!
//! # Overview
//!
//! The bridge connects to the TrueNAS WebSocket API, keeps a cached view of
//! the appliance's disks, storage pools, and datasets, and derives one sensor
//! entity per monitored object. Entity states are served as JSON over HTTP for
//! consumption by dashboards and automation frameworks, alongside thin
//! pass-through endpoints for VM and jail control.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      WebSocket       ┌───────────────┐
//! │  TrueNAS    │ ◄─────────────────►  │    Bridge     │
//! │  appliance  │   JSON-RPC 2.0       │               │
//! └─────────────┘                      │  ┌─────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Machine │  │ ◄────────────► │ Automation │
//!                                      │  └─────────┘  │   /states      │ framework  │
//!                                      │  ┌─────────┐  │                └────────────┘
//!                                      │  │Entities │  │
//!                                      │  └─────────┘  │
//!                                      └───────────────┘
//! ```
//!
//! A single poll cycle (default every 30 seconds) refreshes the machine's
//! object graph; every sensor entity reads derived fields from that shared
//! snapshot without re-fetching.
//!
//! # Modules
//!
//! - [`truenas`] - WebSocket client and API type definitions
//! - [`machine`] - Cached machine proxy (disks, pools, datasets)
//! - [`entity`] - Sensor entity adapters
//! - [`coordinator`] - Shared poll cycle and state fan-out
//! - [`services`] - VM/jail pass-through service calls
//! - [`server`] - HTTP server exposing entity states
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use truenas_bridge::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod machine;
pub mod server;
pub mod services;
pub mod truenas;
