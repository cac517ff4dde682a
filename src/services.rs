//! Pass-Through Service Calls
//!
//! Thin forwarding layer for VM and jail control. Requests carry at most
//! the optional flags the appliance accepts (force, overcommit); results
//! are relayed without interpretation.

use crate::error::Result;
use crate::truenas::TrueNasClient;
use serde::Deserialize;

/// Control action applied to a VM or jail.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

/// Optional flags accepted by the control calls.
///
/// `overcommit` only applies to vm start, `force` to vm/jail stop; the
/// appliance ignores flags a call does not take.
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct ServiceFlags {
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub overcommit: bool,
}

/// Forward a VM control call.
pub async fn call_vm(
    client: &TrueNasClient,
    action: ServiceAction,
    id: i64,
    flags: ServiceFlags,
) -> Result<serde_json::Value> {
    match action {
        ServiceAction::Start => client.vm_start(id, flags.overcommit).await,
        ServiceAction::Stop => client.vm_stop(id, flags.force).await,
        ServiceAction::Restart => client.vm_restart(id).await,
    }
}

/// Forward a jail control call.
pub async fn call_jail(
    client: &TrueNasClient,
    action: ServiceAction,
    name: &str,
    flags: ServiceFlags,
) -> Result<serde_json::Value> {
    match action {
        ServiceAction::Start => client.jail_start(name).await,
        ServiceAction::Stop => client.jail_stop(name, flags.force).await,
        ServiceAction::Restart => client.jail_restart(name).await,
    }
}
