//! Device command handlers.

use tabled::Tabled;
use wifidash_core::{Command as CoreCommand, CommandResult, Device, DeviceId, DeviceRegistry, DeviceState};

use crate::cli::DevicesCommand;
use crate::error::CliError;
use crate::output;

use super::Ctx;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Usage")]
    usage: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            kind: d.kind.to_string(),
            ip: d.ip.clone(),
            mac: d.mac.to_string(),
            state: state_text(d),
            usage: output::fmt_gb(d.data_used),
        }
    }
}

/// "Online", "Paused", "Blocked", or "Last seen 2 hours ago".
pub(crate) fn state_text(d: &Device) -> String {
    match d.state() {
        DeviceState::Offline => format!("Last seen {}", d.last_seen),
        state => state.to_string(),
    }
}

pub(crate) fn detail(d: &Device, color: bool) -> String {
    let state = output::state_label(d.state(), &state_text(d), color);
    let mut lines = vec![
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.name),
        format!("Type:      {}", d.kind),
        format!("IP:        {}", d.ip),
        format!("MAC:       {}", d.mac),
        format!("State:     {state}"),
        format!("Status:    {}", d.status),
        format!("Paused:    {}", d.paused),
        format!("Blocked:   {}", d.blocked),
        format!("Usage:     {}", output::fmt_gb(d.data_used)),
    ];
    if !d.can_toggle_pause() {
        lines.push(format!(
            "Note:      pause unavailable ({})",
            if d.is_online() { "blocked" } else { "offline" }
        ));
    }
    lines.join("\n")
}

// ── Shared renderers ────────────────────────────────────────────────

pub(crate) fn render_devices(devices: &[&Device], ctx: &Ctx) -> String {
    output::render_list(ctx.format, devices, |d| DeviceRow::from(*d), |d| d.id.to_string())
}

pub(crate) fn render_device(device: &Device, ctx: &Ctx) -> String {
    output::render_single(ctx.format, device, |d| detail(d, ctx.color), |d| d.id.to_string())
}

/// Map an id or MAC to the registry's id for that device.
pub(crate) fn resolve_id(registry: &DeviceRegistry, identifier: &str) -> Result<DeviceId, CliError> {
    registry
        .resolve(identifier)
        .map(|d| d.id.clone())
        .ok_or_else(|| CliError::device_not_found(identifier))
}

/// Run a single-device command and render the updated device.
pub(crate) fn apply(registry: &mut DeviceRegistry, command: CoreCommand, ctx: &Ctx) -> Result<String, CliError> {
    match registry.execute(command)? {
        CommandResult::Device(device) => Ok(render_device(&device, ctx)),
        CommandResult::Affected(ids) => Ok(ids.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(registry: &mut DeviceRegistry, command: DevicesCommand, ctx: &Ctx) -> Result<String, CliError> {
    match command {
        DevicesCommand::List { search } => {
            let hits = registry.search(search.as_deref().unwrap_or_default());
            Ok(render_devices(&hits, ctx))
        }

        DevicesCommand::Get { device } => {
            let found = registry
                .resolve(&device)
                .ok_or_else(|| CliError::device_not_found(&device))?;
            Ok(render_device(found, ctx))
        }

        DevicesCommand::Pause { device } => {
            let id = resolve_id(registry, &device)?;
            apply(registry, CoreCommand::TogglePause { id }, ctx)
        }

        DevicesCommand::Block { device } => {
            let id = resolve_id(registry, &device)?;
            apply(registry, CoreCommand::ToggleBlock { id }, ctx)
        }

        DevicesCommand::Rename { device, name } => {
            let id = resolve_id(registry, &device)?;
            apply(registry, CoreCommand::Rename { id, name }, ctx)
        }
    }
}
