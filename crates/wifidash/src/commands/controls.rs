//! Access-control command handlers.

use chrono::{Local, NaiveTime};
use tabled::Tabled;
use wifidash_core::model::controls::hhmm;
use wifidash_core::{AccessControls, Command as CoreCommand, CommandResult, Device, DeviceId, DeviceRegistry, Schedule};

use crate::cli::{ControlsCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Ctx, devices};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&Schedule> for ScheduleRow {
    fn from(s: &Schedule) -> Self {
        Self {
            name: s.name.clone(),
            kind: s.kind.to_string(),
            window: window(s),
            enabled: if s.enabled { "yes".into() } else { "no".into() },
        }
    }
}

fn window(s: &Schedule) -> String {
    format!("{}–{}", s.start.format("%H:%M"), s.end.format("%H:%M"))
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn detail(c: &AccessControls) -> String {
    let mut lines = vec![
        format!("Pause all devices:       {}", on_off(c.pause_all)),
        format!("Guest network:           {}", on_off(c.guest_network)),
        format!("Auto-block new devices:  {}", on_off(c.auto_block_new)),
        String::new(),
        "Scheduled access times:".to_owned(),
    ];
    if c.schedules.is_empty() {
        lines.push("  (none)".into());
    }
    for s in &c.schedules {
        lines.push(format!(
            "  {:<14} {}  {:<8} {}",
            s.name,
            window(s),
            s.kind.to_string(),
            on_off(s.enabled)
        ));
        if !s.description.is_empty() {
            lines.push(format!("  {:<14} {}", "", s.description));
        }
    }
    lines.push(String::new());
    lines.push("Usage limits:".into());
    if c.usage_limits.is_empty() {
        lines.push("  No usage limits set.".into());
    }
    for l in &c.usage_limits {
        lines.push(format!("  device {:<6} {}", l.device.to_string(), output::fmt_gb(l.limit_gb)));
    }
    lines.join("\n")
}

fn parse_time(raw: Option<&str>) -> Result<NaiveTime, CliError> {
    match raw {
        Some(raw) => hhmm::parse(raw).map_err(|e| CliError::Validation {
            field: "at".into(),
            reason: format!("expected HH:MM, got '{raw}' ({e})"),
        }),
        None => Ok(Local::now().time()),
    }
}

/// Render the devices a bulk command touched.
fn render_affected(
    registry: &DeviceRegistry,
    result: &CommandResult,
    empty_message: &str,
    ctx: &Ctx,
) -> String {
    let ids: &[DeviceId] = match result {
        CommandResult::Affected(ids) => ids,
        CommandResult::Device(d) => std::slice::from_ref(&d.id),
    };
    let touched: Vec<&Device> = ids.iter().filter_map(|id| registry.get(id.as_str())).collect();
    if touched.is_empty() && ctx.format == OutputFormat::Table {
        return empty_message.to_owned();
    }
    devices::render_devices(&touched, ctx)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(registry: &mut DeviceRegistry, command: ControlsCommand, ctx: &Ctx) -> Result<String, CliError> {
    let controls = &ctx.config.controls;
    match command {
        ControlsCommand::Show => Ok(output::render_single(ctx.format, controls, detail, |c| {
            c.schedules
                .iter()
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
                .join("\n")
        })),

        ControlsCommand::Active { at } => {
            let at = parse_time(at.as_deref())?;
            let active = controls.active_schedules(at);
            if active.is_empty() && ctx.format == OutputFormat::Table {
                return Ok(format!("No schedules active at {}", at.format("%H:%M")));
            }
            Ok(output::render_list(
                ctx.format,
                &active,
                |s| ScheduleRow::from(*s),
                |s| s.name.clone(),
            ))
        }

        ControlsCommand::PauseAll { off } => {
            let result = registry.execute(CoreCommand::SetPauseAll { paused: !off })?;
            let message = if off {
                "No paused devices to resume"
            } else {
                "No connected devices to pause"
            };
            Ok(render_affected(registry, &result, message, ctx))
        }

        ControlsCommand::Enforce => {
            let limits = controls.usage_limits.clone();
            if limits.is_empty() && ctx.format == OutputFormat::Table {
                return Ok("No usage limits configured".into());
            }
            let result = registry.execute(CoreCommand::EnforceUsageLimits { limits })?;
            Ok(render_affected(registry, &result, "No devices over their usage limit", ctx))
        }
    }
}
