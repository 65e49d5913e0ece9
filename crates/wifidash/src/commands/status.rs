//! Network status header.

use owo_colors::OwoColorize;
use wifidash_core::{DeviceRegistry, NetworkSummary};

use crate::output;

use super::Ctx;

fn detail(s: &NetworkSummary, color: bool) -> String {
    let connected = format!("{} devices connected to your WiFi", s.online);
    let headline = if color { connected.bold().to_string() } else { connected };
    [
        headline,
        format!("Known devices:  {}", s.total),
        format!("Paused:         {}", s.paused),
        format!("Blocked:        {}", s.blocked),
        format!("Today's usage:  {}", output::fmt_gb(s.total_usage_gb)),
    ]
    .join("\n")
}

pub fn handle(registry: &DeviceRegistry, ctx: &Ctx) -> String {
    let summary = registry.summary();
    output::render_single(ctx.format, &summary, |s| detail(s, ctx.color), |s| s.online.to_string())
}
