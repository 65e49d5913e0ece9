//! Usage view: heaviest consumers first, with relative bars.

use std::fmt::Write;

use serde::Serialize;
use wifidash_core::{DeviceRegistry, UsageEntry};

use crate::cli::UsageArgs;
use crate::output;

use super::Ctx;

#[derive(Serialize)]
struct UsageReport<'a> {
    total_gb: f64,
    devices: Vec<UsageEntry<'a>>,
}

fn detail(report: &UsageReport<'_>, width: u16) -> String {
    let mut out = format!("Today's usage: {}\n", output::fmt_gb(report.total_gb));
    let name_width = report
        .devices
        .iter()
        .map(|e| e.device.name.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &report.devices {
        let _ = write!(
            out,
            "\n  {:<name_width$}  {}  {:>7}",
            entry.device.name,
            output::usage_bar(entry.share, width),
            output::fmt_gb(entry.device.data_used),
        );
    }
    out
}

pub fn handle(registry: &DeviceRegistry, args: &UsageArgs, ctx: &Ctx) -> String {
    let mut devices = registry.usage_ranking();
    if let Some(top) = args.top {
        devices.truncate(top);
    }
    let report = UsageReport {
        total_gb: registry.total_usage(),
        devices,
    };
    output::render_single(
        ctx.format,
        &report,
        |r| detail(r, args.width),
        |r| {
            r.devices
                .iter()
                .map(|e| e.device.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )
}
