// ── Usage ranking ──

use serde::Serialize;

use crate::model::Device;

/// One row of the usage view: a device and its consumption relative to
/// the top consumer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UsageEntry<'a> {
    pub device: &'a Device,
    /// `data_used / max(data_used)`, in `[0, 1]`. Zero when nobody used anything.
    pub share: f64,
}

/// Sort devices by `data_used`, largest first, and attach each share.
///
/// The sort is stable, so equal consumers keep their input order.
pub fn rank<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Vec<UsageEntry<'a>> {
    let mut sorted: Vec<&Device> = devices.into_iter().collect();
    sorted.sort_by(|a, b| b.data_used.total_cmp(&a.data_used));

    let max = sorted.first().map_or(0.0, |d| d.data_used);
    sorted
        .into_iter()
        .map(|device| UsageEntry {
            device,
            share: if max > 0.0 { device.data_used / max } else { 0.0 },
        })
        .collect()
}
