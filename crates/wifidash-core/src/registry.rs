// ── Device registry ──
//
// Single-owner, insertion-ordered device collection for one session.
// All mutation goes through the named operations below (or through
// `execute` in `command.rs`); derived views are recomputed on every call.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::fixture;
use crate::model::{Device, DeviceId, UsageLimit};
use crate::usage::{self, UsageEntry};

/// Behavioural switches for the hardened command path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOptions {
    /// Reject pause/block commands a UI would have disabled
    /// (offline devices, pausing a blocked device).
    #[serde(default = "default_true")]
    pub enforce_preconditions: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            enforce_preconditions: true,
        }
    }
}

/// Aggregate figures for the network status header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub total: usize,
    pub online: usize,
    pub paused: usize,
    pub blocked: usize,
    pub total_usage_gb: f64,
}

/// The authoritative device collection.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: IndexMap<DeviceId, Device>,
    options: RegistryOptions,
}

impl DeviceRegistry {
    /// Seed a registry, preserving the seed's order.
    ///
    /// Rejects duplicate ids and negative or non-finite usage. A device
    /// seeded both blocked and paused is normalised to blocked only.
    pub fn new(seed: Vec<Device>) -> Result<Self, CoreError> {
        Self::with_options(seed, RegistryOptions::default())
    }

    pub fn with_options(seed: Vec<Device>, options: RegistryOptions) -> Result<Self, CoreError> {
        let mut devices = IndexMap::with_capacity(seed.len());
        for mut device in seed {
            if !(device.data_used.is_finite() && device.data_used >= 0.0) {
                return Err(CoreError::validation(format!(
                    "device {} has invalid data usage {}",
                    device.id, device.data_used
                )));
            }
            if device.blocked && device.paused {
                warn!(device = %device.id, "seeded as both blocked and paused, clearing pause");
                device.paused = false;
            }
            match devices.entry(device.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(CoreError::DuplicateDevice {
                        id: device.id.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(device);
                }
            }
        }
        debug!(count = devices.len(), "device registry seeded");
        Ok(Self { devices, options })
    }

    /// Registry over the built-in demo household.
    pub fn demo() -> Self {
        Self {
            devices: fixture::demo_devices()
                .into_iter()
                .map(|d| (d.id.clone(), d))
                .collect(),
            options: RegistryOptions::default(),
        }
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RegistryOptions) {
        self.options = options;
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Find a device by id, falling back to a MAC address match.
    pub fn resolve(&self, identifier: &str) -> Option<&Device> {
        self.get(identifier)
            .or_else(|| self.devices.values().find(|d| d.mac.matches(identifier)))
    }

    /// Devices in seed order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Flip `paused`. Does not check reachability or blocking; unknown ids
    /// are ignored.
    pub fn toggle_pause(&mut self, id: &str) {
        match self.devices.get_mut(id) {
            Some(device) => {
                device.paused = !device.paused;
                debug!(device = %device.id, paused = device.paused, "toggled pause");
            }
            None => debug!(device = id, "toggle_pause on unknown device ignored"),
        }
    }

    /// Flip `blocked`. Blocking always clears `paused`; unblocking leaves it
    /// cleared. Unknown ids are ignored.
    pub fn toggle_block(&mut self, id: &str) {
        match self.devices.get_mut(id) {
            Some(device) => {
                device.blocked = !device.blocked;
                device.paused = false;
                debug!(device = %device.id, blocked = device.blocked, "toggled block");
            }
            None => debug!(device = id, "toggle_block on unknown device ignored"),
        }
    }

    /// Set a new display name. Empty names and unknown ids are ignored.
    pub fn rename(&mut self, id: &str, new_name: &str) {
        if new_name.is_empty() {
            debug!(device = id, "rename with empty name ignored");
            return;
        }
        match self.devices.get_mut(id) {
            Some(device) => {
                debug!(device = %device.id, from = %device.name, to = new_name, "renamed");
                new_name.clone_into(&mut device.name);
            }
            None => debug!(device = id, "rename on unknown device ignored"),
        }
    }

    /// Pause (`true`) every connected, unpaused device, or unpause (`false`)
    /// every paused one. Returns the ids that changed.
    pub fn set_pause_all(&mut self, paused: bool) -> Vec<DeviceId> {
        let changed: Vec<DeviceId> = self
            .devices
            .values_mut()
            .filter(|d| {
                if paused {
                    d.can_toggle_pause() && !d.paused
                } else {
                    d.paused
                }
            })
            .map(|d| {
                d.paused = paused;
                d.id.clone()
            })
            .collect();
        debug!(paused, changed = changed.len(), "pause-all applied");
        changed
    }

    /// Pause every connected, unpaused device whose usage has reached its
    /// limit. Limits for unknown ids are skipped. Returns the ids paused.
    pub fn enforce_usage_limits(&mut self, limits: &[UsageLimit]) -> Vec<DeviceId> {
        let mut paused = Vec::new();
        for limit in limits {
            let Some(device) = self.devices.get_mut(limit.device.as_str()) else {
                warn!(device = %limit.device, "usage limit names an unknown device, skipping");
                continue;
            };
            if device.can_toggle_pause() && !device.paused && device.data_used >= limit.limit_gb {
                device.paused = true;
                debug!(
                    device = %device.id,
                    used = device.data_used,
                    limit = limit.limit_gb,
                    "usage limit reached, paused"
                );
                paused.push(device.id.clone());
            }
        }
        paused
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Devices whose name or MAC contains `term` (case-insensitive) or whose
    /// IP contains `term` (case-sensitive). Seed order is preserved; an empty
    /// term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Device> {
        filter_devices(self.devices.values(), term)
    }

    /// Reachable, unblocked devices. Paused devices still count.
    pub fn online_count(&self) -> usize {
        self.devices.values().filter(|d| d.is_connected()).count()
    }

    pub fn paused_count(&self) -> usize {
        self.devices.values().filter(|d| d.paused).count()
    }

    pub fn blocked_count(&self) -> usize {
        self.devices.values().filter(|d| d.blocked).count()
    }

    /// Sum of `data_used` over every device, whatever its state.
    pub fn total_usage(&self) -> f64 {
        self.devices.values().map(|d| d.data_used).sum()
    }

    /// Devices by `data_used`, largest first; ties keep seed order.
    pub fn usage_ranking(&self) -> Vec<UsageEntry<'_>> {
        usage::rank(self.devices.values())
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            total: self.len(),
            online: self.online_count(),
            paused: self.paused_count(),
            blocked: self.blocked_count(),
            total_usage_gb: self.total_usage(),
        }
    }
}

/// Apply the search predicate to any device sequence, keeping its order.
pub fn filter_devices<'a>(devices: impl IntoIterator<Item = &'a Device>, term: &str) -> Vec<&'a Device> {
    let term_lower = term.to_lowercase();
    devices
        .into_iter()
        .filter(|d| d.matches_search(term, &term_lower))
        .collect()
}
