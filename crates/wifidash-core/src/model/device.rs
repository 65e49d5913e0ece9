// ── Device domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::device_id::{DeviceId, MacAddress};

/// Device category. Only drives presentation (icons, labels).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceKind {
    Smartphone,
    Laptop,
    Tv,
    Game,
    /// Anything the seed source could not classify.
    #[serde(other)]
    Unknown,
}

/// Last-known reachability. Static for the lifetime of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConnectionStatus {
    Online,
    Offline,
}

/// Effective state of a device, in display precedence order.
///
/// Blocked wins over paused, paused over plain reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Blocked,
    Paused,
    Online,
    Offline,
}

fn default_last_seen() -> String {
    "Now".into()
}

/// The canonical Device record.
///
/// Field names follow the seed wire format (`dataUsed`, `lastSeen`, `type`).
/// Records handed out by the registry are shared borrows; the mutable
/// fields (`name`, `paused`, `blocked`) change only through registry
/// operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub mac: MacAddress,
    pub ip: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub status: ConnectionStatus,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub blocked: bool,
    /// GB consumed in the current period.
    pub data_used: f64,
    #[serde(default = "default_last_seen")]
    pub last_seen: String,
}

impl Device {
    /// Build an online, unpaused, unblocked device with no recorded usage.
    pub fn new(
        id: impl Into<DeviceId>,
        name: impl Into<String>,
        mac: impl Into<String>,
        ip: impl Into<String>,
        kind: DeviceKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mac: MacAddress::new(mac),
            ip: ip.into(),
            kind,
            status: ConnectionStatus::Online,
            paused: false,
            blocked: false,
            data_used: 0.0,
            last_seen: default_last_seen(),
        }
    }

    pub fn with_status(mut self, status: ConnectionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_usage(mut self, data_used: f64) -> Self {
        self.data_used = data_used;
        self
    }

    pub fn with_last_seen(mut self, last_seen: impl Into<String>) -> Self {
        self.last_seen = last_seen.into();
        self
    }

    pub fn is_online(&self) -> bool {
        self.status == ConnectionStatus::Online
    }

    /// Pausing is offered only for reachable, unblocked devices.
    pub fn can_toggle_pause(&self) -> bool {
        self.is_online() && !self.blocked
    }

    /// Blocking is offered only for reachable devices.
    pub fn can_toggle_block(&self) -> bool {
        self.is_online()
    }

    /// Counts toward the "devices connected" figure.
    pub fn is_connected(&self) -> bool {
        self.is_online() && !self.blocked
    }

    pub fn state(&self) -> DeviceState {
        if self.blocked {
            DeviceState::Blocked
        } else if self.paused {
            DeviceState::Paused
        } else if self.is_online() {
            DeviceState::Online
        } else {
            DeviceState::Offline
        }
    }

    /// Search predicate: case-insensitive on name and MAC, case-sensitive on IP.
    ///
    /// `term_lower` must already be lowercased; `term_raw` is the term as typed.
    pub(crate) fn matches_search(&self, term_raw: &str, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.ip.contains(term_raw)
            || self.mac.as_str().to_lowercase().contains(term_lower)
    }
}
