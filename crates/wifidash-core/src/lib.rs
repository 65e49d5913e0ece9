//! Device state model between the seed source and UI consumers (CLI).
//!
//! This crate owns the business logic and domain model for wifidash:
//!
//! - **[`DeviceRegistry`]**: The authoritative, insertion-ordered device
//!   collection for one session. Exposes the toggle/rename transitions and
//!   derived views ([`search`](DeviceRegistry::search),
//!   [`online_count`](DeviceRegistry::online_count),
//!   [`total_usage`](DeviceRegistry::total_usage),
//!   [`usage_ranking`](DeviceRegistry::usage_ranking)).
//!
//! - **[`Command`]**: Typed mutation requests run through
//!   [`DeviceRegistry::execute`], which reports unknown ids, empty names,
//!   and device-state preconditions as [`CoreError`] instead of silently
//!   ignoring them.
//!
//! - **Domain model** ([`model`]): `Device`, its closed `DeviceKind` /
//!   `ConnectionStatus` enums, and the access-control types (schedules,
//!   usage limits).
//!
//! Everything is synchronous and single-owner: the registry is a plain
//! value passed by `&mut`, never a global.

pub mod command;
pub mod error;
pub mod fixture;
pub mod model;
pub mod registry;
pub mod usage;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use error::CoreError;
pub use registry::{DeviceRegistry, NetworkSummary, RegistryOptions};
pub use usage::UsageEntry;

pub use model::{
    AccessControls, ConnectionStatus, Device, DeviceId, DeviceKind, DeviceState, MacAddress,
    Schedule, ScheduleKind, UsageLimit,
};
