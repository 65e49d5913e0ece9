// ── Domain model ──

pub mod controls;
pub mod device;
pub mod device_id;

pub use controls::{AccessControls, Schedule, ScheduleKind, UsageLimit};
pub use device::{ConnectionStatus, Device, DeviceKind, DeviceState};
pub use device_id::{DeviceId, MacAddress};
