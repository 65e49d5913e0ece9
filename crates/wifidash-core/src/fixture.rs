// ── Built-in demo devices ──
//
// The seven-device household used when no seed file is configured.

use crate::model::{ConnectionStatus, Device, DeviceKind};

/// The demo household, in display order.
pub fn demo_devices() -> Vec<Device> {
    vec![
        Device::new("1", "John's iPhone", "A1:B2:C3:D4:E5:F6", "192.168.1.101", DeviceKind::Smartphone)
            .with_usage(1.7),
        Device::new("2", "Living Room TV", "G7:H8:I9:J0:K1:L2", "192.168.1.102", DeviceKind::Tv)
            .with_usage(8.2),
        Device::new("3", "Gaming PC", "M3:N4:O5:P6:Q7:R8", "192.168.1.103", DeviceKind::Laptop)
            .with_usage(12.5),
        Device::new("4", "Sarah's iPad", "S9:T0:U1:V2:W3:X4", "192.168.1.104", DeviceKind::Smartphone)
            .with_usage(3.8),
        Device::new("5", "Unknown Device", "Y5:Z6:A7:B8:C9:D0", "192.168.1.105", DeviceKind::Unknown)
            .with_usage(0.3),
        Device::new("6", "Work Laptop", "E1:F2:G3:H4:I5:J6", "192.168.1.106", DeviceKind::Laptop)
            .with_status(ConnectionStatus::Offline)
            .with_usage(5.1)
            .with_last_seen("2 hours ago"),
        Device::new("7", "Nintendo Switch", "K7:L8:M9:N0:O1:P2", "192.168.1.107", DeviceKind::Game)
            .with_status(ConnectionStatus::Offline)
            .with_usage(4.3)
            .with_last_seen("3 hours ago"),
    ]
}
