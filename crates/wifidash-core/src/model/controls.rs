// ── Access control types ──
//
// Network-wide switches, scheduled access windows, and per-device
// usage limits. Schedules are evaluated against a wall-clock time;
// nothing here runs on a timer.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::device_id::DeviceId;
use crate::error::CoreError;

/// What a schedule does while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScheduleKind {
    /// Internet access disabled.
    Bedtime,
    /// Access limited to educational sites.
    Study,
}

/// A daily access window. `end` before `start` means the window spans midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ScheduleKind,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub enabled: bool,
}

impl Schedule {
    pub fn new(name: impl Into<String>, kind: ScheduleKind, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            start,
            end,
            enabled: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Whether the window covers `at`. Start is inclusive, end exclusive;
    /// equal start and end covers the whole day.
    pub fn is_active_at(&self, at: NaiveTime) -> bool {
        if !self.enabled {
            return false;
        }
        if self.start == self.end {
            return true;
        }
        if self.wraps_midnight() {
            at >= self.start || at < self.end
        } else {
            at >= self.start && at < self.end
        }
    }
}

/// Pause a device once its period usage reaches `limit_gb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLimit {
    pub device: DeviceId,
    pub limit_gb: f64,
}

impl UsageLimit {
    pub fn new(device: impl Into<DeviceId>, limit_gb: f64) -> Self {
        Self {
            device: device.into(),
            limit_gb,
        }
    }
}

/// Network-wide access settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessControls {
    /// Suspend internet for every connected device.
    #[serde(default)]
    pub pause_all: bool,
    /// Separate network for visitors.
    #[serde(default)]
    pub guest_network: bool,
    /// New connections require approval.
    #[serde(default)]
    pub auto_block_new: bool,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub usage_limits: Vec<UsageLimit>,
}

impl Default for AccessControls {
    fn default() -> Self {
        Self {
            pause_all: false,
            guest_network: false,
            auto_block_new: false,
            schedules: default_schedules(),
            usage_limits: Vec::new(),
        }
    }
}

fn default_schedules() -> Vec<Schedule> {
    // Both bounds are valid wall-clock times, so `from_hms_opt` cannot miss.
    let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
    vec![
        Schedule::new("Bedtime Mode", ScheduleKind::Bedtime, at(22, 0), at(7, 0))
            .with_description("Disable internet access during sleeping hours"),
        Schedule::new("Study Time", ScheduleKind::Study, at(15, 0), at(18, 0))
            .with_description("Limit access to educational sites only"),
    ]
}

impl AccessControls {
    pub fn active_schedules(&self, at: NaiveTime) -> Vec<&Schedule> {
        self.schedules.iter().filter(|s| s.is_active_at(at)).collect()
    }

    pub fn limit_for(&self, device: &str) -> Option<f64> {
        self.usage_limits
            .iter()
            .find(|l| l.device.as_str() == device)
            .map(|l| l.limit_gb)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        for schedule in &self.schedules {
            if schedule.name.trim().is_empty() {
                return Err(CoreError::validation("schedule name must not be empty"));
            }
        }
        for limit in &self.usage_limits {
            if !(limit.limit_gb.is_finite() && limit.limit_gb > 0.0) {
                return Err(CoreError::validation(format!(
                    "usage limit for device {} must be a positive number of GB, got {}",
                    limit.device, limit.limit_gb
                )));
            }
        }
        Ok(())
    }
}

/// `HH:MM` serde format for schedule bounds.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid time '{raw}' (expected HH:MM): {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn disabled_schedule_never_active() {
        let s = Schedule::new("Study", ScheduleKind::Study, t(15, 0), t(18, 0));
        assert!(!s.is_active_at(t(16, 0)));
    }

    #[test]
    fn daytime_window_is_half_open() {
        let s = Schedule::new("Study", ScheduleKind::Study, t(15, 0), t(18, 0)).enabled(true);
        assert!(!s.is_active_at(t(14, 59)));
        assert!(s.is_active_at(t(15, 0)));
        assert!(s.is_active_at(t(17, 59)));
        assert!(!s.is_active_at(t(18, 0)));
    }

    #[test]
    fn overnight_window_wraps_midnight() {
        let s = Schedule::new("Bedtime", ScheduleKind::Bedtime, t(22, 0), t(7, 0)).enabled(true);
        assert!(s.wraps_midnight());
        assert!(s.is_active_at(t(23, 30)));
        assert!(s.is_active_at(t(0, 0)));
        assert!(s.is_active_at(t(6, 59)));
        assert!(!s.is_active_at(t(7, 0)));
        assert!(!s.is_active_at(t(12, 0)));
    }

    #[test]
    fn equal_bounds_cover_whole_day() {
        let s = Schedule::new("Always", ScheduleKind::Bedtime, t(9, 0), t(9, 0)).enabled(true);
        assert!(s.is_active_at(t(3, 0)));
        assert!(s.is_active_at(t(21, 0)));
    }

    #[test]
    fn defaults_match_controls_screen() {
        let controls = AccessControls::default();
        assert!(!controls.pause_all);
        assert!(!controls.guest_network);
        assert!(!controls.auto_block_new);
        assert_eq!(controls.schedules.len(), 2);
        assert_eq!(controls.schedules[0].start, t(22, 0));
        assert_eq!(controls.schedules[1].end, t(18, 0));
        assert!(controls.usage_limits.is_empty());
        assert!(controls.active_schedules(t(23, 0)).is_empty());
    }

    #[test]
    fn validate_rejects_non_positive_limits() {
        let mut controls = AccessControls::default();
        controls.usage_limits.push(UsageLimit::new("1", 0.0));
        assert!(matches!(controls.validate(), Err(CoreError::ValidationFailed { .. })));

        controls.usage_limits[0].limit_gb = 2.5;
        assert!(controls.validate().is_ok());
        assert_eq!(controls.limit_for("1"), Some(2.5));
    }

    #[test]
    fn schedule_times_serialize_as_hhmm() {
        let s = Schedule::new("Study", ScheduleKind::Study, t(15, 0), t(18, 30));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["start"], "15:00");
        assert_eq!(json["end"], "18:30");
        assert_eq!(json["kind"], "study");

        let back: Schedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn bad_time_is_rejected() {
        let json = r#"{"name":"x","kind":"study","start":"25:00","end":"18:00"}"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }
}
