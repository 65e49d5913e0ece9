// ── Command API ──
//
// Hardened mutation path. Where the plain registry transitions silently
// ignore unknown ids and empty names, `execute` reports them, and (when
// `RegistryOptions::enforce_preconditions` is on) refuses the toggles a
// UI would have disabled.

use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Device, DeviceId, UsageLimit};
use crate::registry::DeviceRegistry;

/// All write operations against a device registry.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Single-device operations ─────────────────────────────────────
    TogglePause { id: DeviceId },
    ToggleBlock { id: DeviceId },
    Rename { id: DeviceId, name: String },

    // ── Bulk operations ──────────────────────────────────────────────
    SetPauseAll { paused: bool },
    EnforceUsageLimits { limits: Vec<UsageLimit> },
}

/// Outcome of a successful command.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    /// The device after the change.
    Device(Device),
    /// Ids touched by a bulk command, in seed order.
    Affected(Vec<DeviceId>),
}

impl DeviceRegistry {
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CoreError> {
        debug!(?command, "executing command");
        let enforce = self.options().enforce_preconditions;

        match command {
            Command::TogglePause { id } => {
                let device = self.require(&id)?;
                if enforce {
                    if !device.is_online() {
                        return Err(CoreError::DeviceOffline {
                            identifier: id.to_string(),
                        });
                    }
                    if device.blocked {
                        return Err(CoreError::DeviceBlocked {
                            identifier: id.to_string(),
                        });
                    }
                }
                self.toggle_pause(id.as_str());
                self.snapshot(&id)
            }

            Command::ToggleBlock { id } => {
                let device = self.require(&id)?;
                if enforce && !device.is_online() {
                    return Err(CoreError::DeviceOffline {
                        identifier: id.to_string(),
                    });
                }
                self.toggle_block(id.as_str());
                self.snapshot(&id)
            }

            Command::Rename { id, name } => {
                self.require(&id)?;
                if name.trim().is_empty() {
                    return Err(CoreError::validation("device name must not be empty"));
                }
                self.rename(id.as_str(), &name);
                self.snapshot(&id)
            }

            Command::SetPauseAll { paused } => Ok(CommandResult::Affected(self.set_pause_all(paused))),

            Command::EnforceUsageLimits { limits } => {
                for limit in &limits {
                    self.require(&limit.device)?;
                }
                Ok(CommandResult::Affected(self.enforce_usage_limits(&limits)))
            }
        }
    }

    fn require(&self, id: &DeviceId) -> Result<&Device, CoreError> {
        self.get(id.as_str()).ok_or_else(|| CoreError::not_found(id.as_str()))
    }

    fn snapshot(&self, id: &DeviceId) -> Result<CommandResult, CoreError> {
        self.require(id).map(|d| CommandResult::Device(d.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::RegistryOptions;

    fn pause(id: &str) -> Command {
        Command::TogglePause { id: id.into() }
    }

    fn block(id: &str) -> Command {
        Command::ToggleBlock { id: id.into() }
    }

    fn device(result: CommandResult) -> Device {
        match result {
            CommandResult::Device(d) => d,
            CommandResult::Affected(ids) => panic!("expected a device, got {ids:?}"),
        }
    }

    #[test]
    fn pause_returns_updated_device() {
        let mut reg = DeviceRegistry::demo();
        let d = device(reg.execute(pause("2")).unwrap());
        assert!(d.paused);
        assert!(reg.get("2").unwrap().paused);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut reg = DeviceRegistry::demo();
        let err = reg.execute(block("99")).unwrap_err();
        assert!(matches!(err, CoreError::DeviceNotFound { identifier } if identifier == "99"));
    }

    #[test]
    fn empty_rename_is_invalid_and_leaves_name() {
        let mut reg = DeviceRegistry::demo();
        let err = reg
            .execute(Command::Rename {
                id: "1".into(),
                name: "   ".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
        assert_eq!(reg.get("1").unwrap().name, "John's iPhone");
    }

    #[test]
    fn rename_unknown_device_reports_not_found_first() {
        let mut reg = DeviceRegistry::demo();
        let err = reg
            .execute(Command::Rename {
                id: "99".into(),
                name: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::DeviceNotFound { .. }));
    }

    #[test]
    fn offline_devices_refuse_toggles() {
        let mut reg = DeviceRegistry::demo();
        assert!(matches!(reg.execute(pause("6")), Err(CoreError::DeviceOffline { .. })));
        assert!(matches!(reg.execute(block("7")), Err(CoreError::DeviceOffline { .. })));
        assert!(!reg.get("6").unwrap().paused);
        assert!(!reg.get("7").unwrap().blocked);
    }

    #[test]
    fn blocked_device_refuses_pause() {
        let mut reg = DeviceRegistry::demo();
        reg.execute(block("1")).unwrap();
        assert!(matches!(reg.execute(pause("1")), Err(CoreError::DeviceBlocked { .. })));
    }

    #[test]
    fn lenient_options_match_plain_transitions() {
        let mut reg = DeviceRegistry::demo();
        reg.set_options(RegistryOptions {
            enforce_preconditions: false,
        });
        let d = device(reg.execute(pause("6")).unwrap());
        assert!(d.paused);

        let d = device(reg.execute(block("6")).unwrap());
        assert!(d.blocked);
        assert!(!d.paused);
    }

    #[test]
    fn usage_limits_require_known_devices() {
        let mut reg = DeviceRegistry::demo();
        let err = reg
            .execute(Command::EnforceUsageLimits {
                limits: vec![UsageLimit::new("ghost", 1.0)],
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::DeviceNotFound { .. }));

        let result = reg
            .execute(Command::EnforceUsageLimits {
                limits: vec![UsageLimit::new("2", 8.0)],
            })
            .unwrap();
        assert!(matches!(result, CommandResult::Affected(ids) if ids == vec![DeviceId::from("2")]));
    }

    #[test]
    fn pause_all_reports_affected() {
        let mut reg = DeviceRegistry::demo();
        let result = reg.execute(Command::SetPauseAll { paused: true }).unwrap();
        match result {
            CommandResult::Affected(ids) => assert_eq!(ids.len(), 5),
            CommandResult::Device(d) => panic!("unexpected device {d:?}"),
        }
    }
}
