//! Shared configuration for wifidash.
//!
//! TOML config file + `WIFIDASH_*` environment overrides, device seed
//! files, and translation to a ready-to-use `wifidash_core::DeviceRegistry`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use wifidash_core::{AccessControls, CoreError, Device, DeviceRegistry, RegistryOptions};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to parse seed file {path}: {reason}")]
    SeedParse { path: PathBuf, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Device seed file. The built-in demo household is used when unset.
    pub seed: Option<PathBuf>,

    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Command-path behaviour.
    #[serde(default)]
    pub registry: RegistryOptions,

    /// Access controls shown and enforced by the CLI.
    #[serde(default)]
    pub controls: AccessControls,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        const OUTPUTS: [&str; 5] = ["table", "json", "json-compact", "yaml", "plain"];
        const COLORS: [&str; 3] = ["auto", "always", "never"];

        if !OUTPUTS.contains(&self.defaults.output.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.output".into(),
                reason: format!("expected one of {}, got '{}'", OUTPUTS.join(", "), self.defaults.output),
            });
        }
        if !COLORS.contains(&self.defaults.color.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.color".into(),
                reason: format!("expected one of {}, got '{}'", COLORS.join(", "), self.defaults.color),
            });
        }
        self.controls.validate().map_err(|e| ConfigError::Validation {
            field: "controls".into(),
            reason: e.to_string(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wifidash", "wifidash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wifidash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load Config from a file + `WIFIDASH_*` environment overrides.
///
/// A missing file is not an error: defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WIFIDASH_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_config(cfg)?)?;
    debug!(path = %path.display(), "configuration saved");
    Ok(())
}

/// Render config as the TOML that `save_config_to` would write.
pub fn render_config(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Seed files ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
struct SeedFile {
    #[serde(default)]
    devices: Vec<Device>,
}

/// Read an ordered device list. `.json` files are parsed as JSON,
/// everything else as TOML (`[[devices]]` tables).
pub fn load_seed(path: &Path) -> Result<Vec<Device>, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parse_err = |reason: String| ConfigError::SeedParse {
        path: path.to_path_buf(),
        reason,
    };
    let seed: SeedFile = if is_json {
        serde_json::from_str(&contents).map_err(|e| parse_err(e.to_string()))?
    } else {
        toml::from_str(&contents).map_err(|e| parse_err(e.to_string()))?
    };
    debug!(path = %path.display(), count = seed.devices.len(), "seed file loaded");
    Ok(seed.devices)
}

/// Write a device list in the seed format matching the file extension.
pub fn save_seed(devices: &[Device], path: &Path) -> Result<(), ConfigError> {
    let seed = SeedFile {
        devices: devices.to_vec(),
    };
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let body = if is_json {
        serde_json::to_string_pretty(&seed).map_err(|e| ConfigError::SeedParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        toml::to_string_pretty(&seed)?
    };
    std::fs::write(path, body)?;
    Ok(())
}

// ── Registry construction ───────────────────────────────────────────

/// Build the session registry: `seed_override` wins over `cfg.seed`,
/// and with neither the demo household is used. The `pause_all` switch
/// pauses every connected device up front.
pub fn build_registry(cfg: &Config, seed_override: Option<&Path>) -> Result<DeviceRegistry, ConfigError> {
    let mut registry = match seed_override.or(cfg.seed.as_deref()) {
        Some(path) => DeviceRegistry::with_options(load_seed(path)?, cfg.registry)?,
        None => DeviceRegistry::demo(),
    };
    registry.set_options(cfg.registry);
    if cfg.controls.pause_all {
        let paused = registry.set_pause_all(true);
        debug!(count = paused.len(), "pause_all switch applied to seed");
    }
    Ok(registry)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.defaults.output, "table");
        assert!(cfg.registry.enforce_preconditions);
        assert_eq!(cfg.controls.schedules.len(), 2);
    }

    #[test]
    fn file_overrides_controls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "config.toml",
            r#"
[registry]
enforce_preconditions = false

[controls]
guest_network = true

[[controls.schedules]]
name = "Homework"
kind = "study"
start = "16:00"
end = "17:30"
enabled = true

[[controls.usage_limits]]
device = "3"
limit_gb = 10.0
"#,
        );
        let cfg = load_config_from(&path).unwrap();
        assert!(!cfg.registry.enforce_preconditions);
        assert!(cfg.controls.guest_network);
        assert_eq!(cfg.controls.schedules.len(), 1);
        assert_eq!(cfg.controls.schedules[0].name, "Homework");
        assert_eq!(cfg.controls.limit_for("3"), Some(10.0));
    }

    #[test]
    fn invalid_limit_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "config.toml",
            "[[controls.usage_limits]]\ndevice = \"1\"\nlimit_gb = -2.0\n",
        );
        assert!(matches!(load_config_from(&path), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn unknown_output_default_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "config.toml", "[defaults]\noutput = \"xml\"\n");
        match load_config_from(&path) {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "defaults.output"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.controls.auto_block_new = true;
        cfg.defaults.output = "json".into();
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.controls.auto_block_new);
        assert_eq!(loaded.defaults.output, "json");
        assert_eq!(loaded.controls.schedules, cfg.controls.schedules);
    }

    #[test]
    fn toml_seed_loads_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "devices.toml",
            r#"
[[devices]]
id = "a"
name = "Office Printer"
mac = "00:11:22:33:44:55"
ip = "10.0.0.20"
type = "unknown"
status = "online"
dataUsed = 0.4

[[devices]]
id = "b"
name = "Den TV"
mac = "66:77:88:99:AA:BB"
ip = "10.0.0.21"
type = "tv"
status = "offline"
dataUsed = 2.0
lastSeen = "Yesterday"
"#,
        );
        let devices = load_seed(&path).unwrap();
        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Office Printer", "Den TV"]);
        assert_eq!(devices[1].last_seen, "Yesterday");
    }

    #[test]
    fn json_seed_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "devices.json",
            r#"{"devices":[{"id":"1","name":"Phone","mac":"aa","ip":"10.0.0.2",
                "type":"smartphone","status":"online","paused":true,"dataUsed":1.0}]}"#,
        );
        let devices = load_seed(&path).unwrap();
        assert_eq!(devices.len(), 1);
        assert!(devices[0].paused);
    }

    #[test]
    fn malformed_seed_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.json", "{ not json");
        match load_seed(&path) {
            Err(ConfigError::SeedParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected SeedParse, got {other:?}"),
        }
    }

    #[test]
    fn build_registry_prefers_override() {
        let dir = tempfile::tempdir().unwrap();
        let seed = wifidash_core::fixture::demo_devices().into_iter().take(2).collect::<Vec<_>>();
        let path = dir.path().join("two.toml");
        save_seed(&seed, &path).unwrap();

        let cfg = Config::default();
        assert_eq!(build_registry(&cfg, None).unwrap().len(), 7);
        assert_eq!(build_registry(&cfg, Some(&path)).unwrap().len(), 2);
    }

    #[test]
    fn pause_all_switch_pauses_connected_devices() {
        let mut cfg = Config::default();
        cfg.controls.pause_all = true;
        let registry = build_registry(&cfg, None).unwrap();
        assert_eq!(registry.paused_count(), 5);
        assert!(!registry.get("6").unwrap().paused, "offline devices are left alone");
    }

    #[test]
    fn build_registry_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut seed = wifidash_core::fixture::demo_devices();
        seed.truncate(1);
        seed.push(seed[0].clone());
        let path = dir.path().join("dup.json");
        save_seed(&seed, &path).unwrap();

        let err = build_registry(&Config::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Core(CoreError::DuplicateDevice { .. })));
    }
}
