//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` / `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wifidash_config::ConfigError;
use wifidash_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wifidash::not_found),
        help("Run: wifidash {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Device '{identifier}' is {state}")]
    #[diagnostic(code(wifidash::device_unavailable), help("{hint}"))]
    DeviceUnavailable {
        identifier: String,
        state: String,
        hint: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wifidash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Could not load configuration")]
    #[diagnostic(
        code(wifidash::config),
        help("Check the file at {path}, or regenerate it with: wifidash config init --force")
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Could not load device seed")]
    #[diagnostic(
        code(wifidash::seed),
        help("Seed files hold a `devices` list; see `wifidash devices list -o json` for the format.")
    )]
    Seed {
        #[source]
        source: ConfigError,
    },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(wifidash::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::DeviceUnavailable { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub(crate) fn device_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: "device".into(),
            identifier: identifier.into(),
            list_command: "devices list".into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DeviceNotFound { identifier } => CliError::device_not_found(identifier),

            CoreError::DuplicateDevice { id } => CliError::Validation {
                field: "seed".into(),
                reason: format!("device id '{id}' appears more than once"),
            },

            CoreError::DeviceOffline { identifier } => CliError::DeviceUnavailable {
                identifier,
                state: "offline".into(),
                hint: "Offline devices cannot be paused or blocked until they reconnect.".into(),
            },

            CoreError::DeviceBlocked { identifier } => CliError::DeviceUnavailable {
                hint: format!("Unblock it first: wifidash devices block {identifier}"),
                identifier,
                state: "blocked".into(),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl CliError {
    /// Wrap a config-file failure, keeping core errors in their own shape.
    pub(crate) fn from_config(err: ConfigError, path: &std::path::Path) -> Self {
        match err {
            ConfigError::Core(core) => core.into(),
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            source => CliError::Config {
                path: path.display().to_string(),
                source,
            },
        }
    }

    /// Wrap a seed-loading failure.
    pub(crate) fn from_seed(err: ConfigError) -> Self {
        match err {
            ConfigError::Core(core) => core.into(),
            source => CliError::Seed { source },
        }
    }
}
