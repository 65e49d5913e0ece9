// ── Core error types ──
//
// Raised only by the hardened paths: registry construction and
// `DeviceRegistry::execute`. The mock-parity transitions never fail.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Duplicate device id in seed: {id}")]
    DuplicateDevice { id: String },

    // ── Precondition errors ──────────────────────────────────────────
    #[error("Device {identifier} is offline")]
    DeviceOffline { identifier: String },

    #[error("Device {identifier} is blocked")]
    DeviceBlocked { identifier: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

impl CoreError {
    pub(crate) fn not_found(identifier: impl Into<String>) -> Self {
        Self::DeviceNotFound {
            identifier: identifier.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}
