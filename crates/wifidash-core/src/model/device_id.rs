// ── Core identity types ──
//
// DeviceId keys the registry; MacAddress is a secondary lookup and
// search key. Both are opaque strings supplied by the seed source.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

// ── DeviceId ────────────────────────────────────────────────────────

/// Stable identifier for a device, assigned by the seed source.
///
/// Implements `Borrow<str>` so the registry can be queried with a plain
/// `&str` without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── MacAddress ──────────────────────────────────────────────────────

/// Hardware address as reported by the seed source.
///
/// Kept verbatim for display; comparisons go through [`MacAddress::normalized`]
/// (lowercase, `-` folded to `:`), so `A1-B2-..` and `a1:b2:..` are equal
/// for lookup purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        normalize_mac(&self.0)
    }

    /// True if `other` names the same address, ignoring case and separator style.
    pub fn matches(&self, other: &str) -> bool {
        self.normalized() == normalize_mac(other)
    }
}

fn normalize_mac(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', ":")
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for MacAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
