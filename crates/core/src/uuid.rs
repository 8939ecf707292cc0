//! Record identifiers and sharded-path derivation.
//!
//! CardioScan stores each record under a directory derived from its UUID. To
//! keep path derivation deterministic everywhere, identifiers use a canonical
//! representation: **32 lowercase hexadecimal characters** (no hyphens), the
//! value produced by `Uuid::new_v4().simple()`.
//!
//! For a canonical id `u`, the record lives under
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`, which bounds per-directory fan-out.

use crate::error::{ReportError, ReportResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};
// Leading `::` keeps the external crate distinct from this module's path.
use ::uuid::Uuid;

/// A record identifier guaranteed to be in canonical 32-hex form.
///
/// Externally supplied identifiers (API paths, CLI arguments) must be
/// validated through [`ShardableUuid::parse`]; non-canonical values
/// (uppercase, hyphenated, wrong length) are rejected rather than normalised.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShardableUuid(Uuid);

impl ShardableUuid {
    /// Allocates a fresh identifier for a new record.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates an externally supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] if `input` is not exactly 32
    /// lowercase hex characters.
    pub fn parse(input: &str) -> ReportResult<Self> {
        if Self::is_canonical(input) {
            // is_canonical guarantees valid hex, so parse_str cannot fail
            let uuid = Uuid::parse_str(input).expect("canonical input parses as UUID");
            return Ok(Self(uuid));
        }
        Err(ReportError::InvalidInput(format!(
            "record id must be 32 lowercase hex characters without hyphens, got: '{input}'"
        )))
    }

    /// Returns true if `input` is already in canonical form.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns `parent_dir/<s1>/<s2>/<id>/` for this identifier.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        let s1 = &canonical[0..2];
        let s2 = &canonical[2..4];
        parent_dir.join(s1).join(s2).join(&canonical)
    }
}

impl Default for ShardableUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShardableUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for ShardableUuid {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShardableUuid::parse(s)
    }
}

impl serde::Serialize for ShardableUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0.simple())
    }
}

impl<'de> serde::Deserialize<'de> for ShardableUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ShardableUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
