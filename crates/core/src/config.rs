//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services. The intent is to avoid reading process-wide environment variables
//! during request handling, which leads to inconsistent behaviour in
//! multi-threaded runtimes and test harnesses.

use crate::constants::{REPORTS_DIR_NAME, USERS_DIR_NAME};
use crate::error::{ReportError, ReportResult};
use std::path::{Path, PathBuf};

/// Default access-token lifetime when none is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` if the JWT secret is empty or the
    /// token lifetime is not positive.
    pub fn new(
        data_dir: PathBuf,
        jwt_secret: String,
        token_ttl_hours: i64,
    ) -> ReportResult<Self> {
        if jwt_secret.trim().is_empty() {
            return Err(ReportError::InvalidInput(
                "jwt_secret cannot be empty".into(),
            ));
        }
        if token_ttl_hours <= 0 {
            return Err(ReportError::InvalidInput(
                "token_ttl_hours must be positive".into(),
            ));
        }

        Ok(Self {
            data_dir,
            jwt_secret,
            token_ttl_hours,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join(REPORTS_DIR_NAME)
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join(USERS_DIR_NAME)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn token_ttl_hours(&self) -> i64 {
        self.token_ttl_hours
    }
}

/// Parse the token lifetime from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the default lifetime is used.
///
/// # Errors
///
/// Returns `ReportError::InvalidInput` if the value is present but does not
/// parse to a positive integer number of hours.
pub fn token_ttl_hours_from_env_value(value: Option<String>) -> ReportResult<i64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(raw) = value else {
        return Ok(DEFAULT_TOKEN_TTL_HOURS);
    };

    let parsed: i64 = raw.parse().map_err(|_| {
        ReportError::InvalidInput(format!("invalid token TTL '{raw}': expected hours"))
    })?;
    if parsed <= 0 {
        return Err(ReportError::InvalidInput(
            "token TTL must be a positive number of hours".into(),
        ));
    }
    Ok(parsed)
}
