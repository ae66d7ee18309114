//! Process-wide settings for the host time-zone check.
//!
//! Jalali dates are normally read in Iran's local time. Constructors that
//! use the host's local zone compare it with the configured zone and log a
//! warning on mismatch; the conversion itself never depends on it.

use crate::consts::DEFAULT_TIME_ZONE;
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::{debug, warn};

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::new()));

/// Settings for the host time-zone check.
///
/// # Example
///
/// ```
/// use jalali_moment::config::{self, Config};
///
/// config::set(Config::new().with_check_time_zone(false));
/// assert!(!config::get().check_time_zone());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    check_time_zone: bool,
    time_zone:       String,
}

impl Config {
    /// Creates a configuration with defaults: check enabled, target `Asia/Tehran`.
    pub fn new() -> Self {
        Self {
            check_time_zone: true,
            time_zone:       DEFAULT_TIME_ZONE.to_owned(),
        }
    }

    /// Enables or disables the host time-zone check.
    pub fn with_check_time_zone(mut self, check: bool) -> Self {
        self.check_time_zone = check;
        self
    }

    /// Sets the IANA name the host zone is expected to match.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    pub const fn check_time_zone(&self) -> bool {
        self.check_time_zone
    }

    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces the process-wide configuration.
pub fn set(config: Config) {
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Returns a copy of the process-wide configuration.
pub fn get() -> Config {
    CONFIG.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Warns when the host zone differs from the configured one.
///
/// Returns whether the zones matched; `None` when the check is disabled or
/// the host zone cannot be determined.
pub(crate) fn check_host_time_zone() -> Option<bool> {
    let config = get();
    if !config.check_time_zone() {
        return None;
    }

    let host = match iana_time_zone::get_timezone() {
        Ok(host) => host,
        Err(err) => {
            debug!(error = %err, "could not determine host time zone");
            return None;
        },
    };

    let matches = host == config.time_zone();
    if !matches {
        warn!(
            host = %host,
            expected = %config.time_zone(),
            "host time zone differs from the configured zone; wall-clock fields and timestamps may be unexpected"
        );
    }
    Some(matches)
}
