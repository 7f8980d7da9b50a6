//! Domain types and validators for installer configuration.
//!
//! Pure data and validation, no I/O.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Appium endpoint used when neither flag, environment nor file sets one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4723/";

/// Directory scanned for local package files, relative to the working directory.
pub const DEFAULT_LOCAL_DIR: &str = "local";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration, optionally stored as YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Base URL of the automation server.
    pub endpoint: String,
    /// Directory of pre-staged package files.
    pub local_dir: PathBuf,
    pub timeouts: TimeoutConfig,
    pub session: SessionConfig,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            local_dir: PathBuf::from(DEFAULT_LOCAL_DIR),
            timeouts: TimeoutConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Wait budgets, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Budget for reaching the endpoint and creating the session.
    pub connect_secs: u64,
    /// Implicit wait applied to every element lookup.
    pub implicit_wait_secs: u64,
    /// How long to wait for the package installer prompt.
    pub confirm_wait_secs: u64,
    /// Interval between foreground-activity checks.
    pub poll_interval_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 180,
            implicit_wait_secs: 5,
            confirm_wait_secs: 60,
            poll_interval_secs: 1,
        }
    }
}

impl TimeoutConfig {
    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    #[must_use]
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    #[must_use]
    pub fn confirm_wait(&self) -> Duration {
        Duration::from_secs(self.confirm_wait_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Capabilities requested when the session is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub platform_name: String,
    pub automation_name: String,
    /// Keep app data between sessions.
    pub no_reset: bool,
    /// Serial of the device to drive when several are connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            platform_name: "Android".to_string(),
            automation_name: "UiAutomator2".to_string(),
            no_reset: true,
            device_id: None,
        }
    }
}

impl SessionConfig {
    /// W3C `capabilities` object for `POST /session`.
    #[must_use]
    pub fn capabilities(&self) -> Value {
        let mut always = Map::new();
        always.insert("platformName".into(), json!(self.platform_name));
        always.insert("appium:automationName".into(), json!(self.automation_name));
        always.insert("appium:noReset".into(), json!(self.no_reset));
        if let Some(udid) = &self.device_id {
            always.insert("appium:udid".into(), json!(udid));
        }
        json!({
            "capabilities": {
                "alwaysMatch": Value::Object(always),
                "firstMatch": [{}],
            }
        })
    }
}

// ── Overrides ────────────────────────────────────────────────────────────────

/// Values taken from flags and environment; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub device_id: Option<String>,
    pub local_dir: Option<PathBuf>,
    pub connect_secs: Option<u64>,
    pub implicit_wait_secs: Option<u64>,
    pub confirm_wait_secs: Option<u64>,
}

impl InstallerConfig {
    /// Apply overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if overrides.device_id.is_some() {
            self.session.device_id = overrides.device_id;
        }
        if let Some(dir) = overrides.local_dir {
            self.local_dir = dir;
        }
        if let Some(secs) = overrides.connect_secs {
            self.timeouts.connect_secs = secs;
        }
        if let Some(secs) = overrides.implicit_wait_secs {
            self.timeouts.implicit_wait_secs = secs;
        }
        if let Some(secs) = overrides.confirm_wait_secs {
            self.timeouts.confirm_wait_secs = secs;
        }
        self
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP(S) URL or a timeout
    /// that must be positive is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let has_scheme = endpoint.starts_with("http://") || endpoint.starts_with("https://");
        if !has_scheme || endpoint.ends_with("://") {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.timeouts.connect_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeouts.connect_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.timeouts.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeouts.poll_interval_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
