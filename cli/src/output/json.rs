//! JSON output helpers.
//!
//! The summary object printed by `--json` runs, and the error object printed
//! when a `--json` run fails.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::install_apps::InstallRun;
use crate::domain::{ConfigError, DeviceError, InputError, LocalInstallReport, SourceTally};

/// Machine-readable run summary.
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub sources: Vec<SourceTally>,
    pub local: LocalInstallReport,
    pub skipped_entries: usize,
    pub finished_at: DateTime<Utc>,
}

/// Renders run results as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Build the summary object for a finished run.
    #[must_use]
    pub fn summary(run: &InstallRun, skipped_entries: usize) -> SummaryOutput {
        SummaryOutput {
            sources: run.counters.tallies(),
            local: run.local,
            skipped_entries,
            finished_at: Utc::now(),
        }
    }

    /// Print the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_summary(run: &InstallRun, skipped_entries: usize) -> Result<()> {
        let out = serde_json::to_string_pretty(&Self::summary(run, skipped_entries))
            .context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for a failed run.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(device) = err.downcast_ref::<DeviceError>() {
        return match device {
            DeviceError::Connection { .. } => "CONNECTION",
            DeviceError::SessionLost(_) => "SESSION_LOST",
            DeviceError::ElementNotFound { .. } | DeviceError::Automation(_) => "DEVICE",
        };
    }
    if err.downcast_ref::<InputError>().is_some() {
        return "INPUT";
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "CONFIG";
    }
    "ERROR"
}
