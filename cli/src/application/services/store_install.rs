//! Application service: install one app from a store.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::{Duration, Instant};

use crate::application::ports::{DeviceSession, ProgressReporter};
use crate::domain::device::{
    INSTALLER_CONFIRM_BUTTON, PACKAGE_INSTALLER_MARKER, VIEW_ACTION, market_details_uri,
};
use crate::domain::{AppEntry, DeviceError, IntentLaunch, Locator, SourceDescriptor, TimeoutConfig};

/// Whether the OS package installer asks for confirmation after the store
/// hands over the download.
///
/// Only the system store installs silently. Any other store triggers the
/// installer prompt, which cannot be bypassed without root, so it has to be
/// waited for and confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Silent,
    Interactive,
}

/// Budget for the confirmation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreInstallOptions {
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for StoreInstallOptions {
    fn default() -> Self {
        Self::from(&TimeoutConfig::default())
    }
}

impl From<&TimeoutConfig> for StoreInstallOptions {
    fn from(timeouts: &TimeoutConfig) -> Self {
        Self {
            confirm_timeout: timeouts.confirm_wait(),
            poll_interval: timeouts.poll_interval(),
        }
    }
}

/// Result of one store install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Install button clicked; the store finishes in the background.
    Triggered,
    /// The package installer prompt appeared and was confirmed.
    Confirmed,
    /// The prompt did not appear within the budget.
    TimedOut,
    /// A device operation failed; the batch goes on.
    Failed(DeviceError),
}

impl StoreOutcome {
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Triggered | Self::Confirmed)
    }
}

/// Install `app` through the store described by `descriptor`.
///
/// Every per-app failure is contained and returned as an unsuccessful
/// `StoreOutcome`.
///
/// # Errors
///
/// Returns an error only when the session itself is lost.
pub fn install_from_store(
    session: &impl DeviceSession,
    reporter: &impl ProgressReporter,
    descriptor: &SourceDescriptor,
    app: &AppEntry,
    confirmation: Confirmation,
    opts: StoreInstallOptions,
) -> Result<StoreOutcome, DeviceError> {
    reporter.step(&format!("installing '{}' from {}...", app.label, app.source));

    let outcome = match attempt(session, descriptor, app, confirmation, opts) {
        Ok(outcome) => outcome,
        Err(e) if e.is_session_level() => return Err(e),
        Err(e) => StoreOutcome::Failed(e),
    };

    match &outcome {
        StoreOutcome::Triggered => {
            reporter.success(&format!("'{}' queued by {}", app.label, app.source));
        }
        StoreOutcome::Confirmed => reporter.success(&format!("'{}' installed", app.label)),
        StoreOutcome::TimedOut => {
            tracing::warn!(label = %app.label, source = %app.source, "installer prompt timed out");
            reporter.warn(&format!(
                "'{}' from {} was not installed: timed out after {}s waiting for the installer",
                app.label,
                app.source,
                opts.confirm_timeout.as_secs()
            ));
        }
        StoreOutcome::Failed(e) => {
            tracing::warn!(label = %app.label, source = %app.source, error = %e, "store install failed");
            reporter.warn(&format!(
                "'{}' from {} was not installed: {e}",
                app.label, app.source
            ));
        }
    }
    Ok(outcome)
}

fn attempt(
    session: &impl DeviceSession,
    descriptor: &SourceDescriptor,
    app: &AppEntry,
    confirmation: Confirmation,
    opts: StoreInstallOptions,
) -> Result<StoreOutcome, DeviceError> {
    session.launch_with_intent(&IntentLaunch {
        package: &descriptor.host_package,
        activity: &descriptor.entry_activity,
        action: VIEW_ACTION,
        data_uri: market_details_uri(&app.package_name),
        stop_app: false,
    })?;

    let trigger = session.find_element(&descriptor.install_trigger)?;
    session.click(&trigger)?;

    match confirmation {
        Confirmation::Silent => Ok(StoreOutcome::Triggered),
        Confirmation::Interactive => {
            if !wait_for_package_installer(session, opts)? {
                return Ok(StoreOutcome::TimedOut);
            }
            let confirm = session.find_element(&Locator::id(INSTALLER_CONFIRM_BUTTON))?;
            session.click(&confirm)?;
            Ok(StoreOutcome::Confirmed)
        }
    }
}

/// Poll the foreground activity until the package installer shows up.
///
/// Checks once immediately, then every `poll_interval` until
/// `confirm_timeout` has elapsed. Returns `false` on timeout.
///
/// # Errors
///
/// Returns an error if querying the foreground activity fails.
pub fn wait_for_package_installer(
    session: &impl DeviceSession,
    opts: StoreInstallOptions,
) -> Result<bool, DeviceError> {
    // `None` when the timeout is too large to represent: wait without a deadline.
    let deadline = Instant::now().checked_add(opts.confirm_timeout);
    loop {
        let activity = session.current_activity()?;
        tracing::debug!(%activity, "foreground activity");
        if activity.contains(PACKAGE_INSTALLER_MARKER) {
            return Ok(true);
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(false);
                }
                opts.poll_interval.min(deadline - now)
            }
            None => opts.poll_interval,
        };
        std::thread::sleep(pause);
    }
}
