//! Application service: install an app list, source by source.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{DeviceSession, PackageDirectory, ProgressReporter};
use crate::application::services::local_install::install_local;
use crate::application::services::store_install::{
    Confirmation, StoreInstallOptions, install_from_store,
};
use crate::domain::{AppEntry, AppSource, InstallCounters, LocalInstallReport, SourceCatalog};

/// Options for one `install_apps` run.
pub struct InstallOptions<'a> {
    /// Directory of pre-staged package files.
    pub local_dir: &'a Path,
    pub store: StoreInstallOptions,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallRun {
    pub counters: InstallCounters,
    pub local: LocalInstallReport,
}

/// Install local packages, then every app in `apps` in order.
///
/// Each entry counts one attempt for its source, and one install when it
/// succeeds. Individual failures never stop the batch.
///
/// # Errors
///
/// Returns an error if the device session is lost, or if a store source has
/// no catalog descriptor.
pub fn install_apps(
    session: &impl DeviceSession,
    catalog: &SourceCatalog,
    directory: &impl PackageDirectory,
    reporter: &impl ProgressReporter,
    apps: &[AppEntry],
    opts: &InstallOptions<'_>,
) -> Result<InstallRun> {
    let local = install_local(session, directory, reporter, opts.local_dir)?;

    let mut counters = InstallCounters::new();
    for app in apps {
        let installed = match app.source {
            AppSource::GooglePlay => {
                from_store(session, catalog, reporter, app, Confirmation::Silent, opts.store)?
            }
            AppSource::RuStore | AppSource::Droidify => {
                from_store(session, catalog, reporter, app, Confirmation::Interactive, opts.store)?
            }
            AppSource::Local => verify_local(session, reporter, app)?,
        };
        counters.record(app.source, installed);
    }

    Ok(InstallRun { counters, local })
}

fn from_store(
    session: &impl DeviceSession,
    catalog: &SourceCatalog,
    reporter: &impl ProgressReporter,
    app: &AppEntry,
    confirmation: Confirmation,
    opts: StoreInstallOptions,
) -> Result<bool> {
    let descriptor = catalog.descriptor(app.source)?;
    let outcome = install_from_store(session, reporter, descriptor, app, confirmation, opts)?;
    Ok(outcome.is_installed())
}

/// Local entries were installed by the local pass or earlier; only check.
/// An entry that was never staged counts as a failed attempt.
fn verify_local(
    session: &impl DeviceSession,
    reporter: &impl ProgressReporter,
    app: &AppEntry,
) -> Result<bool> {
    match session.is_app_installed(&app.package_name) {
        Ok(true) => {
            reporter.success(&format!("'{}' is installed", app.label));
            Ok(true)
        }
        Ok(false) => {
            reporter.warn(&format!(
                "'{}' ({}) is not installed and was not found among local packages",
                app.label, app.package_name
            ));
            Ok(false)
        }
        Err(e) if e.is_session_level() => Err(e.into()),
        Err(e) => {
            tracing::warn!(label = %app.label, error = %e, "cannot check local app");
            reporter.warn(&format!("cannot check '{}': {e}", app.label));
            Ok(false)
        }
    }
}
