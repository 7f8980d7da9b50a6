//! Application service: install pre-staged local package files.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{DeviceSession, PackageDirectory, ProgressReporter};
use crate::domain::local_package::{is_package_file, package_name_from_file_name};
use crate::domain::{DeviceError, LocalInstallReport};

/// Install every package file in `dir` whose app is not on the device yet.
///
/// A missing directory is not an error. Already installed apps are never
/// overwritten. Files without a package identifier in their name, and files
/// whose install fails, are reported and skipped.
///
/// # Errors
///
/// Returns an error only when the device session is lost.
pub fn install_local(
    session: &impl DeviceSession,
    directory: &impl PackageDirectory,
    reporter: &impl ProgressReporter,
    dir: &Path,
) -> Result<LocalInstallReport> {
    let mut report = LocalInstallReport::default();

    if !directory.exists(dir) {
        reporter.step(&format!(
            "no '{}' folder found, skipping local packages",
            dir.display()
        ));
        return Ok(report);
    }

    let files = match directory.list_files(dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot list local packages");
            reporter.warn(&format!("cannot read '{}': {e}", dir.display()));
            return Ok(report);
        }
    };

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_package_file(file_name) {
            continue;
        }
        let Some(package) = package_name_from_file_name(file_name) else {
            reporter.warn(&format!("wrong file naming for {file_name}, skipping"));
            report.badly_named += 1;
            continue;
        };

        match session.is_app_installed(package) {
            Ok(true) => {
                tracing::debug!(package, "already installed, skipping");
                report.already_present += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                contain(e, file_name, reporter)?;
                report.failed += 1;
                continue;
            }
        }

        reporter.step(&format!("installing {file_name}..."));
        match session.install_app(&path) {
            Ok(()) => {
                reporter.success(&format!("{package} installed"));
                report.installed += 1;
            }
            Err(e) => {
                contain(e, file_name, reporter)?;
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn contain(
    error: DeviceError,
    file_name: &str,
    reporter: &impl ProgressReporter,
) -> Result<(), DeviceError> {
    if error.is_session_level() {
        return Err(error);
    }
    tracing::warn!(file = file_name, error = %error, "local install failed");
    reporter.warn(&format!("{file_name} was not installed: {error}"));
    Ok(())
}
