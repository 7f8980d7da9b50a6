//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::{DeviceError, ElementId, InstallerConfig, IntentLaunch, Locator};

// ── Device Port ───────────────────────────────────────────────────────────────

/// A live session on the automation endpoint. Every device interaction goes
/// through this trait.
///
/// Implementations are single-threaded and blocking. Element lookups retry
/// for the session's implicit wait before failing.
pub trait DeviceSession {
    /// Open a screen of another app via an intent.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Automation` if the app or activity cannot be resolved.
    fn launch_with_intent(&self, intent: &IntentLaunch<'_>) -> Result<(), DeviceError>;

    /// Resolve a UI element.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::ElementNotFound` once the implicit wait elapses.
    fn find_element(&self, locator: &Locator) -> Result<ElementId, DeviceError>;

    /// Tap an element previously returned by `find_element`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is stale or the command fails.
    fn click(&self, element: &ElementId) -> Result<(), DeviceError>;

    /// Name of the activity currently in the foreground.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn current_activity(&self) -> Result<String, DeviceError>;

    /// Whether a package is installed on the device.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Automation` on protocol-level failure.
    fn is_app_installed(&self, package_name: &str) -> Result<bool, DeviceError>;

    /// Install a package file.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Automation` on protocol-level failure.
    fn install_app(&self, path: &Path) -> Result<(), DeviceError>;

    /// Release the session. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint rejects the release.
    fn close(&self) -> Result<(), DeviceError>;
}

impl<S: DeviceSession + ?Sized> DeviceSession for &S {
    fn launch_with_intent(&self, intent: &IntentLaunch<'_>) -> Result<(), DeviceError> {
        (**self).launch_with_intent(intent)
    }
    fn find_element(&self, locator: &Locator) -> Result<ElementId, DeviceError> {
        (**self).find_element(locator)
    }
    fn click(&self, element: &ElementId) -> Result<(), DeviceError> {
        (**self).click(element)
    }
    fn current_activity(&self) -> Result<String, DeviceError> {
        (**self).current_activity()
    }
    fn is_app_installed(&self, package_name: &str) -> Result<bool, DeviceError> {
        (**self).is_app_installed(package_name)
    }
    fn install_app(&self, path: &Path) -> Result<(), DeviceError> {
        (**self).install_app(path)
    }
    fn close(&self) -> Result<(), DeviceError> {
        (**self).close()
    }
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Read access to the local package directory.
pub trait PackageDirectory {
    /// Whether `dir` exists and is a directory.
    fn exists(&self, dir: &Path) -> bool;

    /// Regular files directly inside `dir`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the installer configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<InstallerConfig>;

    /// Path the configuration is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if no path can be determined.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
