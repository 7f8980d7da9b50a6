//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod catalog;
pub mod config;
pub mod counters;
pub mod device;
pub mod error;
pub mod local_package;

pub use app::{AppEntry, AppList, AppSource, RejectedEntry, parse_app_list};
pub use catalog::{SourceCatalog, SourceDescriptor};
pub use config::{ConfigOverrides, InstallerConfig, SessionConfig, TimeoutConfig};
pub use counters::{InstallCounters, LocalInstallReport, SourceTally};
pub use device::{ElementId, IntentLaunch, Locator};
pub use error::{ConfigError, DeviceError, InputError, SourceError};
