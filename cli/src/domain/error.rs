//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::app::AppSource;

// ── Device errors ─────────────────────────────────────────────────────────────

/// Failures of a single device primitive.
///
/// `Connection` and `SessionLost` are session-level and end the run; the
/// others are contained by the installer that issued the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("Cannot start a session at {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },

    #[error("Device session lost: {0}")]
    SessionLost(String),

    #[error("No element matches {locator}")]
    ElementNotFound { locator: String },

    #[error("Automation command failed: {0}")]
    Automation(String),
}

impl DeviceError {
    /// Returns `true` when the session itself is unusable.
    #[must_use]
    pub fn is_session_level(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::SessionLost(_))
    }
}

// ── Source errors ─────────────────────────────────────────────────────────────

/// Errors related to app sources and the source catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("No source descriptor registered for {0}. This is a catalog defect.")]
    MissingDescriptor(AppSource),

    #[error("Unsupported app source '{0}'. Valid sources: GooglePlay, RuStore, Droidify, Local")]
    Unsupported(String),
}

// ── Input errors ──────────────────────────────────────────────────────────────

/// Errors that make the whole app list unusable.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Cannot read app list {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("App list is not valid JSON: {0}")]
    Syntax(String),

    #[error("App list must be a JSON array of app entries")]
    NotAnArray,

    #[error("App entry #{index} is malformed: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
