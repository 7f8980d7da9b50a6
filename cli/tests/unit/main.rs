//! Unit tests for auto-app-installer
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod local_install_service;
mod store_install_service;
