//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the WebDriver client and its
//! HTTP transport, filesystem access, and configuration loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod fs;
pub mod http;
pub mod input;
pub mod webdriver;
