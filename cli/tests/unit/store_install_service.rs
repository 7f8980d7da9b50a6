//! Tests for the `store_install` application service.
//!
//! Drives `install_from_store()` against a scripted device and checks the
//! exact command sequence for each confirmation mode.

#![allow(clippy::expect_used)]

use std::time::Duration;

use auto_app_installer::application::services::store_install::{
    Confirmation, StoreInstallOptions, StoreOutcome, install_from_store,
    wait_for_package_installer,
};
use auto_app_installer::domain::{AppEntry, AppSource, DeviceError, Locator, SourceCatalog};

use crate::mocks::{
    FakeDevice, INSTALLER_ACTIVITY, NoopReporter, RecordingReporter, STORE_ACTIVITY,
};

const CONFIRM: &str = "id:android:id/button1";

fn fast() -> StoreInstallOptions {
    StoreInstallOptions {
        confirm_timeout: Duration::from_millis(40),
        poll_interval: Duration::from_millis(5),
    }
}

fn telegram(source: AppSource) -> AppEntry {
    AppEntry::new("Telegram", "org.telegram.messenger", source)
}

#[test]
fn test_silent_install_clicks_trigger_without_polling() {
    let catalog = SourceCatalog::builtin();
    let descriptor = catalog.descriptor(AppSource::GooglePlay).expect("descriptor");
    let device = FakeDevice::new();

    let outcome = install_from_store(
        &device,
        &NoopReporter,
        descriptor,
        &telegram(AppSource::GooglePlay),
        Confirmation::Silent,
        fast(),
    )
    .expect("outcome");

    assert_eq!(outcome, StoreOutcome::Triggered);
    let trigger = descriptor.install_trigger.to_string();
    assert_eq!(
        device.calls(),
        vec![
            "launch:com.android.vending/.AssetBrowserActivity:market://details?id=org.telegram.messenger"
                .to_string(),
            format!("find:{trigger}"),
            format!("click:{trigger}"),
        ]
    );
    assert_eq!(device.count("activity"), 0);
}

#[test]
fn test_interactive_install_confirms_when_installer_appears() {
    let catalog = SourceCatalog::builtin();
    let descriptor = catalog.descriptor(AppSource::RuStore).expect("descriptor");
    let device =
        FakeDevice::new().with_activities(&[STORE_ACTIVITY, STORE_ACTIVITY, INSTALLER_ACTIVITY]);

    let outcome = install_from_store(
        &device,
        &NoopReporter,
        descriptor,
        &telegram(AppSource::RuStore),
        Confirmation::Interactive,
        StoreInstallOptions {
            confirm_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(1),
        },
    )
    .expect("outcome");

    assert_eq!(outcome, StoreOutcome::Confirmed);
    assert!(outcome.is_installed());
    assert_eq!(device.count("activity"), 3);
    let calls = device.calls();
    assert_eq!(calls[calls.len() - 2], format!("find:{CONFIRM}"));
    assert_eq!(calls[calls.len() - 1], format!("click:{CONFIRM}"));
}

#[test]
fn test_interactive_install_times_out_without_installer() {
    let catalog = SourceCatalog::builtin();
    let descriptor = catalog.descriptor(AppSource::Droidify).expect("descriptor");
    let device = FakeDevice::new().with_activities(&[STORE_ACTIVITY]);
    let reporter = RecordingReporter::default();

    let outcome = install_from_store(
        &device,
        &reporter,
        descriptor,
        &AppEntry::new("NewPipe", "org.schabi.newpipe", AppSource::Droidify),
        Confirmation::Interactive,
        fast(),
    )
    .expect("outcome");

    assert_eq!(outcome, StoreOutcome::TimedOut);
    assert!(!outcome.is_installed());
    assert_eq!(device.count(&format!("find:{CONFIRM}")), 0);
    assert!(device.count("activity") >= 2, "must poll more than once");
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("NewPipe"), "got: {}", warnings[0]);
    assert!(warnings[0].contains("timed out"), "got: {}", warnings[0]);
}

#[test]
fn test_missing_install_trigger_is_contained() {
    let catalog = SourceCatalog::builtin();
    let descriptor = catalog.descriptor(AppSource::GooglePlay).expect("descriptor");
    let device = FakeDevice::new().with_missing_element(descriptor.install_trigger.clone());
    let reporter = RecordingReporter::default();

    let outcome = install_from_store(
        &device,
        &reporter,
        descriptor,
        &telegram(AppSource::GooglePlay),
        Confirmation::Silent,
        fast(),
    )
    .expect("per-app failures are not errors");

    assert!(matches!(
        outcome,
        StoreOutcome::Failed(DeviceError::ElementNotFound { .. })
    ));
    assert_eq!(device.count("click:"), 0);
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn test_missing_confirm_button_is_contained() {
    let catalog = SourceCatalog::builtin();
    let descriptor = catalog.descriptor(AppSource::RuStore).expect("descriptor");
    let device = FakeDevice::new()
        .with_activities(&[INSTALLER_ACTIVITY])
        .with_missing_element(Locator::id("android:id/button1"));

    let outcome = install_from_store(
        &device,
        &NoopReporter,
        descriptor,
        &telegram(AppSource::RuStore),
        Confirmation::Interactive,
        fast(),
    )
    .expect("outcome");

    assert!(!outcome.is_installed());
    assert_eq!(device.count("click:"), 1, "only the store trigger is clicked");
}

#[test]
fn test_lost_session_propagates() {
    let catalog = SourceCatalog::builtin();
    let descriptor = catalog.descriptor(AppSource::GooglePlay).expect("descriptor");
    let device = FakeDevice::new().with_session_lost_on("launch");

    let err = install_from_store(
        &device,
        &NoopReporter,
        descriptor,
        &telegram(AppSource::GooglePlay),
        Confirmation::Silent,
        fast(),
    )
    .expect_err("session loss must end the run");

    assert!(err.is_session_level());
    assert_eq!(device.count("find:"), 0);
}

#[test]
fn test_zero_timeout_checks_once() {
    let device = FakeDevice::new().with_activities(&[STORE_ACTIVITY]);
    let opts = StoreInstallOptions {
        confirm_timeout: Duration::ZERO,
        poll_interval: Duration::from_secs(1),
    };

    let appeared = wait_for_package_installer(&device, opts).expect("wait");

    assert!(!appeared);
    assert_eq!(device.count("activity"), 1);
}

#[test]
fn test_installer_already_in_foreground_returns_immediately() {
    let device = FakeDevice::new().with_activities(&[INSTALLER_ACTIVITY]);

    let appeared =
        wait_for_package_installer(&device, StoreInstallOptions::default()).expect("wait");

    assert!(appeared);
    assert_eq!(device.count("activity"), 1);
}

#[test]
fn test_unbounded_timeout_keeps_polling_until_installer() {
    let device =
        FakeDevice::new().with_activities(&[STORE_ACTIVITY, STORE_ACTIVITY, INSTALLER_ACTIVITY]);
    let opts = StoreInstallOptions {
        confirm_timeout: Duration::from_secs(u64::MAX),
        poll_interval: Duration::from_millis(1),
    };

    let appeared = wait_for_package_installer(&device, opts).expect("wait");

    assert!(appeared);
    assert_eq!(device.count("activity"), 3);
}
