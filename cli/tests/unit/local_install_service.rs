//! Tests for the `local_install` application service.

#![allow(clippy::expect_used)]

use std::path::Path;

use auto_app_installer::application::services::local_install::install_local;
use auto_app_installer::domain::{DeviceError, LocalInstallReport};

use crate::mocks::{FakeDevice, FakeDirectory, NoopReporter, RecordingReporter};

fn local() -> &'static Path {
    Path::new("local")
}

#[test]
fn test_missing_directory_is_skipped_with_notice() {
    let device = FakeDevice::new();
    let reporter = RecordingReporter::default();

    let report =
        install_local(&device, &FakeDirectory::missing(), &reporter, local()).expect("report");

    assert_eq!(report, LocalInstallReport::default());
    assert!(device.calls().is_empty());
    assert!(
        reporter.messages().iter().any(|m| m.contains("skipping local packages")),
        "got: {:?}",
        reporter.messages()
    );
}

#[test]
fn test_unreadable_directory_warns_and_continues() {
    let device = FakeDevice::new();
    let reporter = RecordingReporter::default();

    let report =
        install_local(&device, &FakeDirectory::unreadable(), &reporter, local()).expect("report");

    assert_eq!(report, LocalInstallReport::default());
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn test_installs_missing_packages_and_skips_bad_names() {
    let device = FakeDevice::new();
    let reporter = RecordingReporter::default();
    let dir = FakeDirectory::with_files(&[
        "App-1.0-com.example.app.apk",
        "noname.apk",
        "readme.txt",
    ]);

    let report = install_local(&device, &dir, &reporter, local()).expect("report");

    assert_eq!(report.installed, 1);
    assert_eq!(report.badly_named, 1);
    assert_eq!(device.count("install:"), 1);
    assert!(device.is_installed("com.example.app"));
    assert_eq!(device.count("installed?:"), 1, "non-package files are ignored");
    assert!(
        reporter
            .warnings()
            .iter()
            .any(|w| w.contains("wrong file naming for noname.apk")),
        "got: {:?}",
        reporter.warnings()
    );
}

#[test]
fn test_never_reinstalls_present_package() {
    let device = FakeDevice::new().with_installed(&["ru.vk.store"]);
    let dir = FakeDirectory::with_files(&["RuStore-v1.68.1.0-ru.vk.store.apk"]);

    let report = install_local(&device, &dir, &NoopReporter, local()).expect("report");

    assert_eq!(report.already_present, 1);
    assert_eq!(report.installed, 0);
    assert_eq!(device.count("install:"), 0);
}

#[test]
fn test_second_file_for_same_package_is_already_present() {
    let device = FakeDevice::new();
    let dir = FakeDirectory::with_files(&[
        "Bank-1.0-com.example.bank.apk",
        "Bank-2.0-com.example.bank.apk",
    ]);

    let report = install_local(&device, &dir, &NoopReporter, local()).expect("report");

    assert_eq!(report.installed, 1);
    assert_eq!(report.already_present, 1);
    assert_eq!(device.count("install:"), 1);
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let device = FakeDevice::new();
    let dir = FakeDirectory::with_files(&["Maps-3-com.example.maps.APK"]);

    let report = install_local(&device, &dir, &NoopReporter, local()).expect("report");

    assert_eq!(report.installed, 1);
    assert!(device.is_installed("com.example.maps"));
}

#[test]
fn test_failed_install_does_not_stop_the_folder() {
    let device = FakeDevice::new().with_failing_install("A-1-com.example.a.apk");
    let reporter = RecordingReporter::default();
    let dir = FakeDirectory::with_files(&["A-1-com.example.a.apk", "B-1-com.example.b.apk"]);

    let report = install_local(&device, &dir, &reporter, local()).expect("report");

    assert_eq!(report.failed, 1);
    assert_eq!(report.installed, 1);
    assert!(device.is_installed("com.example.b"));
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn test_lost_session_propagates() {
    let device = FakeDevice::new().with_session_lost_on("install:");
    let dir = FakeDirectory::with_files(&["A-1-com.example.a.apk", "B-1-com.example.b.apk"]);

    let err = install_local(&device, &dir, &NoopReporter, local()).expect_err("lost");

    assert!(matches!(
        err.downcast_ref::<DeviceError>(),
        Some(DeviceError::SessionLost(_))
    ));
    assert_eq!(device.count("install:"), 1);
}
