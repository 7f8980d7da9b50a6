//! Value types exchanged with a device session.

use std::fmt;

/// Intent action used to open an app's details page in a store.
pub const VIEW_ACTION: &str = "android.intent.action.VIEW";

/// Substring of the foreground activity while the system package installer
/// is prompting for confirmation.
pub const PACKAGE_INSTALLER_MARKER: &str = "packageinstaller";

/// Resource id of the package installer's "Install" button
/// (`android:id/button0` is "Cancel").
pub const INSTALLER_CONFIRM_BUTTON: &str = "android:id/button1";

/// Extension of installable package files.
pub const PACKAGE_EXTENSION: &str = "apk";

/// `market://` URI of an app's details page.
#[must_use]
pub fn market_details_uri(package_name: &str) -> String {
    format!("market://details?id={package_name}")
}

/// UI element query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A `UiSelector` expression evaluated by UiAutomator.
    UiAutomator(String),
    /// A resource id such as `android:id/button1`.
    Id(String),
}

impl Locator {
    #[must_use]
    pub fn ui_automator(expression: &str) -> Self {
        Self::UiAutomator(expression.to_string())
    }

    #[must_use]
    pub fn id(resource_id: &str) -> Self {
        Self::Id(resource_id.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UiAutomator(expr) => write!(f, "uiautomator:{expr}"),
            Self::Id(id) => write!(f, "id:{id}"),
        }
    }
}

/// Opaque handle to an element found in the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementId(pub String);

/// Request to open a specific screen of another app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentLaunch<'a> {
    pub package: &'a str,
    pub activity: &'a str,
    pub action: &'a str,
    pub data_uri: String,
    /// Force-stop the target app first. Store launches keep it running.
    pub stop_app: bool,
}

impl IntentLaunch<'_> {
    /// `package/activity` component name.
    #[must_use]
    pub fn component(&self) -> String {
        format!("{}/{}", self.package, self.activity)
    }
}
