//! Source catalog: launch parameters and install trigger per store.

use crate::domain::app::AppSource;
use crate::domain::device::Locator;
use crate::domain::error::SourceError;

/// How to open a store's "view app" screen and start an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Package of the store app.
    pub host_package: String,
    /// Activity that handles `market://details` intents.
    pub entry_activity: String,
    /// The details page's install button.
    pub install_trigger: Locator,
}

impl SourceDescriptor {
    #[must_use]
    pub fn new(host_package: &str, entry_activity: &str, install_trigger: Locator) -> Self {
        Self {
            host_package: host_package.to_string(),
            entry_activity: entry_activity.to_string(),
            install_trigger,
        }
    }
}

const FIRST_BUTTON: &str = r#"new UiSelector().className("android.widget.Button").instance(0)"#;
const DROIDIFY_ACTION: &str = r#"new UiSelector().resourceId("com.looker.droidify:id/action")"#;

/// Lookup table from store source to descriptor. Never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    entries: Vec<(AppSource, SourceDescriptor)>,
}

impl SourceCatalog {
    /// Build a catalog from explicit entries.
    #[must_use]
    pub fn new(entries: Vec<(AppSource, SourceDescriptor)>) -> Self {
        Self { entries }
    }

    /// The stores this tool knows how to drive. Tested on Android 13.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            (
                AppSource::GooglePlay,
                SourceDescriptor::new(
                    "com.android.vending",
                    ".AssetBrowserActivity",
                    Locator::ui_automator(FIRST_BUTTON),
                ),
            ),
            (
                AppSource::RuStore,
                SourceDescriptor::new(
                    "ru.vk.store",
                    ".app.MainActivity",
                    Locator::ui_automator(FIRST_BUTTON),
                ),
            ),
            (
                AppSource::Droidify,
                SourceDescriptor::new(
                    "com.looker.droidify",
                    ".MainActivity",
                    Locator::ui_automator(DROIDIFY_ACTION),
                ),
            ),
        ])
    }

    /// Descriptor for a store source.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::MissingDescriptor` if the source has no entry,
    /// which is always the case for `AppSource::Local`.
    pub fn descriptor(&self, source: AppSource) -> Result<&SourceDescriptor, SourceError> {
        self.entries
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, descriptor)| descriptor)
            .ok_or(SourceError::MissingDescriptor(source))
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
