//! App entries, app sources, and app-list parsing.
//!
//! Pure functions only. The caller reads the file, this module turns its
//! text into validated `AppEntry` values.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::{InputError, SourceError};

/// Reverse-domain package identifier, e.g. `ru.vk.store`.
pub static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").expect("valid regex")
});

// ── Sources ───────────────────────────────────────────────────────────────────

/// Where an app is installed from. The set is closed: every `match` on it is
/// exhaustive, and unknown tags are rejected when the app list is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AppSource {
    /// Google Play, the system store. Installs silently once triggered.
    GooglePlay,
    /// RuStore, a third-party store.
    RuStore,
    /// Droid-ify, an F-Droid catalog client.
    Droidify,
    /// A package file from the local directory.
    Local,
}

impl AppSource {
    /// Number of sources; the length of every per-source array.
    pub const COUNT: usize = 4;

    /// All sources in index order.
    pub const ALL: [AppSource; Self::COUNT] =
        [Self::GooglePlay, Self::RuStore, Self::Droidify, Self::Local];

    /// Position of this source in per-source arrays.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::GooglePlay => 0,
            Self::RuStore => 1,
            Self::Droidify => 2,
            Self::Local => 3,
        }
    }

    /// Inverse of [`AppSource::index`].
    #[must_use]
    pub fn from_index(index: u64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Name shown in summaries.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::GooglePlay => "Google Play",
            Self::RuStore => "RuStore",
            Self::Droidify => "F-Droid",
            Self::Local => "Local",
        }
    }

    /// Parse the `source` field of an app entry: a name or an integer index.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unsupported` for anything else.
    pub fn from_json(value: &Value) -> Result<Self, SourceError> {
        match value {
            Value::String(name) => name.parse(),
            Value::Number(number) => number
                .as_u64()
                .and_then(Self::from_index)
                .ok_or_else(|| SourceError::Unsupported(number.to_string())),
            other => Err(SourceError::Unsupported(other.to_string())),
        }
    }
}

impl FromStr for AppSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "googleplay" | "play" | "primarystore" => Ok(Self::GooglePlay),
            "rustore" | "secondarystore" => Ok(Self::RuStore),
            "droidify" | "fdroid" | "altcatalog" => Ok(Self::Droidify),
            "local" => Ok(Self::Local),
            _ => Err(SourceError::Unsupported(s.to_string())),
        }
    }
}

impl fmt::Display for AppSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ── Entries ───────────────────────────────────────────────────────────────────

/// One app to install. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    /// Display name, non-empty.
    pub label: String,
    /// Reverse-domain package identifier.
    pub package_name: String,
    pub source: AppSource,
}

impl AppEntry {
    #[must_use]
    pub fn new(label: &str, package_name: &str, source: AppSource) -> Self {
        Self {
            label: label.to_string(),
            package_name: package_name.to_string(),
            source,
        }
    }
}

/// An entry dropped during parsing, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub index: usize,
    pub reason: String,
}

/// Result of parsing an app list.
#[derive(Debug, Default)]
pub struct AppList {
    pub entries: Vec<AppEntry>,
    pub rejected: Vec<RejectedEntry>,
}

impl AppList {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
struct RawEntry {
    label: String,
    #[serde(rename = "packagename")]
    package_name: String,
    source: Value,
}

/// Parse the JSON text of an app list.
///
/// Field names match case-insensitively, ignoring `_` and `-`. Entries with an
/// empty label or an invalid package name are rejected individually; anything
/// that makes the list as a whole untrustworthy is an error.
///
/// # Errors
///
/// Returns an error for invalid JSON, a non-array top level, an entry with
/// missing or mistyped fields, or an unknown source.
pub fn parse_app_list(json: &str) -> Result<AppList, InputError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| InputError::Syntax(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(InputError::NotAnArray);
    };

    let mut list = AppList::default();
    for (index, item) in items.into_iter().enumerate() {
        let raw: RawEntry = serde_json::from_value(normalize_keys(item))
            .map_err(|e| InputError::MalformedEntry { index, reason: e.to_string() })?;
        let source = AppSource::from_json(&raw.source)?;
        let label = raw.label.trim();
        let package_name = raw.package_name.trim();

        if label.is_empty() {
            list.rejected.push(RejectedEntry {
                index,
                reason: "label is empty".to_string(),
            });
            continue;
        }
        if !PACKAGE_NAME_RE.is_match(package_name) {
            list.rejected.push(RejectedEntry {
                index,
                reason: format!("'{package_name}' is not a package identifier"),
            });
            continue;
        }
        list.entries.push(AppEntry::new(label, package_name, source));
    }
    Ok(list)
}

fn normalize_keys(item: Value) -> Value {
    match item {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (normalize_token(&key), value))
                .collect(),
        ),
        other => other,
    }
}

fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
