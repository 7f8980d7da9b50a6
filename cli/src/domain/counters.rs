//! Per-source installation counters.

use serde::Serialize;

use crate::domain::app::AppSource;

/// Installed and attempted counts per source.
///
/// `record` is the only mutator and always bumps `total` with `installed`,
/// so `installed(s) <= total(s)` holds for every source at every point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallCounters {
    installed: [u32; AppSource::COUNT],
    total: [u32; AppSource::COUNT],
}

/// One row of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceTally {
    pub source: AppSource,
    pub installed: u32,
    pub total: u32,
}

impl InstallCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one attempt for `source`.
    pub fn record(&mut self, source: AppSource, installed: bool) {
        let i = source.index();
        self.total[i] += 1;
        if installed {
            self.installed[i] += 1;
        }
    }

    #[must_use]
    pub fn installed(&self, source: AppSource) -> u32 {
        self.installed[source.index()]
    }

    #[must_use]
    pub fn total(&self, source: AppSource) -> u32 {
        self.total[source.index()]
    }

    /// Sum of attempts over all sources.
    #[must_use]
    pub fn attempted(&self) -> u32 {
        self.total.iter().sum()
    }

    /// Per-source rows in source order.
    #[must_use]
    pub fn tallies(&self) -> Vec<SourceTally> {
        AppSource::ALL
            .iter()
            .map(|&source| SourceTally {
                source,
                installed: self.installed(source),
                total: self.total(source),
            })
            .collect()
    }
}

/// What the local installer did with the files it found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocalInstallReport {
    /// Files installed in this run.
    pub installed: u32,
    /// Files whose package was already on the device.
    pub already_present: u32,
    /// Files whose name carries no package identifier.
    pub badly_named: u32,
    /// Files whose check or install failed.
    pub failed: u32,
}
