//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::install_apps::InstallRun;
use crate::domain::{LocalInstallReport, RejectedEntry, SourceTally};
use crate::output::OutputContext;

/// Renders run results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Warn about app list entries that were dropped while loading.
    pub fn render_rejected(&self, rejected: &[RejectedEntry]) {
        for entry in rejected {
            self.ctx
                .warn(&format!("skipping app entry #{}: {}", entry.index, entry.reason));
        }
    }

    /// Render the end-of-run summary. Printed even when `quiet`.
    pub fn render_summary(&self, run: &InstallRun) {
        println!();
        println!("  {}", "Summary".style(self.ctx.styles.header));
        for tally in run.counters.tallies() {
            println!(
                "  {:<18} {}",
                format!("{} apps:", tally.source.display_name()).style(self.ctx.styles.dim),
                format_tally(&tally).style(tally_style(self.ctx, &tally))
            );
        }
        if let Some(line) = format_local_report(&run.local) {
            println!("  {}", line.style(self.ctx.styles.dim));
        }
    }
}

/// `installed/total`, e.g. `3/4`.
#[must_use]
pub fn format_tally(tally: &SourceTally) -> String {
    format!("{}/{}", tally.installed, tally.total)
}

/// One-line description of the local pass, or `None` if it found nothing.
#[must_use]
pub fn format_local_report(report: &LocalInstallReport) -> Option<String> {
    let LocalInstallReport {
        installed,
        already_present,
        badly_named,
        failed,
    } = *report;
    if installed + already_present + badly_named + failed == 0 {
        return None;
    }
    Some(format!(
        "local files: {installed} installed, {already_present} already present, \
{badly_named} badly named, {failed} failed"
    ))
}

fn tally_style(ctx: &OutputContext, tally: &SourceTally) -> owo_colors::Style {
    if tally.installed == tally.total {
        ctx.styles.success
    } else {
        ctx.styles.warning
    }
}
