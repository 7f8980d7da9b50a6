//! Install command: loads the app list and runs it against the device.

use std::path::PathBuf;

use anyhow::Result;

use crate::app::{AppContext, OutputMode};
use crate::application::ports::ConfigStore;
use crate::application::services::install_apps::{InstallOptions, InstallRun, install_apps};
use crate::application::services::session_scope::with_session;
use crate::application::services::store_install::StoreInstallOptions;
use crate::domain::{ConfigOverrides, InstallerConfig, SourceCatalog};
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::infra::http::UreqTransport;
use crate::infra::input::read_app_list;
use crate::infra::webdriver::WebDriverSession;
use crate::output::{HumanRenderer, JsonRenderer, TerminalReporter};

/// Arguments for an install run.
pub struct InstallArgs {
    /// JSON app list.
    pub file: PathBuf,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
    /// Values from flags and environment.
    pub overrides: ConfigOverrides,
}

/// Resolve the effective configuration: flags and environment over the
/// configuration file over defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or the result is invalid.
pub fn resolve_config(
    store: &impl ConfigStore,
    overrides: ConfigOverrides,
) -> Result<InstallerConfig> {
    let config = store.load()?.with_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the configuration or app list is invalid, the session
/// cannot be opened, or the session is lost mid-run.
pub fn run(app: &AppContext, args: InstallArgs) -> Result<()> {
    let ctx = &app.output;
    let human = HumanRenderer::new(ctx);

    let config = resolve_config(&YamlConfigStore::new(args.config_path), args.overrides)?;
    let list = read_app_list(&args.file)?;
    human.render_rejected(&list.rejected);

    if list.is_empty() {
        ctx.info(&format!(
            "Provided JSON file '{}' contains no apps. Nothing to do.",
            args.file.display()
        ));
        if app.mode == OutputMode::Json {
            JsonRenderer::render_summary(&InstallRun::default(), list.rejected.len())?;
        }
        return Ok(());
    }

    ctx.info(&format!("connecting to {}...", config.endpoint));
    let session = WebDriverSession::open(
        UreqTransport::new(config.timeouts.connect()),
        &config.endpoint,
        &config.session.capabilities(),
        config.timeouts.implicit_wait(),
    )?;
    tracing::info!(session_id = session.session_id(), "device session opened");

    let reporter = TerminalReporter::new(ctx);
    let opts = InstallOptions {
        local_dir: &config.local_dir,
        store: StoreInstallOptions::from(&config.timeouts),
    };
    let run = with_session(session, |session| {
        install_apps(
            session,
            &SourceCatalog::builtin(),
            &LocalFs,
            &reporter,
            &list.entries,
            &opts,
        )
    })?;

    match app.mode {
        OutputMode::Human => human.render_summary(&run),
        OutputMode::Json => JsonRenderer::render_summary(&run, list.rejected.len())?,
    }
    Ok(())
}
