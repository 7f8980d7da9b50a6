//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::domain::ConfigOverrides;

const LOCAL_FILES_NOTE: &str = "\
Examples:
  auto-app-installer D:/MyDevice/Backup/listOfApps.json
  auto-app-installer ~/backup/apps.json 5a954c87

Local package filenames must carry the package name of the app in the form
'appLabel-version-packageName.apk' and live in the 'local' folder of the
working directory (or --local-dir).";

/// Bulk-install Android apps through an Appium endpoint
#[derive(Parser)]
#[command(name = "auto-app-installer", version, after_help = LOCAL_FILES_NOTE)]
pub struct Cli {
    /// JSON file listing the apps to install
    pub file: Option<PathBuf>,

    /// Device serial to use when several devices are connected
    pub device_id: Option<String>,

    /// Appium server URL
    #[arg(long, env = "APPIUM_HOST")]
    pub endpoint: Option<String>,

    /// Folder scanned for local package files
    #[arg(long, value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Seconds to wait for the package installer prompt
    #[arg(long, value_name = "SECS")]
    pub confirm_timeout: Option<u64>,

    /// Seconds to wait for the Appium server to create a session
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Seconds each element lookup retries before failing
    #[arg(long, value_name = "SECS")]
    pub implicit_wait: Option<u64>,

    /// Configuration file (YAML)
    #[arg(long, value_name = "PATH", env = "AUTO_APP_INSTALLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output the summary in JSON format
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Log device commands to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Without a file, prints usage and succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the install run fails.
    pub fn run(self) -> Result<()> {
        let Some(file) = self.file else {
            Self::command().print_help()?;
            return Ok(());
        };

        let ctx = AppContext::new(&OutputFlags {
            no_color: self.no_color,
            quiet: self.quiet,
            json: self.json,
        });
        let args = commands::install::InstallArgs {
            file,
            config_path: self.config,
            overrides: ConfigOverrides {
                endpoint: self.endpoint,
                device_id: self.device_id,
                local_dir: self.local_dir,
                connect_secs: self.connect_timeout,
                implicit_wait_secs: self.implicit_wait,
                confirm_wait_secs: self.confirm_timeout,
            },
        };
        commands::install::run(&ctx, args)
    }
}
