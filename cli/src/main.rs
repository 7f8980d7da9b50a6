//! auto-app-installer - bulk-install Android apps through an Appium endpoint

use clap::Parser;

use auto_app_installer::cli::Cli;
use auto_app_installer::logging::init_logging;
use auto_app_installer::output::json::{error_code, format_error};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json = cli.json;
    if let Err(e) = cli.run() {
        if json {
            if let Ok(out) = format_error(&format!("{e:#}"), error_code(&e)) {
                println!("{out}");
            }
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
