use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::Parser;

use segtran::cli::Args;
use segtran::config::{ConfigFile, ConfigManager};
use segtran::error::StartupError;
use segtran::ui::Style;
use segtran::{app, logging};

fn main() {
    let _args = Args::parse();

    let (config, log_path) = match setup() {
        Ok(setup) => setup,
        Err(e) => fail(&e, None),
    };

    if let Err(e) = app::run(&config) {
        fail(&e, log_path.as_deref());
    }
    process::exit(exitcode::OK);
}

/// Loads the config file and starts logging.
fn setup() -> Result<(ConfigFile, Option<PathBuf>)> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;

    let log_path = logging::init(&config.log);
    tracing::info!(
        config = %manager.config_path().display(),
        version = env!("CARGO_PKG_VERSION"),
        "segtran starting"
    );
    Ok((config, log_path))
}

fn fail(error: &anyhow::Error, log_path: Option<&Path>) -> ! {
    tracing::error!("{error:#}");
    eprintln!("{} {error:#}", Style::error("Error:"));
    if let Some(path) = log_path {
        eprintln!("{} {}", Style::hint("Session log:"), Style::path(path.display()));
    }
    process::exit(exit_code(error));
}

fn exit_code(error: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(startup) = error.downcast_ref::<StartupError>() {
        return startup.exit_code();
    }
    if error.downcast_ref::<std::io::Error>().is_some() {
        return exitcode::IOERR;
    }
    exitcode::SOFTWARE
}
