// Declare modules
pub mod archiver;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::collections::HashSet;
use std::env;

use self::archiver::{archive_path, store};
use self::cleanup::cleanup;
use self::cli::{Cli, Commands, Target};
use self::config::resolve_config;
use self::driver::{CommandDriver, NoDriver, ScenarioDriver};
use self::error::ArchiveError;
use self::models::{CommandKind, RunConfig, RunReport};
use self::scanner::Scanner;

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<RunReport> {
    // 1. Parse Args
    let args = Cli::parse();
    init_logging(args.verbose);

    // 2. Identify working directory & project name
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let config = resolve_config(&args, &current_dir, project_name)?;
    log::debug!(
        "verbosity: {}\nroot: {}\noutput: {}",
        config.verbosity,
        config.root_directory.display(),
        config.output_directory.display()
    );

    // 4. Dispatch
    let report = match &args.command {
        Commands::Archive(target) => execute(&config, CommandKind::Archive, target, &NoDriver),
        Commands::Rebase(rebase) => match &config.driver {
            Some(driver) => {
                let driver = CommandDriver::new(driver, &config.root_directory);
                execute(&config, CommandKind::Rebase, &rebase.target, &driver)
            }
            None => {
                log::warn!("No scenario driver configured; archiving scenario files only.");
                execute(&config, CommandKind::Rebase, &rebase.target, &NoDriver)
            }
        },
    };

    log::info!(
        "{} archived, {} failed",
        report.archived.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Optional cleanup of the output tree, then the walk; every matching file is
/// driven (for rebase) and stored under its mirrored baselines directory.
pub fn execute(
    config: &RunConfig,
    kind: CommandKind,
    target: &Target,
    driver: &dyn ScenarioDriver,
) -> RunReport {
    let mut cleanup_failure = None;
    if target.cleanup {
        if let Err(err) = cleanup(config, &config.output_directory) {
            log::error!("{}", err);
            cleanup_failure = Some(err);
        }
    }

    // Sources differing only by extension share an archive name; first one wins.
    let mut written = HashSet::new();
    let scanner = Scanner::new(config, kind);
    let mut report = scanner.scan(&target.path, target.recursive, |source| {
        let destination = config.baseline_dir_for(source);
        let archive = archive_path(source, &destination);
        if written.contains(&archive) {
            return Err(ArchiveError::ArchiveCollision(archive, source.to_path_buf()));
        }

        driver.run(source)?;
        let archive = store(source, &destination)?;
        written.insert(archive.clone());
        Ok(archive)
    });

    if let Some(err) = cleanup_failure {
        report.failures.insert(0, err);
    }
    report
}
