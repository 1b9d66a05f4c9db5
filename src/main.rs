use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::io;
use std::path::PathBuf;

use retry_runner::cli::{self, Cli, Commands, RunArgs};
use retry_runner::config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("retry-runner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("retry-runner.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if !rust_log_set() {
        // Let every record through the builder; the configured level is
        // enforced with log::set_max_level once the config is loaded.
        builder.filter_level(LevelFilter::Trace);
    }
    builder.target(env_logger::Target::Pipe(target)).init();
    if !rust_log_set() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn rust_log_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

/// Level from the config's `log_level`, falling back to info
fn configured_level(log_level: Option<&str>) -> LevelFilter {
    match log_level.map(str::parse::<LevelFilter>) {
        Some(Ok(level)) => level,
        Some(Err(_)) => {
            log::warn!("Unknown log_level {:?}, using info", log_level);
            LevelFilter::Info
        }
        None => LevelFilter::Info,
    }
}

fn apply_log_level(log_level: Option<&str>) {
    if rust_log_set() {
        return;
    }
    let level = configured_level(log_level);
    log::set_max_level(level);
    info!("Log level set to {}", level);
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => handle_run_command(&RunArgs::default(), config, cli.is_verbose()),
        Some(Commands::Run(args)) => handle_run_command(args, config, cli.is_verbose()),
        Some(Commands::Config) => handle_config_command(config),
    }
}

fn handle_run_command(args: &RunArgs, config: &Config, verbose: bool) -> Result<()> {
    let config = args.apply(config).context("Invalid run options")?;
    info!("Running with settings: {:?}", config.retry);

    if !config.output.color {
        colored::control::set_override(false);
    }
    if verbose {
        println!(
            "{} max_attempts={} threshold={}",
            "Settings:".cyan(),
            config.retry.max_attempts,
            config.retry.success_threshold
        );
    }

    let result = cli::execute(&config, io::stdout().lock()).context("Run failed")?;
    info!("Run finished: {:?}", result);
    Ok(())
}

fn handle_config_command(config: &Config) -> Result<()> {
    info!("Printing effective configuration");
    print!("{}", config.to_yaml().context("Failed to serialize config")?);
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(config.log_level.as_deref());

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
