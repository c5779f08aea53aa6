use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{error, info};
use std::sync::Arc;

mod cli;

use cli::{Cli, Commands};
use homework_bot::api::PracticumClient;
use homework_bot::config::{Config, Credentials, load_dotenv};
use homework_bot::notify::TelegramNotifier;
use homework_bot::poller::{CycleOutcome, PollLoop, SystemClock, shutdown_on};

/// Exit code when required credentials are absent
const EXIT_CONFIG_MISSING: i32 = 2;

/// Initialize the global logger. Called once, before anything logs.
fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp_secs().init();
}

fn build_poll_loop(config: &Config, credentials: &Credentials, from_date: Option<i64>) -> Result<PollLoop> {
    let api = PracticumClient::new(credentials.practicum_token.clone(), config.practicum_config())
        .context("Failed to create API client")?;
    let notifier = TelegramNotifier::new(
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
        config.telegram_config(),
    )
    .context("Failed to create Telegram notifier")?;

    let poll_loop = PollLoop::new(
        Arc::new(api),
        Arc::new(notifier),
        Arc::new(SystemClock),
        config.poll_loop_config(),
    );

    Ok(match from_date {
        Some(ts) => poll_loop.with_checkpoint(ts),
        None => poll_loop,
    })
}

async fn handle_run(config: &Config, credentials: &Credentials, from_date: Option<i64>) -> Result<()> {
    let mut poll_loop = build_poll_loop(config, credentials, from_date)?;

    let shutdown_rx = shutdown_on(tokio::signal::ctrl_c());

    println!(
        "{} polling every {}s, chat {}",
        "Started:".green(),
        config.poll_interval_secs,
        credentials.telegram_chat_id
    );
    poll_loop.run(shutdown_rx).await;
    Ok(())
}

async fn handle_once(config: &Config, credentials: &Credentials, from_date: Option<i64>) -> Result<()> {
    let mut poll_loop = build_poll_loop(config, credentials, from_date)?;

    match poll_loop.run_cycle().await {
        CycleOutcome::Notified(message) => println!("{} {}", "Sent:".green(), message),
        CycleOutcome::Suppressed(message) => println!("{} {}", "Unchanged:".yellow(), message),
        CycleOutcome::NoUpdates => println!("{}", "No new homework statuses".cyan()),
        CycleOutcome::Failed { error, delivered } => {
            println!("{} {} (reported: {})", "Failed:".red(), error, delivered);
            eyre::bail!("Cycle failed: {}", error);
        }
    }

    println!("Next checkpoint: {}", poll_loop.state().checkpoint);
    Ok(())
}

fn handle_check(config: &Config, credentials: &Credentials) -> Result<()> {
    println!("{}", "Configuration OK".green());
    println!("  endpoint:           {}", config.endpoint);
    println!("  telegram api:       {}", config.telegram_api_base);
    println!("  poll interval:      {}s", config.poll_interval_secs);
    println!("  request timeout:    {}ms", config.request_timeout_ms);
    println!("  success checkpoint: {:?}", config.success_checkpoint);
    println!("  error checkpoint:   {:?}", config.error_checkpoint);
    println!("  credentials:        {:?}", credentials);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging first
    setup_logging(cli.is_verbose());

    load_dotenv();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("CRITICAL: {}", e);
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(EXIT_CONFIG_MISSING);
        }
    };

    let result = match cli.effective_command() {
        Commands::Run { from_date } => handle_run(&config, &credentials, from_date).await,
        Commands::Once { from_date } => handle_once(&config, &credentials, from_date).await,
        Commands::Check => handle_check(&config, &credentials),
    };

    result.context("Application failed")
}
