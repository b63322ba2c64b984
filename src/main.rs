use std::fs;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ytrss::cli::Cli;
use ytrss::config::Config;
use ytrss::services::feed_service::write_feed;
use ytrss::services::{AggregateService, Outcome, ThreadSleeper};
use ytrss::sources::YouTubeApi;

/// Exit status when the channel has no videos to put in a feed.
const EXIT_EMPTY: u8 = 3;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    Config::load_env_file();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(cli)?;
    tracing::debug!(api_key = %config.masked_api_key(), channel = %config.channel, "Starting");

    let api = YouTubeApi::new(&config.api_key, &config.api_base);
    let service = AggregateService::new(&api, config.retry, &ThreadSleeper, config.verbose);

    let document = match service.run(&config.channel, config.result_cap)? {
        Outcome::Feed { document, .. } => document,
        Outcome::Empty { .. } => {
            eprintln!("No videos found for {}", config.channel);
            return Ok(ExitCode::from(EXIT_EMPTY));
        }
    };

    // Serialize fully before touching the destination.
    let mut xml = Vec::new();
    write_feed(&document, &mut xml)?;
    xml.push(b'\n');

    match &config.output {
        Some(path) => {
            fs::write(path, &xml)
                .with_context(|| format!("Failed to write feed to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote feed");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&xml)?;
            stdout.flush()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Diagnostics go to stderr only; stdout carries nothing but the feed.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "ytrss=debug" } else { "ytrss=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
