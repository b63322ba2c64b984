use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(name = "ytrss")]
#[command(about = "Generate an RSS feed from all videos of a YouTube channel")]
#[command(version)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["channel", "channel_id", "url"]),
))]
pub struct Cli {
    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// YouTube Data API key
    #[arg(short = 'k', long = "apikey", env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// YouTube channel / username to look up
    #[arg(short, long)]
    pub channel: Option<String>,

    /// YouTube channel ID (UC...), skips the username lookup
    #[arg(short = 'i', long)]
    pub channel_id: Option<String>,

    /// Channel URL of the form https://www.youtube.com/channel/UC...
    #[arg(short, long)]
    pub url: Option<String>,

    /// Keep only the N most recent videos (0 or less means all)
    #[arg(
        short = 'n',
        long = "max-results",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub max_results: i64,

    /// Write the feed to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
