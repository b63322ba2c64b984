use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::domain::ChannelRef;
use crate::errors::{YtRssError, YtRssResult};
use crate::services::collate::cap_from_signed;
use crate::services::retry::RetryPolicy;
use crate::sources::youtube::DEFAULT_API_BASE;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub channel: ChannelRef,
    pub result_cap: usize,
    pub verbose: bool,
    pub output: Option<PathBuf>,
    pub api_base: String,
    pub retry: RetryPolicy,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Load `.env` next to the executable, then from the current directory.
    /// Real environment variables take precedence.
    pub fn load_env_file() {
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        dotenvy::dotenv().ok();
    }

    pub fn from_cli(cli: Cli) -> YtRssResult<Self> {
        Self::from_parts(cli, |key| std::env::var(key).ok())
    }

    fn from_parts<F>(cli: Cli, env: F) -> YtRssResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = cli
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| YtRssError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))?;

        let channel = match (cli.channel, cli.channel_id, cli.url) {
            (Some(name), None, None) => ChannelRef::Name(name),
            (None, Some(id), None) => ChannelRef::Id(id),
            (None, None, Some(url)) => ChannelRef::from_url(&url)?,
            _ => {
                return Err(YtRssError::InvalidInput(
                    "Give exactly one of --channel, --channel-id or --url".to_string(),
                ))
            }
        };

        let api_base = env("YTRSS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let mut retry = RetryPolicy::default();
        if let Some(value) = env("YTRSS_RETRY_ATTEMPTS") {
            retry.max_attempts = parse_var("YTRSS_RETRY_ATTEMPTS", &value)?;
        }
        if let Some(value) = env("YTRSS_RETRY_DELAY_SECS") {
            retry.delay = Duration::from_secs(parse_var("YTRSS_RETRY_DELAY_SECS", &value)?);
        }

        Ok(Self {
            api_key,
            channel,
            result_cap: cap_from_signed(cli.max_results),
            verbose: cli.verbose,
            output: cli.output,
            api_base,
            retry,
        })
    }

    /// The API key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let visible: String = self
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", visible)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> YtRssResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| YtRssError::Config(format!("{}={}: {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cli() -> Cli {
        Cli {
            verbose: false,
            api_key: Some("AIzaSyExampleKey1234".to_string()),
            channel: Some("GoogleDevelopers".to_string()),
            channel_id: None,
            url: None,
            max_results: 0,
            output: None,
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_parts(cli(), no_env).unwrap();

        assert_eq!(config.channel, ChannelRef::Name("GoogleDevelopers".to_string()));
        assert_eq!(config.result_cap, 0);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_missing_api_key() {
        let mut cli = cli();
        cli.api_key = None;

        let err = Config::from_parts(cli, no_env).unwrap_err();
        assert!(matches!(err, YtRssError::MissingEnvVar(ref v) if v == "YOUTUBE_API_KEY"));
    }

    #[test]
    fn test_channel_url_becomes_id() {
        let mut cli = cli();
        cli.channel = None;
        cli.url = Some("https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw".to_string());

        let config = Config::from_parts(cli, no_env).unwrap();
        assert_eq!(
            config.channel,
            ChannelRef::Id("UC_x5XG1OV2P6uZZ5FSM9Ttw".to_string())
        );
    }

    #[test]
    fn test_negative_cap_is_unlimited() {
        let mut cli = cli();
        cli.max_results = -3;

        let config = Config::from_parts(cli, no_env).unwrap();
        assert_eq!(config.result_cap, 0);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("YTRSS_API_BASE", "http://127.0.0.1:9000/youtube/v3"),
            ("YTRSS_RETRY_ATTEMPTS", "3"),
            ("YTRSS_RETRY_DELAY_SECS", "0"),
        ]);

        let config =
            Config::from_parts(cli(), |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api_base, "http://127.0.0.1:9000/youtube/v3");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay, Duration::ZERO);
    }

    #[test]
    fn test_invalid_retry_setting() {
        let err = Config::from_parts(cli(), |key| {
            (key == "YTRSS_RETRY_ATTEMPTS").then(|| "lots".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, YtRssError::Config(_)));
    }

    #[test]
    fn test_masked_api_key() {
        let config = Config::from_parts(cli(), no_env).unwrap();
        assert_eq!(config.masked_api_key(), "****1234");
    }
}
