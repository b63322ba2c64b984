use thiserror::Error;

#[derive(Error, Debug)]
pub enum YtRssError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Channel errors
    #[error("Didn't find exactly one channel for '{query}': found {found}")]
    AmbiguousChannel { query: String, found: usize },

    #[error("Channel {0} has no uploads playlist")]
    NoUploads(String),

    // API errors
    #[error("Transient server error ({status}): {message}")]
    Transient { status: u16, message: String },

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Giving up after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<YtRssError>,
    },

    // Network errors
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Invalid API response")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Feed serialization failed")]
    Feed(#[from] rss::Error),

    // IO errors
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type YtRssResult<T> = Result<T, YtRssError>;
