use regex::Regex;
use url::Url;

use crate::errors::{YtRssError, YtRssResult};

/// How the caller identified the channel on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Name(String),
    Id(String),
}

impl ChannelRef {
    /// Extract the channel id from a `youtube.com/channel/UC...` URL.
    pub fn from_url(url: &str) -> YtRssResult<Self> {
        let parsed = Url::parse(url).map_err(|e| YtRssError::InvalidInput(e.to_string()))?;

        let host = parsed.host_str().unwrap_or_default();
        if host != "youtube.com" && !host.ends_with(".youtube.com") {
            return Err(YtRssError::InvalidInput(format!(
                "Not a YouTube URL: {}",
                url
            )));
        }

        let channel_regex = Regex::new(r"^/channel/(UC[\w-]{22})/?").expect("valid regex");
        match channel_regex.captures(parsed.path()) {
            Some(caps) => Ok(ChannelRef::Id(caps[1].to_string())),
            None => Err(YtRssError::InvalidInput(
                "Could not extract YouTube channel ID from URL".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelRef::Name(name) => write!(f, "{}", name),
            ChannelRef::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Query sent to the channel lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelQuery {
    ByUsername(String),
    ById(String),
}

impl ChannelQuery {
    pub fn value(&self) -> &str {
        match self {
            ChannelQuery::ByUsername(name) => name,
            ChannelQuery::ById(id) => id,
        }
    }
}

/// One record returned by a channel lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRecord {
    pub id: String,
    pub title: Option<String>,
    pub uploads_playlist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: Option<String>,
}

impl Channel {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    /// Text used to title the feed.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_extracts_channel_id() {
        let channel = ChannelRef::from_url(
            "https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw",
        )
        .unwrap();
        assert_eq!(
            channel,
            ChannelRef::Id("UC_x5XG1OV2P6uZZ5FSM9Ttw".to_string())
        );

        let channel =
            ChannelRef::from_url("https://youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw/videos")
                .unwrap();
        assert_eq!(
            channel,
            ChannelRef::Id("UC_x5XG1OV2P6uZZ5FSM9Ttw".to_string())
        );
    }

    #[test]
    fn test_from_url_rejects_other_urls() {
        assert!(ChannelRef::from_url("https://www.youtube.com/@handle").is_err());
        assert!(ChannelRef::from_url("https://example.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw").is_err());
        assert!(ChannelRef::from_url("not a url").is_err());
    }

    #[test]
    fn test_display_shows_bare_name_or_id() {
        assert_eq!(ChannelRef::Name("GoogleDevelopers".to_string()).to_string(), "GoogleDevelopers");
        assert_eq!(ChannelRef::Id("UCxyz".to_string()).to_string(), "UCxyz");
    }

    #[test]
    fn test_label_prefers_name() {
        let channel = Channel::new("UCxyz").with_name(Some("GoogleDevelopers".to_string()));
        assert_eq!(channel.label(), "GoogleDevelopers");

        let channel = Channel::new("UCxyz").with_name(Some(String::new()));
        assert_eq!(channel.label(), "UCxyz");
    }
}
