use chrono::NaiveDateTime;

use super::page::RawEntry;
use crate::errors::{YtRssError, YtRssResult};

const WATCH_URL: &str = "http://www.youtube.com/watch?v=";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: NaiveDateTime,
}

impl Video {
    pub fn new(id: &str, title: &str, published_at: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            url: watch_url(id),
            published_at,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Build a video from a listing entry. Entries without a video id
    /// (deleted or private uploads) yield `None`.
    pub fn from_entry(entry: RawEntry) -> YtRssResult<Option<Self>> {
        let Some(id) = entry.video_id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        Ok(Some(Self {
            url: watch_url(&id),
            published_at: parse_published(&entry.published_at)?,
            id,
            title: entry.title,
            description: entry.description,
        }))
    }
}

/// Canonical viewing link for a video id.
pub fn watch_url(id: &str) -> String {
    format!("{}{}", WATCH_URL, id)
}

/// Parse `2013-05-18T01:43:21.000Z` as `2013-05-18T01:43:21`.
///
/// Fractional seconds and any zone suffix are dropped, not converted.
pub fn parse_published(value: &str) -> YtRssResult<NaiveDateTime> {
    let invalid = |reason: String| YtRssError::InvalidTimestamp {
        value: value.to_string(),
        reason,
    };

    let truncated = value
        .get(..19)
        .ok_or_else(|| invalid("shorter than YYYY-MM-DDTHH:MM:SS".to_string()))?;

    NaiveDateTime::parse_from_str(truncated, TIMESTAMP_FORMAT).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 5, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("dQw4w9WgXcQ"), "http://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_published_drops_fraction_and_zone() {
        assert_eq!(parse_published("2013-05-18T01:43:21.000Z").unwrap(), at(1, 43, 21));
        assert_eq!(parse_published("2013-05-18T01:43:21Z").unwrap(), at(1, 43, 21));
        assert_eq!(parse_published("2013-05-18T01:43:21+05:00").unwrap(), at(1, 43, 21));
        assert_eq!(parse_published("2013-05-18T01:43:21").unwrap(), at(1, 43, 21));
    }

    #[test]
    fn test_parse_published_rejects_garbage() {
        assert!(matches!(
            parse_published("2013-05-18"),
            Err(YtRssError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            parse_published("not a timestamp at all"),
            Err(YtRssError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_from_entry_maps_every_field() {
        let entry = RawEntry {
            video_id: Some("abc".to_string()),
            title: "First upload".to_string(),
            description: "Hello <b>world</b>".to_string(),
            published_at: "2013-05-18T01:43:21.000Z".to_string(),
        };

        let video = Video::from_entry(entry).unwrap().unwrap();

        assert_eq!(video.id, "abc");
        assert_eq!(video.title, "First upload");
        assert_eq!(video.description, "Hello <b>world</b>");
        assert_eq!(video.url, "http://www.youtube.com/watch?v=abc");
        assert_eq!(video.published_at, at(1, 43, 21));
    }

    #[test]
    fn test_from_entry_skips_missing_id() {
        let entry = RawEntry {
            video_id: None,
            title: "Deleted video".to_string(),
            ..RawEntry::default()
        };
        assert!(Video::from_entry(entry).unwrap().is_none());
    }

    #[test]
    fn test_url_is_function_of_id() {
        let a = Video::new("same", "one", at(1, 0, 0));
        let b = Video::new("same", "two", at(2, 0, 0));
        assert_eq!(a.url, b.url);
        assert_ne!(a.url, Video::new("other", "one", at(1, 0, 0)).url);
    }
}
