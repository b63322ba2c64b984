use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::domain::{ChannelQuery, ChannelRecord, Page, PageRequest, RawEntry};
use crate::errors::{YtRssError, YtRssResult};
use crate::sources::traits::VideoApi;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API v3 client.
pub struct YouTubeApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeApi {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> YtRssResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, resource))
            .map_err(|e| YtRssError::Config(format!("Invalid API base URL: {}", e)))?;

        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);

        Ok(url)
    }

    fn get(&self, url: Url) -> YtRssResult<String> {
        tracing::debug!(endpoint = url.path(), "GET");

        // The key rides in the query string; keep it out of error messages.
        let response = self.client.get(url).send().map_err(|e| e.without_url())?;
        let status = response.status();
        let body = response.text().map_err(|e| e.without_url())?;

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        Ok(body)
    }
}

impl VideoApi for YouTubeApi {
    fn lookup_channels(&self, query: &ChannelQuery) -> YtRssResult<Vec<ChannelRecord>> {
        let filter = match query {
            ChannelQuery::ByUsername(name) => ("forUsername", name.as_str()),
            ChannelQuery::ById(id) => ("id", id.as_str()),
        };

        let url = self.endpoint("channels", &[("part", "id,snippet,contentDetails"), filter])?;
        parse_channels(&self.get(url)?)
    }

    fn list_playlist_page(&self, request: &PageRequest) -> YtRssResult<Page> {
        let max_results = request.max_results.to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", request.playlist_id.as_str()),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = request.page_token.as_deref() {
            params.push(("pageToken", token));
        }

        let url = self.endpoint("playlistItems", &params)?;
        parse_playlist_page(&self.get(url)?)
    }
}

/// 5xx answers are transient; everything else is final.
fn error_for_status(status: StatusCode, body: &str) -> YtRssError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

    if status.is_server_error() {
        YtRssError::Transient {
            status: status.as_u16(),
            message,
        }
    } else {
        YtRssError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn parse_channels(body: &str) -> YtRssResult<Vec<ChannelRecord>> {
    let response: ChannelListResponse = serde_json::from_str(body)?;

    Ok(response
        .items
        .into_iter()
        .map(|item| ChannelRecord {
            id: item.id,
            title: item.snippet.map(|s| s.title),
            uploads_playlist: item
                .content_details
                .and_then(|c| c.related_playlists.uploads),
        })
        .collect())
}

fn parse_playlist_page(body: &str) -> YtRssResult<Page> {
    let response: PlaylistItemListResponse = serde_json::from_str(body)?;

    let entries = response
        .items
        .into_iter()
        .map(|item| {
            let published_at = item
                .content_details
                .and_then(|c| c.video_published_at)
                .unwrap_or(item.snippet.published_at);

            RawEntry {
                video_id: item.snippet.resource_id.video_id,
                title: item.snippet.title,
                description: item.snippet.description,
                published_at,
            }
        })
        .collect();

    Ok(Page {
        entries,
        next_page_token: response.next_page_token,
        total_results: response.page_info.and_then(|p| p.total_results),
    })
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    id: String,
    snippet: Option<ChannelSnippet>,
    content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemListResponse {
    next_page_token: Option<String>,
    page_info: Option<PageInfo>,
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
    content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    published_at: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_published_at: Option<String>,
}
