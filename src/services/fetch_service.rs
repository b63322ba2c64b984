use crate::domain::{ChannelQuery, PageRequest, Video};
use crate::errors::{YtRssError, YtRssResult};
use crate::services::channel_service::ChannelService;
use crate::services::retry::{RetryPolicy, Sleeper};
use crate::sources::VideoApi;

/// Everything one walk over a channel's uploads produced.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub videos: Vec<Video>,
    /// Total the server reported on the first page. Advisory only.
    pub reported_total: u64,
    pub pages: usize,
    pub skipped: usize,
    /// Paging ended at the result cap rather than at the last page.
    pub stopped_early: bool,
    pub channel_title: Option<String>,
}

pub struct FetchService<'a, A: VideoApi + ?Sized> {
    api: &'a A,
    retry: RetryPolicy,
    sleeper: &'a dyn Sleeper,
}

impl<'a, A: VideoApi + ?Sized> FetchService<'a, A> {
    pub fn new(api: &'a A, retry: RetryPolicy, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            api,
            retry,
            sleeper,
        }
    }

    /// Walk the channel's upload playlist page by page.
    ///
    /// With `result_cap > 0`, paging stops as soon as more than `result_cap`
    /// videos are held. The overshoot is left for the caller to trim.
    pub fn fetch(&self, channel_id: &str, result_cap: usize) -> YtRssResult<FetchResult> {
        let channel = ChannelService::new(self.api)
            .lookup_one(&ChannelQuery::ById(channel_id.to_string()))?;
        let playlist_id = channel
            .uploads_playlist
            .filter(|p| !p.is_empty())
            .ok_or_else(|| YtRssError::NoUploads(channel_id.to_string()))?;

        tracing::debug!(channel_id, playlist_id = %playlist_id, "Found uploads playlist");

        let mut result = FetchResult {
            channel_title: channel.title,
            ..FetchResult::default()
        };
        let mut request = PageRequest::first(&playlist_id);

        loop {
            let page = self
                .retry
                .run(self.sleeper, || self.api.list_playlist_page(&request))?;
            result.pages += 1;

            if result.pages == 1 {
                result.reported_total = page.total_results.unwrap_or_default();
            }

            let is_last = page.is_last();
            for entry in page.entries {
                match Video::from_entry(entry)? {
                    Some(video) => result.videos.push(video),
                    None => {
                        tracing::debug!("Skipping entry without a video id");
                        result.skipped += 1;
                    }
                }
            }

            tracing::debug!(page = result.pages, videos = result.videos.len(), "Fetched page");

            if result_cap > 0 && result.videos.len() > result_cap {
                tracing::debug!(result_cap, "Result cap reached, not fetching further pages");
                result.stopped_early = !is_last;
                break;
            }

            match page.next_page_token {
                Some(token) if !is_last => request = request.next(token),
                _ => break,
            }
        }

        Ok(result)
    }
}
