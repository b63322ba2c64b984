use crate::domain::{ChannelQuery, ChannelRecord, Page, PageRequest};
use crate::errors::YtRssResult;

/// The remote listing service the pipeline reads from.
#[cfg_attr(test, mockall::automock)]
pub trait VideoApi {
    /// Look up channels matching the query. Zero or many records is a
    /// valid answer; interpreting it is the caller's job.
    fn lookup_channels(&self, query: &ChannelQuery) -> YtRssResult<Vec<ChannelRecord>>;

    /// Fetch one page of a playlist.
    fn list_playlist_page(&self, request: &PageRequest) -> YtRssResult<Page>;
}
