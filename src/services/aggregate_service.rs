use rss::Channel as FeedDocument;

use crate::domain::{Channel, ChannelRef};
use crate::errors::YtRssResult;
use crate::services::channel_service::ChannelService;
use crate::services::collate::{dedup, finalize};
use crate::services::feed_service::assemble;
use crate::services::fetch_service::FetchService;
use crate::services::retry::{RetryPolicy, Sleeper};
use crate::sources::VideoApi;

/// Counts gathered along the way, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub channel_id: String,
    pub pages: usize,
    pub fetched: usize,
    pub duplicates: usize,
    pub reported_total: u64,
    pub count_mismatch: bool,
    pub items: usize,
}

#[derive(Debug)]
pub enum Outcome {
    Feed {
        document: FeedDocument,
        report: RunReport,
    },
    /// Nothing was retrieved; no document is produced.
    Empty { report: RunReport },
}

impl Outcome {
    pub fn report(&self) -> &RunReport {
        match self {
            Outcome::Feed { report, .. } | Outcome::Empty { report } => report,
        }
    }
}

/// Resolve, fetch, dedup, order and assemble, in that order.
pub struct AggregateService<'a, A: VideoApi + ?Sized> {
    api: &'a A,
    retry: RetryPolicy,
    sleeper: &'a dyn Sleeper,
    verbose: bool,
}

impl<'a, A: VideoApi + ?Sized> AggregateService<'a, A> {
    pub fn new(api: &'a A, retry: RetryPolicy, sleeper: &'a dyn Sleeper, verbose: bool) -> Self {
        Self {
            api,
            retry,
            sleeper,
            verbose,
        }
    }

    pub fn run(&self, channel_ref: &ChannelRef, result_cap: usize) -> YtRssResult<Outcome> {
        let mut channel = match channel_ref {
            ChannelRef::Name(name) => {
                let id = ChannelService::new(self.api).resolve(name)?;
                Channel::new(&id).with_name(Some(name.clone()))
            }
            ChannelRef::Id(id) => Channel::new(id),
        };
        if self.verbose {
            tracing::info!(channel_id = %channel.id, "Channel ID");
        }

        let fetched = FetchService::new(self.api, self.retry, self.sleeper)
            .fetch(&channel.id, result_cap)?;
        if channel.name.is_none() {
            channel = channel.with_name(fetched.channel_title);
        }

        let mut report = RunReport {
            channel_id: channel.id.clone(),
            pages: fetched.pages,
            fetched: fetched.videos.len(),
            reported_total: fetched.reported_total,
            ..RunReport::default()
        };

        let videos = dedup(fetched.videos);
        report.duplicates = report.fetched - videos.len();

        if report.reported_total != videos.len() as u64 {
            report.count_mismatch = true;
            let capped = if fetched.stopped_early { " (capped)" } else { "" };
            tracing::warn!(
                reported = report.reported_total,
                retrieved = videos.len(),
                "Server reported a different number of videos than were retrieved{}",
                capped
            );
        }

        let videos = finalize(videos, result_cap);
        report.items = videos.len();

        if self.verbose {
            tracing::info!(
                pages = report.pages,
                found = report.fetched,
                duplicates = report.duplicates,
                skipped = fetched.skipped,
                items = report.items,
                "Found {} videos",
                report.fetched
            );
        }

        if videos.is_empty() {
            return Ok(Outcome::Empty { report });
        }

        let document = assemble(channel.label(), &videos);
        if self.verbose {
            tracing::info!("Building RSS with {} items", document.items().len());
        }

        Ok(Outcome::Feed { document, report })
    }
}
