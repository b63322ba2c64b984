use crate::domain::{ChannelQuery, ChannelRecord};
use crate::errors::{YtRssError, YtRssResult};
use crate::sources::VideoApi;

pub struct ChannelService<'a, A: VideoApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: VideoApi + ?Sized> ChannelService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Map a channel display name to its identifier with a single lookup.
    pub fn resolve(&self, channel_name: &str) -> YtRssResult<String> {
        if channel_name.trim().is_empty() {
            return Err(YtRssError::InvalidInput(
                "Channel name must not be empty".to_string(),
            ));
        }

        let record = self.lookup_one(&ChannelQuery::ByUsername(channel_name.to_string()))?;
        tracing::debug!(channel = channel_name, channel_id = %record.id, "Resolved channel");

        Ok(record.id)
    }

    /// Run a channel lookup that must match exactly one channel.
    pub fn lookup_one(&self, query: &ChannelQuery) -> YtRssResult<ChannelRecord> {
        let mut records = self.api.lookup_channels(query)?;

        if records.len() != 1 {
            return Err(YtRssError::AmbiguousChannel {
                query: query.value().to_string(),
                found: records.len(),
            });
        }

        Ok(records.remove(0))
    }
}
