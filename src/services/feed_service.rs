use std::io::Write;

use chrono::{DateTime, Utc};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::domain::Video;
use crate::errors::YtRssResult;

pub const FEED_TITLE_PREFIX: &str = "YtChannelRss: ";
pub const FEED_DESCRIPTION: &str = "RSS Feed Auto-Generated by YtChannelRss for Youtube Channels";
pub const GENERATOR: &str = concat!("ytrss ", env!("CARGO_PKG_VERSION"));

/// Build the feed document for a channel, stamped with the current time.
pub fn assemble(channel_label: &str, videos: &[Video]) -> Channel {
    assemble_at(channel_label, videos, Utc::now())
}

pub fn assemble_at(channel_label: &str, videos: &[Video], built_at: DateTime<Utc>) -> Channel {
    let items: Vec<Item> = videos.iter().map(to_item).collect();

    ChannelBuilder::default()
        .title(format!("{}{}", FEED_TITLE_PREFIX, channel_label))
        .link(String::new())
        .description(FEED_DESCRIPTION.to_string())
        .generator(Some(GENERATOR.to_string()))
        .last_build_date(Some(built_at.to_rfc2822()))
        .items(items)
        .build()
}

fn to_item(video: &Video) -> Item {
    // Timestamps carry no zone; they are rendered as UTC unchanged.
    let published = video.published_at.and_utc().to_rfc2822();

    ItemBuilder::default()
        .title(Some(video.title.clone()))
        .link(Some(video.url.clone()))
        .description(Some(video.description.clone()))
        .guid(Some(
            GuidBuilder::default()
                .value(video.url.clone())
                .permalink(true)
                .build(),
        ))
        .pub_date(Some(published))
        .build()
}

/// Serialize the whole document to `out`.
pub fn write_feed<W: Write>(channel: &Channel, mut out: W) -> YtRssResult<()> {
    let out = channel.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
