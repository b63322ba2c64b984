use std::cmp::Reverse;

use crate::domain::Video;

/// Remove repeated videos, keeping the first one retrieved.
///
/// Entries are ordered by url so that every repeat sits next to its first
/// occurrence, then a single adjacent-pair pass drops the repeats. The
/// survivors come back in retrieval order.
pub fn dedup(videos: Vec<Video>) -> Vec<Video> {
    let before = videos.len();

    let mut indexed: Vec<(usize, Video)> = videos.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| b.url.cmp(&a.url).then(ia.cmp(ib)));
    indexed.dedup_by(|later, earlier| later.1.url == earlier.1.url);
    indexed.sort_by_key(|(index, _)| *index);

    let removed = before - indexed.len();
    if removed > 0 {
        tracing::debug!(removed, "Removed duplicate videos");
    }

    indexed.into_iter().map(|(_, video)| video).collect()
}

/// Order most recent first and keep at most `result_cap` videos.
/// A cap of zero means no limit. Equal timestamps keep their input order.
pub fn finalize(mut videos: Vec<Video>, result_cap: usize) -> Vec<Video> {
    videos.sort_by_key(|video| Reverse(video.published_at));

    if result_cap > 0 && videos.len() > result_cap {
        videos.truncate(result_cap);
    }

    videos
}

/// Convert a user supplied cap where anything not positive means unlimited.
pub fn cap_from_signed(max_results: i64) -> usize {
    usize::try_from(max_results).unwrap_or(0)
}
