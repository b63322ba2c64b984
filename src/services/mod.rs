pub mod aggregate_service;
pub mod channel_service;
pub mod collate;
pub mod feed_service;
pub mod fetch_service;
pub mod retry;

pub use aggregate_service::{AggregateService, Outcome, RunReport};
pub use channel_service::ChannelService;
pub use fetch_service::{FetchResult, FetchService};
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
