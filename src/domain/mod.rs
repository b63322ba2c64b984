pub mod channel;
pub mod page;
pub mod video;

pub use channel::{Channel, ChannelQuery, ChannelRecord, ChannelRef};
pub use page::{Page, PageRequest, RawEntry, MAX_PAGE_SIZE};
pub use video::Video;
