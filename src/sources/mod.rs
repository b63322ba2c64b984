pub mod traits;
pub mod youtube;

pub use traits::VideoApi;
pub use youtube::YouTubeApi;
