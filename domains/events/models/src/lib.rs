pub mod events;
pub mod feed;

pub use events::EventRecord;
pub use feed::{EventFeedBody, extract_feed_data};
