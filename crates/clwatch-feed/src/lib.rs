//! Feed handling for clwatch: fetching and parsing the listing RSS feed, and
//! the persistent dedup store that decides which listings are new across runs.

mod error;
mod fetch;
mod listing;
mod store;

pub use error::FeedError;
pub use fetch::FeedClient;
pub use listing::Listing;
pub use store::FeedStore;
