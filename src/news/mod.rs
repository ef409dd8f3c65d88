//! News search client and article normalization

pub mod fetcher;
pub mod record;

pub use fetcher::{NewsFetcher, PAGE_SIZE};
pub use record::NewsRecord;
