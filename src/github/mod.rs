pub mod collect;
pub mod fetch;

pub use collect::{commit_refs, PublicEventsCollector};
pub use fetch::HttpJsonFetcher;
