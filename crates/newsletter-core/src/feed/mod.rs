mod clean;
mod fetcher;
mod models;
mod parser;

pub use clean::clean_markup;
pub use fetcher::{FeedFetcher, FeedSource};
pub use models::{Article, RawItem};
pub use parser::{extract_article, parse_feed, parse_items};
