//! Weighted multi-field fuzzy post search
//!
//! Builds an ephemeral in-memory index from a snapshot of the post
//! collection and ranks posts against a query, combining typo-tolerant
//! match scores from weighted fields into a single relevance order.

pub mod engine;
pub mod fuzzy;
pub mod parser;
pub mod ranking;

pub use engine::SearchIndex;
pub use parser::SearchQuery;
