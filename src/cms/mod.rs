//! Content API client
//!
//! The content source exposes a predicate-filtered document search with
//! cursor pagination: each page carries an opaque `next_page` URL, null
//! once the listing is exhausted.

mod client;
mod predicate;

pub use client::{CmsClient, CmsError, QueryOptions};
pub use predicate::Predicate;

use serde::{Deserialize, Serialize};

/// One page of query results
///
/// Result order is assigned by the content source and is significant;
/// `next_page` is an opaque continuation URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPagination<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    pub results: Vec<T>,
}
