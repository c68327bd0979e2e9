//! HTTP client for the content API
//!
//! All calls are single sequential requests: no retry, no timeout
//! override, no concurrency control. A failed call at build time is fatal
//! to generation; interactive callers decide for themselves.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::predicate::{to_query_param, Predicate};
use super::PostPagination;
use crate::content::Post;

/// Error type for content API calls
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("could not decode content API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Options for a search query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Restrict returned document fields, e.g. `posts.title`
    pub fetch: Vec<String>,
    /// Page size; the API default applies when zero
    pub page_size: usize,
    /// Result ordering, e.g. `[document.first_publication_date desc]`
    pub orderings: Option<String>,
    /// Preview ref; switches the query to the draft revision space
    pub preview_ref: Option<String>,
}

/// Client for the content API's document search endpoint
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_url: String,
}

impl CmsClient {
    /// Create a client for the given API base URL
    pub fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run a search query and return one page of results
    pub async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<PostPagination<Post>, CmsError> {
        let url = format!("{}/documents/search", self.api_url);

        let mut params: Vec<(&str, String)> = vec![("q", to_query_param(predicates))];
        if !options.fetch.is_empty() {
            params.push(("fetch", options.fetch.join(",")));
        }
        if options.page_size > 0 {
            params.push(("pageSize", options.page_size.to_string()));
        }
        if let Some(orderings) = &options.orderings {
            params.push(("orderings", orderings.clone()));
        }
        if let Some(preview_ref) = &options.preview_ref {
            params.push(("ref", preview_ref.clone()));
        }

        tracing::debug!("Querying content API: {} {:?}", url, params);

        let response = self.http.get(&url).query(&params).send().await?;
        decode(response).await
    }

    /// Run a top-1 query; an empty result is `None`, never an error
    pub async fn query_first(
        &self,
        predicates: &[Predicate],
        orderings: Option<&str>,
    ) -> Result<Option<Post>, CmsError> {
        let options = QueryOptions {
            page_size: 1,
            orderings: orderings.map(str::to_string),
            ..QueryOptions::default()
        };
        let mut page = self.query(predicates, &options).await?;
        Ok(if page.results.is_empty() {
            None
        } else {
            Some(page.results.remove(0))
        })
    }

    /// Fetch exactly one document by uid
    ///
    /// In preview mode the preview ref is forwarded so the draft revision
    /// is returned instead of the published one.
    pub async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<Post>, CmsError> {
        let predicates = [Predicate::at(&format!("my.{}.uid", doc_type), uid)];
        let options = QueryOptions {
            page_size: 1,
            preview_ref: preview_ref.map(str::to_string),
            ..QueryOptions::default()
        };
        let mut page = self.query(&predicates, &options).await?;
        Ok(if page.results.is_empty() {
            None
        } else {
            Some(page.results.remove(0))
        })
    }

    /// Fetch a continuation page through its opaque `next_page` URL
    ///
    /// The cursor is whatever URL the previous page carried; it is fetched
    /// as-is and expected to return the same pagination shape.
    pub async fn fetch_page(&self, next_page_url: &str) -> Result<PostPagination<Post>, CmsError> {
        tracing::debug!("Fetching continuation page: {}", next_page_url);
        let response = self.http.get(next_page_url).send().await?;
        decode(response).await
    }
}

/// Check the status and decode a JSON response body
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CmsError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CmsError::Status {
            status,
            url: response.url().to_string(),
        });
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
