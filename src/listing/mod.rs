//! Post listing feed with incremental load-more
//!
//! The feed holds the listing in display order: the build-time first page
//! plus any pages appended afterwards. Loading more is cursor driven; the
//! opaque `next_page` URL from the last applied page is fetched and its
//! results appended. Entries are never reordered or deduplicated - if the
//! content source returns overlapping pages, duplicates appear as-is.
//!
//! Every load is issued against a sequence number snapshot. A response
//! whose snapshot no longer matches the feed is stale (another load was
//! applied in between) and is discarded instead of applied, so pages can
//! never land out of order.

use serde::Serialize;

use crate::cms::{CmsClient, CmsError, PostPagination, Predicate, QueryOptions};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{display_date, DateLocale};

/// One listing entry, carrying its localized display date
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry {
    pub uid: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    /// Localized "d MMM yyyy" string; `None` for unpublished drafts
    pub display_date: Option<String>,
}

impl ListingEntry {
    fn from_post(post: &Post, locale: DateLocale) -> Self {
        Self {
            uid: post.uid.clone(),
            title: post.data.title.clone(),
            subtitle: post.data.subtitle.clone(),
            author: post.data.author.clone(),
            display_date: post
                .first_publication_date
                .map(|d| display_date(&d, locale)),
        }
    }
}

/// A pending load: the cursor to fetch plus the feed state it was
/// issued against
#[derive(Debug, Clone)]
pub struct LoadTicket {
    cursor: String,
    seq: u64,
}

impl LoadTicket {
    /// The opaque continuation URL to fetch
    pub fn cursor(&self) -> &str {
        &self.cursor
    }
}

/// The post listing in display order
#[derive(Debug)]
pub struct ListingFeed {
    entries: Vec<ListingEntry>,
    next_page: Option<String>,
    seq: u64,
    locale: DateLocale,
}

impl ListingFeed {
    /// Build the initial feed: one listing query against the content API
    pub async fn build(client: &CmsClient, config: &SiteConfig) -> Result<Self, CmsError> {
        let options = QueryOptions {
            fetch: config.listing_fetch_fields(),
            page_size: config.cms.page_size,
            ..QueryOptions::default()
        };
        let page = client
            .query(
                &[Predicate::at(
                    "document.type",
                    &config.cms.document_type,
                )],
                &options,
            )
            .await?;

        Ok(Self::from_pagination(
            page,
            DateLocale::from_tag(&config.language),
        ))
    }

    /// Build a feed from an already-fetched first page
    pub fn from_pagination(page: PostPagination<Post>, locale: DateLocale) -> Self {
        let entries = page
            .results
            .iter()
            .map(|p| ListingEntry::from_post(p, locale))
            .collect();
        Self {
            entries,
            next_page: page.next_page,
            seq: 0,
            locale,
        }
    }

    /// Entries in display order
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    /// Current continuation cursor, `None` once the listing is exhausted
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Whether a further page can be loaded
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Start a load: snapshot the cursor and current sequence
    ///
    /// Returns `None` when the listing is exhausted - there is nothing
    /// left to fetch and the load-more control should not exist.
    pub fn begin_load(&self) -> Option<LoadTicket> {
        self.next_page.as_ref().map(|cursor| LoadTicket {
            cursor: cursor.clone(),
            seq: self.seq,
        })
    }

    /// Apply a fetched page for a previously issued ticket
    ///
    /// Appends the page's results after the existing entries and replaces
    /// the cursor. A stale ticket (the feed advanced since it was issued)
    /// is discarded and `false` is returned; the feed is left untouched.
    pub fn apply(&mut self, ticket: LoadTicket, page: PostPagination<Post>) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!(
                "Discarding stale listing page (ticket seq {}, feed seq {})",
                ticket.seq,
                self.seq
            );
            return false;
        }

        self.seq += 1;
        self.entries.extend(
            page.results
                .iter()
                .map(|p| ListingEntry::from_post(p, self.locale)),
        );
        self.next_page = page.next_page;
        true
    }

    /// Fetch and append at most one page
    ///
    /// Returns `Ok(true)` when a page was appended and `Ok(false)` when
    /// the listing was already exhausted. On error the feed is untouched
    /// and the call can simply be repeated.
    pub async fn load_more(&mut self, client: &CmsClient) -> Result<bool, CmsError> {
        let Some(ticket) = self.begin_load() else {
            return Ok(false);
        };
        let page = client.fetch_page(ticket.cursor()).await?;
        Ok(self.apply(ticket, page))
    }
}
