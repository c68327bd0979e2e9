//! Post loader - resolves posts and their neighbors from the content API

use crate::cms::{CmsClient, CmsError, Predicate, QueryOptions};
use crate::config::SiteConfig;
use crate::content::{Post, PostSummary};

/// Publication-date path used by neighbor queries
const FIRST_PUBLICATION_PATH: &str = "document.first_publication_date";

/// Loads posts from the content source
pub struct PostLoader<'a> {
    client: &'a CmsClient,
    config: &'a SiteConfig,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(client: &'a CmsClient, config: &'a SiteConfig) -> Self {
        Self { client, config }
    }

    /// Resolve a single post by slug
    ///
    /// With a preview ref the draft revision is returned instead of the
    /// published one. An unknown slug is `None`, not an error.
    pub async fn resolve(
        &self,
        slug: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<Post>, CmsError> {
        self.client
            .get_by_uid(&self.config.cms.document_type, slug, preview_ref)
            .await
    }

    /// Look up the chronological neighbors of a post
    ///
    /// Returns `(previous, next)`: the nearest posts published strictly
    /// before and strictly after this one. A post without a publication
    /// date (a draft in preview) has no neighbors and no query is issued.
    pub async fn neighbors(
        &self,
        post: &Post,
    ) -> Result<(Option<PostSummary>, Option<PostSummary>), CmsError> {
        let Some(published) = post.first_publication_date else {
            return Ok((None, None));
        };

        let type_predicate = Predicate::at("document.type", &self.config.cms.document_type);

        // Two independent top-1 fetches. Ascending order makes the
        // nearest-after post win; descending makes the nearest-before win.
        let next = self
            .client
            .query_first(
                &[
                    type_predicate.clone(),
                    Predicate::date_after(FIRST_PUBLICATION_PATH, published),
                ],
                Some("[document.first_publication_date]"),
            )
            .await?;

        let previous = self
            .client
            .query_first(
                &[
                    type_predicate,
                    Predicate::date_before(FIRST_PUBLICATION_PATH, published),
                ],
                Some("[document.first_publication_date desc]"),
            )
            .await?;

        Ok((
            previous.map(|p| p.summary()),
            next.map(|p| p.summary()),
        ))
    }

    /// Enumerate the uids pre-rendered at build time
    ///
    /// At most `static_path_limit` posts get a page ahead of time; any
    /// other slug is rendered on first request by the server fallback.
    pub async fn static_paths(&self) -> Result<Vec<String>, CmsError> {
        let page = self
            .client
            .query(
                &[Predicate::at(
                    "document.type",
                    &self.config.cms.document_type,
                )],
                &QueryOptions {
                    page_size: self.config.cms.static_path_limit,
                    ..QueryOptions::default()
                },
            )
            .await?;

        Ok(page.results.into_iter().map(|p| p.uid).collect())
    }
}
