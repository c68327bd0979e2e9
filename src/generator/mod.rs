//! Generator module - builds the static site from the content API
//!
//! All content queries are sequential awaits; any failure aborts the
//! build. The listing page gets the first page of posts, post pages are
//! pre-rendered up to the configured static path limit, and every other
//! slug is left to the server fallback.

use anyhow::Result;
use std::fs;
use tera::Context;

use crate::content::loader::PostLoader;
use crate::content::{Post, PostSummary};
use crate::helpers::{display_date, edited_stamp, DateLocale};
use crate::listing::ListingFeed;
use crate::templates::{NavPost, SiteContext, TemplateRenderer, STYLESHEET};
use crate::Starlog;

/// Static site generator using the embedded voyager theme
pub struct Generator {
    app: Starlog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Starlog) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.app.public_dir)?;
        self.write_assets()?;

        let client = self.app.cms_client();

        // Listing page: the build-time first page of posts
        let feed = ListingFeed::build(&client, &self.app.config).await?;
        let html = self.render_index(&feed)?;
        fs::write(self.app.public_dir.join("index.html"), html)?;
        tracing::info!("Generated listing page ({} posts)", feed.entries().len());

        // Post pages, up to the static path limit
        let loader = PostLoader::new(&client, &self.app.config);
        let uids = loader.static_paths().await?;
        let mut generated = 0;
        for uid in &uids {
            let Some(post) = loader.resolve(uid, None).await? else {
                tracing::warn!("Post {} vanished between enumeration and fetch", uid);
                continue;
            };
            let (previous, next) = loader.neighbors(&post).await?;
            self.write_post_page(&post, previous.as_ref(), next.as_ref())?;
            generated += 1;
        }
        tracing::info!("Generated {} post pages", generated);

        Ok(())
    }

    /// Render the listing page
    ///
    /// The load-more control is only emitted while a continuation cursor
    /// exists; an exhausted listing renders without it.
    pub fn render_index(&self, feed: &ListingFeed) -> Result<String> {
        let mut context = self.base_context();
        context.insert("page_title", &self.app.config.title);
        context.insert("entries", feed.entries());
        context.insert("next_page", &feed.next_page());
        self.renderer.render("index.html", &context)
    }

    /// Render a single post page
    pub fn render_post_page(
        &self,
        post: &Post,
        previous: Option<&PostSummary>,
        next: Option<&PostSummary>,
        preview: bool,
    ) -> Result<String> {
        let locale = self.locale();

        let mut context = self.base_context();
        context.insert("page_title", &post.data.title);
        context.insert("title", &post.data.title);
        context.insert("uid", &post.uid);
        context.insert("author", &post.data.author);
        context.insert(
            "banner_url",
            &post.data.banner.as_ref().map(|b| b.url.as_str()),
        );
        context.insert(
            "display_date",
            &post
                .first_publication_date
                .map(|d| display_date(&d, locale)),
        );
        context.insert("reading_time", &post.reading_time());
        context.insert(
            "edited",
            &if post.was_edited() {
                post.last_publication_date
                    .map(|d| edited_stamp(&d, locale))
            } else {
                None
            },
        );
        context.insert("body", &post.body_html());
        context.insert("previous", &previous.map(nav_post));
        context.insert("next", &next.map(nav_post));
        context.insert("preview", &preview);

        self.renderer.render("post.html", &context)
    }

    /// Render a post page and persist it under `public/post/<uid>/`
    pub fn write_post_page(
        &self,
        post: &Post,
        previous: Option<&PostSummary>,
        next: Option<&PostSummary>,
    ) -> Result<()> {
        let html = self.render_post_page(post, previous, next, false)?;
        let output_path = self
            .app
            .public_dir
            .join("post")
            .join(&post.uid)
            .join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated post: {:?}", output_path);
        Ok(())
    }

    /// Write embedded theme assets into the public directory
    fn write_assets(&self) -> Result<()> {
        let css_dir = self.app.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("main.css"), STYLESHEET)?;
        Ok(())
    }

    fn locale(&self) -> DateLocale {
        DateLocale::from_tag(&self.app.config.language)
    }

    fn base_context(&self) -> Context {
        let config = &self.app.config;
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteContext {
                title: config.title.clone(),
                subtitle: config.subtitle.clone(),
                description: config.description.clone(),
                author: config.author.clone(),
                url: config.url.clone(),
                language: config.language.clone(),
            },
        );
        context
    }
}

fn nav_post(summary: &PostSummary) -> NavPost {
    NavPost {
        title: summary.title.clone(),
        path: summary.path(),
    }
}
