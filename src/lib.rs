//! starlog: a static blog generator backed by a headless CMS
//!
//! Posts live in a hosted content source and are fetched over its query
//! API at build time. The generator renders a paginated listing page and
//! individual post pages with embedded Tera templates; the bundled
//! server adds on-demand rendering for slugs outside the pre-rendered
//! set, preview-mode sessions, and comment-widget attachment.

pub mod cms;
pub mod comments;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use cms::CmsClient;

/// The main Starlog application
#[derive(Clone)]
pub struct Starlog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Starlog {
    /// Create a new Starlog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Client for the configured content API
    pub fn cms_client(&self) -> CmsClient {
        CmsClient::new(&self.config.cms.api_url)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
