//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::comments::CommentConfig;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub public_dir: String,

    // Content source
    pub cms: CmsConfig,

    // Comment widget
    pub comments: CommentConfig,
}

/// Content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the content API
    pub api_url: String,
    /// Document type queried for posts
    pub document_type: String,
    /// Listing page size
    pub page_size: usize,
    /// How many posts are pre-rendered at build time; the rest resolve
    /// on first request through the server fallback
    pub static_path_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Starlog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            public_dir: "public".to_string(),

            cms: CmsConfig::default(),
            comments: CommentConfig::default(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            document_type: "posts".to_string(),
            page_size: 2,
            static_path_limit: 10,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Field list requested by listing queries
    pub fn listing_fetch_fields(&self) -> Vec<String> {
        let doc_type = &self.cms.document_type;
        vec![
            format!("{}.title", doc_type),
            format!("{}.subtitle", doc_type),
            format!("{}.author", doc_type),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Starlog");
        assert_eq!(config.cms.page_size, 2);
        assert_eq!(config.cms.static_path_limit, 10);
        assert_eq!(config.cms.document_type, "posts");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
language: pt-br
cms:
  api_url: https://cms.example.com/api/v2
  page_size: 5
comments:
  repo: acme/blog-comments
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.language, "pt-br");
        assert_eq!(config.cms.api_url, "https://cms.example.com/api/v2");
        assert_eq!(config.cms.page_size, 5);
        // Unset fields keep their defaults
        assert_eq!(config.cms.static_path_limit, 10);
        assert_eq!(config.comments.repo, "acme/blog-comments");
        assert_eq!(config.comments.issue_term, "pathname");
    }

    #[test]
    fn test_listing_fetch_fields() {
        let config = SiteConfig::default();
        assert_eq!(
            config.listing_fetch_fields(),
            vec!["posts.title", "posts.subtitle", "posts.author"]
        );
    }
}
