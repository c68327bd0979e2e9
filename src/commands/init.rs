//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
///
/// Writes a starter `_config.yml`; the content API endpoint and the
/// comment repository must be filled in before generating.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_content = r#"# Starlog Configuration

# Site
title: Starlog
subtitle: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com

# Directory
public_dir: public

# Content source
cms:
  # Base URL of the content API, e.g. https://your-repo.cdn.example.io/api/v2
  api_url: ''
  document_type: posts
  page_size: 2
  static_path_limit: 10

# Comment widget
comments:
  # GitHub repository backing the comment threads, owner/name
  repo: ''
  issue_term: pathname
  theme: photon-dark
  label: comment
"#;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, config_content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_parseable_config() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let config = crate::config::SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.cms.page_size, 2);
        assert_eq!(config.comments.issue_term, "pathname");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
