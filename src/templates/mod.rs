//! Built-in theme templates using the Tera template engine
//!
//! All templates of the voyager theme are embedded directly in the
//! binary; a site needs nothing on disk besides its `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Stylesheet written to `css/main.css` at generation time
pub const STYLESHEET: &str = include_str!("voyager/css/main.css");

/// Site-wide template data
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub language: String,
}

/// Previous/next navigation link on a post page
#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

/// Template renderer with the embedded voyager theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all voyager templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("voyager/layout.html")),
            ("index.html", include_str!("voyager/index.html")),
            ("post.html", include_str!("voyager/post.html")),
            (
                "partials/head.html",
                include_str!("voyager/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("voyager/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("voyager/partials/footer.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteContext {
        SiteContext {
            title: "Starlog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "Ada".to_string(),
            url: "http://example.com".to_string(),
            language: "en".to_string(),
        }
    }

    #[test]
    fn test_templates_parse() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_layout_escapes_titles() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("page_title", "a < b");
        context.insert("entries", &Vec::<u8>::new());
        context.insert("next_page", &Option::<String>::None);
        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("a &lt; b"));
    }
}
