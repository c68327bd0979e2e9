//! Comment widget attachment
//!
//! Post pages embed a third-party comment widget: a script element placed
//! into a per-post container div whose id is the post uid. The script is
//! not baked into the generated HTML; it is attached when the page is
//! served, through a [`Mount`] that guarantees the previous post's script
//! node is removed before a new one is inserted.

use serde::{Deserialize, Serialize};

use crate::helpers::escape_html;

/// Source URL of the comment widget loader script
pub const WIDGET_SRC: &str = "https://utteranc.es/client.js";

/// Comment widget configuration
///
/// The repository name is an explicit configuration value handed to the
/// attachment routine; nothing here reads ambient process state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// GitHub repository backing the comment threads, `owner/name`
    pub repo: String,
    /// Issue-matching strategy
    pub issue_term: String,
    /// Widget theme
    pub theme: String,
    /// Label applied to created issues
    pub label: String,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "photon-dark".to_string(),
            label: "comment".to_string(),
        }
    }
}

impl CommentConfig {
    /// Whether a repository has been configured at all
    pub fn is_enabled(&self) -> bool {
        !self.repo.is_empty()
    }
}

/// The widget script element for one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptNode {
    /// Post uid the node is keyed by
    pub uid: String,
    /// Rendered script element
    pub html: String,
}

/// Build the widget script element targeting the container of `uid`
pub fn script_element(config: &CommentConfig, uid: &str) -> ScriptNode {
    let html = format!(
        concat!(
            r#"<script>(function() {{"#,
            r#"var container = document.getElementById("{uid}");"#,
            r#"if (!container) return;"#,
            r#"var script = document.createElement("script");"#,
            r#"script.src = "{src}";"#,
            r#"script.async = true;"#,
            r#"script.setAttribute("repo", "{repo}");"#,
            r#"script.setAttribute("issue-term", "{issue_term}");"#,
            r#"script.setAttribute("label", "{label}");"#,
            r#"script.setAttribute("theme", "{theme}");"#,
            r#"script.setAttribute("crossorigin", "anonymous");"#,
            r#"container.appendChild(script);"#,
            r#"}})();</script>"#
        ),
        uid = escape_html(uid),
        src = WIDGET_SRC,
        repo = escape_html(&config.repo),
        issue_term = escape_html(&config.issue_term),
        label = escape_html(&config.label),
        theme = escape_html(&config.theme),
    );
    ScriptNode {
        uid: uid.to_string(),
        html,
    }
}

/// Scoped attachment of the widget script, keyed by post uid
///
/// At most one script node is attached at a time. Re-attaching under a
/// different uid removes the previous node first; dropping the mount
/// releases whatever is attached.
#[derive(Debug)]
pub struct Mount {
    config: CommentConfig,
    attached: Option<ScriptNode>,
}

impl Mount {
    pub fn new(config: CommentConfig) -> Self {
        Self {
            config,
            attached: None,
        }
    }

    /// Attach the widget for `uid`, replacing any previous attachment
    ///
    /// Attaching the currently attached uid again is a no-op and returns
    /// the existing node.
    pub fn attach(&mut self, uid: &str) -> &ScriptNode {
        let stale = match &self.attached {
            Some(node) => node.uid != uid,
            None => true,
        };
        if stale {
            if let Some(old) = self.attached.take() {
                tracing::debug!("Removing comment widget script for {}", old.uid);
            }
            self.attached = Some(script_element(&self.config, uid));
        }
        self.attached.as_ref().unwrap()
    }

    /// Remove the current attachment, if any
    pub fn detach(&mut self) -> Option<ScriptNode> {
        self.attached.take()
    }

    /// Uid of the currently attached node
    pub fn attached_uid(&self) -> Option<&str> {
        self.attached.as_ref().map(|n| n.uid.as_str())
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CommentConfig {
        CommentConfig {
            repo: "acme/blog-comments".to_string(),
            ..CommentConfig::default()
        }
    }

    #[test]
    fn test_script_element_attributes() {
        let node = script_element(&config(), "my-post");
        assert!(node.html.contains(WIDGET_SRC));
        assert!(node.html.contains(r#"getElementById("my-post")"#));
        assert!(node.html.contains(r#"setAttribute("repo", "acme/blog-comments")"#));
        assert!(node.html.contains(r#"setAttribute("issue-term", "pathname")"#));
        assert!(node.html.contains(r#"setAttribute("theme", "photon-dark")"#));
    }

    #[test]
    fn test_attach_replaces_on_uid_change() {
        let mut mount = Mount::new(config());
        let first = mount.attach("post-a").clone();
        assert_eq!(mount.attached_uid(), Some("post-a"));

        let second = mount.attach("post-b").clone();
        assert_eq!(mount.attached_uid(), Some("post-b"));
        assert_ne!(first, second);
        assert!(second.html.contains(r#"getElementById("post-b")"#));
        assert!(!second.html.contains("post-a"));
    }

    #[test]
    fn test_attach_same_uid_is_idempotent() {
        let mut mount = Mount::new(config());
        let first = mount.attach("post-a").clone();
        let again = mount.attach("post-a").clone();
        assert_eq!(first, again);
    }

    #[test]
    fn test_detach_releases() {
        let mut mount = Mount::new(config());
        mount.attach("post-a");
        let removed = mount.detach();
        assert_eq!(removed.map(|n| n.uid), Some("post-a".to_string()));
        assert_eq!(mount.attached_uid(), None);
    }

    #[test]
    fn test_default_config() {
        let config = CommentConfig::default();
        assert_eq!(config.issue_term, "pathname");
        assert_eq!(config.theme, "photon-dark");
        assert!(!config.is_enabled());
    }
}
