//! HTML helper functions

/// Escape text for safe inclusion in HTML element content or attributes
///
/// # Examples
/// ```ignore
/// escape_html("a < b") // -> "a &lt; b"
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Insert a fragment immediately before the closing body tag
///
/// Falls back to appending when the document has no `</body>`.
pub fn inject_before_body_end(html: &str, fragment: &str) -> String {
    if let Some(pos) = html.rfind("</body>") {
        let mut result = String::with_capacity(html.len() + fragment.len());
        result.push_str(&html[..pos]);
        result.push_str(fragment);
        result.push_str(&html[pos..]);
        result
    } else {
        format!("{}{}", html, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_inject_before_body_end() {
        let html = "<html><body><p>hi</p></body></html>";
        let out = inject_before_body_end(html, "<script></script>");
        assert_eq!(out, "<html><body><p>hi</p><script></script></body></html>");
    }

    #[test]
    fn test_inject_without_body_tag() {
        assert_eq!(inject_before_body_end("<p>hi</p>", "<x>"), "<p>hi</p><x>");
    }
}
