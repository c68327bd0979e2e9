//! Rich text bodies as delivered by the content API
//!
//! A rich text value is an ordered list of blocks. Each block carries its
//! plain text plus styled spans addressed by character offsets into that
//! text. Conversion to HTML escapes all text content; only the markup
//! produced here is emitted as tags.

use serde::{Deserialize, Serialize};

use crate::helpers::escape_html;

/// A rich text value: an ordered sequence of blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextBlock>);

/// A single rich text block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

/// Block-level element kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[default]
    Paragraph,
    ListItem,
    Preformatted,
}

/// A styled span over a character range of a block's text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(flatten)]
    pub kind: SpanKind,
}

/// Span-level markup kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink { data: LinkData },
}

/// Link target carried by hyperlink spans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
}

impl RichText {
    /// Plain text of the whole value, blocks joined by newlines
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Convert to an HTML fragment
    ///
    /// Consecutive list items are grouped under a single `<ul>`.
    pub fn as_html(&self) -> String {
        let mut html = String::new();
        let mut in_list = false;

        for block in &self.0 {
            if block.kind == BlockKind::ListItem && !in_list {
                html.push_str("<ul>");
                in_list = true;
            } else if block.kind != BlockKind::ListItem && in_list {
                html.push_str("</ul>");
                in_list = false;
            }

            let inner = render_spans(&block.text, &block.spans);
            match block.kind {
                BlockKind::Paragraph => {
                    html.push_str("<p>");
                    html.push_str(&inner);
                    html.push_str("</p>");
                }
                BlockKind::ListItem => {
                    html.push_str("<li>");
                    html.push_str(&inner);
                    html.push_str("</li>");
                }
                BlockKind::Preformatted => {
                    html.push_str("<pre>");
                    html.push_str(&inner);
                    html.push_str("</pre>");
                }
            }
        }

        if in_list {
            html.push_str("</ul>");
        }

        html
    }

    /// Whether the value holds no blocks at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Render a block's text with its spans applied
///
/// Spans are applied in start order; a span overlapping an already
/// rendered range is skipped rather than producing broken markup.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut ordered: Vec<&Span> = spans.iter().collect();
    ordered.sort_by_key(|s| (s.start, s.end));

    let mut html = String::new();
    let mut pos = 0usize;

    for span in ordered {
        let start = span.start.min(chars.len());
        let end = span.end.min(chars.len());
        if start < pos || end <= start {
            continue;
        }

        html.push_str(&escape_html(&collect(&chars[pos..start])));
        let inner = escape_html(&collect(&chars[start..end]));
        match &span.kind {
            SpanKind::Strong => {
                html.push_str("<strong>");
                html.push_str(&inner);
                html.push_str("</strong>");
            }
            SpanKind::Em => {
                html.push_str("<em>");
                html.push_str(&inner);
                html.push_str("</em>");
            }
            SpanKind::Hyperlink { data } => {
                html.push_str(&format!(r#"<a href="{}">"#, escape_html(&data.url)));
                html.push_str(&inner);
                html.push_str("</a>");
            }
        }
        pos = end;
    }

    html.push_str(&escape_html(&collect(&chars[pos..])));
    html
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> RichTextBlock {
        RichTextBlock {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            spans: Vec::new(),
        }
    }

    #[test]
    fn test_as_text_joins_blocks() {
        let rt = RichText(vec![paragraph("first"), paragraph("second")]);
        assert_eq!(rt.as_text(), "first\nsecond");
    }

    #[test]
    fn test_paragraph_html_is_escaped() {
        let rt = RichText(vec![paragraph("1 < 2 & 3")]);
        assert_eq!(rt.as_html(), "<p>1 &lt; 2 &amp; 3</p>");
    }

    #[test]
    fn test_strong_and_em_spans() {
        let rt = RichText(vec![RichTextBlock {
            kind: BlockKind::Paragraph,
            text: "bold and italic".to_string(),
            spans: vec![
                Span {
                    start: 0,
                    end: 4,
                    kind: SpanKind::Strong,
                },
                Span {
                    start: 9,
                    end: 15,
                    kind: SpanKind::Em,
                },
            ],
        }]);
        assert_eq!(
            rt.as_html(),
            "<p><strong>bold</strong> and <em>italic</em></p>"
        );
    }

    #[test]
    fn test_hyperlink_span() {
        let rt = RichText(vec![RichTextBlock {
            kind: BlockKind::Paragraph,
            text: "see docs".to_string(),
            spans: vec![Span {
                start: 4,
                end: 8,
                kind: SpanKind::Hyperlink {
                    data: LinkData {
                        url: "https://example.com".to_string(),
                    },
                },
            }],
        }]);
        assert_eq!(
            rt.as_html(),
            r#"<p>see <a href="https://example.com">docs</a></p>"#
        );
    }

    #[test]
    fn test_list_items_grouped() {
        let rt = RichText(vec![
            paragraph("intro"),
            RichTextBlock {
                kind: BlockKind::ListItem,
                text: "one".to_string(),
                spans: Vec::new(),
            },
            RichTextBlock {
                kind: BlockKind::ListItem,
                text: "two".to_string(),
                spans: Vec::new(),
            },
            paragraph("outro"),
        ]);
        assert_eq!(
            rt.as_html(),
            "<p>intro</p><ul><li>one</li><li>two</li></ul><p>outro</p>"
        );
    }

    #[test]
    fn test_overlapping_span_skipped() {
        let rt = RichText(vec![RichTextBlock {
            kind: BlockKind::Paragraph,
            text: "abcdef".to_string(),
            spans: vec![
                Span {
                    start: 0,
                    end: 4,
                    kind: SpanKind::Strong,
                },
                Span {
                    start: 2,
                    end: 6,
                    kind: SpanKind::Em,
                },
            ],
        }]);
        assert_eq!(rt.as_html(), "<p><strong>abcd</strong>ef</p>");
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"[
            {"type": "paragraph", "text": "hello world", "spans": [
                {"start": 0, "end": 5, "type": "strong"}
            ]},
            {"type": "list-item", "text": "item", "spans": []}
        ]"#;
        let rt: RichText = serde_json::from_str(json).unwrap();
        assert_eq!(rt.0.len(), 2);
        assert_eq!(rt.0[1].kind, BlockKind::ListItem);
        assert_eq!(rt.as_html(), "<p><strong>hello</strong> world</p><ul><li>item</li></ul>");
    }
}
