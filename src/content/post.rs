//! Post model as delivered by the content API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::richtext::RichText;
use crate::helpers::escape_html;

/// Words per minute assumed by the reading-time estimate
const READING_WORDS_PER_MINUTE: usize = 200;

/// A blog post document
///
/// `first_publication_date` is only absent for draft revisions served in
/// preview mode; published posts always carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier assigned by the content source, used as the slug
    pub uid: String,

    /// First publication date
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Date of the latest edit, advances on every published change
    #[serde(default)]
    pub last_publication_date: Option<DateTime<Utc>>,

    /// Document fields
    pub data: PostData,
}

/// Document fields of a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    pub author: String,

    #[serde(default)]
    pub banner: Option<Banner>,

    /// Body sections, rendered in array order
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Banner image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
}

/// One body section: a heading plus its rich text body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    #[serde(default)]
    pub body: RichText,
}

/// Reduced projection of a post, used for listing entries and the
/// previous/next navigation on post pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub author: String,
}

impl Post {
    /// Total word count across all sections (heading plus body text)
    pub fn word_count(&self) -> usize {
        self.data
            .content
            .iter()
            .map(|block| {
                block.body.as_text().split_whitespace().count()
                    + block.heading.split_whitespace().count()
            })
            .sum()
    }

    /// Estimated reading time in whole minutes, rounded up
    ///
    /// A heuristic at 200 words per minute, not a guaranteed bound.
    pub fn reading_time(&self) -> usize {
        self.word_count().div_ceil(READING_WORDS_PER_MINUTE)
    }

    /// Assemble the post body into one HTML fragment
    ///
    /// Each section emits its heading followed by the body converted to
    /// HTML, concatenated in section order. The caller inserts the
    /// fragment into the page verbatim.
    pub fn body_html(&self) -> String {
        let mut html = String::new();
        for block in &self.data.content {
            html.push_str("<h3>");
            html.push_str(&escape_html(&block.heading));
            html.push_str("</h3>");
            html.push_str(&block.body.as_html());
        }
        html
    }

    /// Whether the post was edited after first publication
    pub fn was_edited(&self) -> bool {
        match (self.first_publication_date, self.last_publication_date) {
            (Some(first), Some(last)) => last != first,
            _ => false,
        }
    }

    /// Reduced projection of this post
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            uid: self.uid.clone(),
            first_publication_date: self.first_publication_date,
            title: self.data.title.clone(),
            subtitle: self.data.subtitle.clone(),
            author: self.data.author.clone(),
        }
    }
}

impl PostSummary {
    /// Site-relative URL of the post page
    pub fn path(&self) -> String {
        format!("/post/{}/", self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::richtext::{BlockKind, RichTextBlock};
    use chrono::{TimeZone, Utc};

    fn block_with_words(heading_words: usize, body_words: usize) -> ContentBlock {
        let heading = vec!["head"; heading_words].join(" ");
        let body_text = vec!["word"; body_words].join(" ");
        ContentBlock {
            heading,
            body: RichText(vec![RichTextBlock {
                kind: BlockKind::Paragraph,
                text: body_text,
                spans: Vec::new(),
            }]),
        }
    }

    fn post_with_blocks(blocks: Vec<ContentBlock>) -> Post {
        Post {
            uid: "my-post".to_string(),
            first_publication_date: Some(Utc.with_ymd_and_hms(2021, 3, 15, 10, 0, 0).unwrap()),
            last_publication_date: None,
            data: PostData {
                title: "My Post".to_string(),
                subtitle: None,
                author: "Ada".to_string(),
                banner: None,
                content: blocks,
            },
        }
    }

    #[test]
    fn test_reading_time_exactly_200_words() {
        let post = post_with_blocks(vec![block_with_words(2, 198)]);
        assert_eq!(post.word_count(), 200);
        assert_eq!(post.reading_time(), 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let post = post_with_blocks(vec![block_with_words(1, 200)]);
        assert_eq!(post.word_count(), 201);
        assert_eq!(post.reading_time(), 2);

        let post = post_with_blocks(vec![block_with_words(0, 400)]);
        assert_eq!(post.reading_time(), 2);

        let post = post_with_blocks(vec![block_with_words(1, 400)]);
        assert_eq!(post.reading_time(), 3);
    }

    #[test]
    fn test_reading_time_sums_across_blocks() {
        let post = post_with_blocks(vec![block_with_words(2, 100), block_with_words(3, 95)]);
        assert_eq!(post.word_count(), 200);
        assert_eq!(post.reading_time(), 1);
    }

    #[test]
    fn test_reading_time_empty_content() {
        let post = post_with_blocks(Vec::new());
        assert_eq!(post.reading_time(), 0);
    }

    #[test]
    fn test_body_html_keeps_section_order() {
        let mut first = block_with_words(0, 0);
        first.heading = "First".to_string();
        first.body = RichText(vec![RichTextBlock {
            kind: BlockKind::Paragraph,
            text: "one".to_string(),
            spans: Vec::new(),
        }]);
        let mut second = block_with_words(0, 0);
        second.heading = "Second".to_string();
        second.body = RichText(vec![RichTextBlock {
            kind: BlockKind::Paragraph,
            text: "two".to_string(),
            spans: Vec::new(),
        }]);

        let post = post_with_blocks(vec![first, second]);
        assert_eq!(
            post.body_html(),
            "<h3>First</h3><p>one</p><h3>Second</h3><p>two</p>"
        );
    }

    #[test]
    fn test_body_html_escapes_heading() {
        let mut block = block_with_words(0, 0);
        block.heading = "Q & A".to_string();
        block.body = RichText(Vec::new());
        let post = post_with_blocks(vec![block]);
        assert_eq!(post.body_html(), "<h3>Q &amp; A</h3>");
    }

    #[test]
    fn test_was_edited() {
        let mut post = post_with_blocks(Vec::new());
        assert!(!post.was_edited());

        post.last_publication_date = post.first_publication_date;
        assert!(!post.was_edited());

        post.last_publication_date =
            Some(Utc.with_ymd_and_hms(2021, 3, 16, 10, 0, 0).unwrap());
        assert!(post.was_edited());
    }

    #[test]
    fn test_deserialize_listing_document_without_content() {
        // Listing queries fetch only title/subtitle/author; the content
        // field is absent from those payloads.
        let json = r#"{
            "uid": "hello",
            "first_publication_date": "2021-03-15T19:25:28Z",
            "data": {"title": "Hello", "subtitle": "sub", "author": "Ada"}
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.uid, "hello");
        assert!(post.data.content.is_empty());
        assert_eq!(post.data.subtitle.as_deref(), Some("sub"));
    }
}
