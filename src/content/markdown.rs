//! Markdown rendering and excerpt derivation

use pulldown_cmark::{html, Options, Parser};

/// Number of raw-body characters kept in an excerpt
const EXCERPT_LEN: usize = 150;

/// Markdown renderer for listing bodies
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a plain-text excerpt from a raw markdown body: the first 150
/// characters with `#`, `*` and backtick stripped, plus a literal `...`.
/// Fixed-width, not word-boundary aware; may cut mid-token.
pub fn plain_excerpt(body: &str) -> String {
    let mut excerpt: String = body
        .chars()
        .take(EXCERPT_LEN)
        .filter(|c| !matches!(c, '#' | '*' | '`'))
        .collect();
    excerpt.push_str("...");
    excerpt
}
