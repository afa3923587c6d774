//! Markdown rendering and plain-text extraction
//!
//! Bot replies arrive as markdown, are displayed as HTML markup, and are
//! spoken as plain text with all markup removed.

use pulldown_cmark::{html, Options, Parser};

/// Render markdown to HTML markup
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Strip tags and decode common entities to get a speakable plain text
///
/// Whitespace is collapsed so block boundaries read as single pauses
/// rather than literal newlines.
pub fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => text.push(ch),
        }
    }

    // &amp; last so already-decoded ampersands are not re-expanded
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_emphasis() {
        let markup = render_markdown("**hi**");
        assert!(markup.contains("<strong>hi</strong>"), "got: {markup}");
    }

    #[test]
    fn test_strip_emphasis() {
        let markup = render_markdown("**hi**");
        assert_eq!(strip_markup(&markup), "hi");
    }

    #[test]
    fn test_strip_collapses_block_whitespace() {
        let markup = render_markdown("# Pagi\n\n- satu\n- dua\n");
        assert_eq!(strip_markup(&markup), "Pagi satu dua");
    }

    #[test]
    fn test_strip_decodes_entities() {
        assert_eq!(strip_markup("<p>a &amp; b &lt;c&gt;</p>"), "a & b <c>");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let markup = render_markdown("Selamat pagi");
        assert_eq!(strip_markup(&markup), "Selamat pagi");
    }
}
