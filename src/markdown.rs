//! Assistant Markdown
//!
//! Renders assistant replies with pulldown-cmark. Replies come from a
//! remote model, so raw HTML is shown as text and only http(s)/mailto
//! links survive.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with('#')
}

/// Markdown to HTML with raw HTML escaped
pub fn parse_markdown(text: &str) -> String {
    let events = Parser::new_ext(text, get_options()).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    });
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_markdown() {
        let html = parse_markdown("**Brake pads** come from *Germany*");
        assert_eq!(html.trim(), "<p><strong>Brake pads</strong> come from <em>Germany</em></p>");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unsafe_links_are_neutralized() {
        let html = parse_markdown("[click](javascript:alert(1)) and [docs](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_tables() {
        let html = parse_markdown("| Part | Country |\n|---|---|\n| Piston | China |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>China</td>"));
    }
}
