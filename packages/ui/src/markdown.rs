use dioxus::prelude::*;
use pulldown_cmark::{html, CowStr, Event, Options, Parser};

/// Render markdown to HTML. Embedded raw HTML is emitted as escaped text.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Read-only markdown block.
#[component]
pub fn Markdown(content: String) -> Element {
    let rendered = render_markdown(&content);
    rsx! {
        div {
            class: "markdown-body",
            dangerous_inner_html: "{rendered}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_lists() {
        let html = render_markdown("# Access Policy\n\n- one\n- two\n");
        assert!(html.contains("<h1>Access Policy</h1>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
