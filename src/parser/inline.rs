//! Inline markup: `**bold**`, `*italic*` and `[label](url)`.
//!
//! Parsing is flat. Links are found first and their labels are never
//! scanned for emphasis; the text between links is split on bold and
//! italic markers with non-greedy, non-overlapping matches. Nested
//! emphasis is not supported.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link pattern is valid"));

static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*").expect("emphasis pattern is valid")
});

/// Kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Link,
}

/// A typed run of inline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    /// Span kind
    pub kind: SpanKind,

    /// Visible text (markers removed)
    pub text: String,

    /// Link target, for link spans only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl InlineSpan {
    /// Create a plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Plain,
            text: text.into(),
            href: None,
        }
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Bold,
            text: text.into(),
            href: None,
        }
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Italic,
            text: text.into(),
            href: None,
        }
    }

    /// Create a link span.
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            text: text.into(),
            href: Some(href.into()),
        }
    }
}

/// Parse inline markup into spans.
///
/// Empty input yields a single empty plain span.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        split_emphasis(&text[last..whole.start()], &mut spans);
        spans.push(InlineSpan::link(&caps[1], &caps[2]));
        last = whole.end();
    }
    split_emphasis(&text[last..], &mut spans);

    if spans.is_empty() {
        spans.push(InlineSpan::plain(""));
    }
    spans
}

fn split_emphasis(segment: &str, spans: &mut Vec<InlineSpan>) {
    let mut last = 0;
    for caps in EMPHASIS_RE.captures_iter(segment) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(InlineSpan::plain(&segment[last..whole.start()]));
        }
        match (caps.get(1), caps.get(2)) {
            (Some(bold), _) => spans.push(InlineSpan::bold(bold.as_str())),
            (None, Some(italic)) => spans.push(InlineSpan::italic(italic.as_str())),
            (None, None) => {}
        }
        last = whole.end();
    }
    if last < segment.len() {
        spans.push(InlineSpan::plain(&segment[last..]));
    }
}

/// Render spans as inline HTML (no enclosing block element).
pub fn spans_to_html(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        let text = escape_html(&span.text);
        match span.kind {
            SpanKind::Plain => out.push_str(&text),
            SpanKind::Bold => {
                out.push_str("<strong>");
                out.push_str(&text);
                out.push_str("</strong>");
            }
            SpanKind::Italic => {
                out.push_str("<em>");
                out.push_str(&text);
                out.push_str("</em>");
            }
            SpanKind::Link => {
                let href = span.href.as_deref().unwrap_or_default();
                out.push_str(&format!("<a href=\"{}\">{}</a>", escape_html(href), text));
            }
        }
    }
    out
}

/// Parse and render inline markup as HTML in one step.
pub fn inline_html(text: &str) -> String {
    spans_to_html(&parse_inline(text))
}

/// Visible text of inline markup, markers removed.
pub fn plain_text(text: &str) -> String {
    parse_inline(text).into_iter().map(|span| span.text).collect()
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_spans() {
        let spans = parse_inline("**a** *b* [c](http://x)");
        assert_eq!(
            spans,
            vec![
                InlineSpan::bold("a"),
                InlineSpan::plain(" "),
                InlineSpan::italic("b"),
                InlineSpan::plain(" "),
                InlineSpan::link("c", "http://x"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_inline(""), vec![InlineSpan::plain("")]);
    }

    #[test]
    fn test_plain_only() {
        assert_eq!(parse_inline("hello"), vec![InlineSpan::plain("hello")]);
    }

    #[test]
    fn test_link_label_not_scanned() {
        let spans = parse_inline("see [**docs**](https://d.io) now");
        assert_eq!(spans[1], InlineSpan::link("**docs**", "https://d.io"));
        assert_eq!(spans[2], InlineSpan::plain(" now"));
    }

    #[test]
    fn test_non_greedy_emphasis() {
        let spans = parse_inline("**x** and **y**");
        assert_eq!(
            spans,
            vec![
                InlineSpan::bold("x"),
                InlineSpan::plain(" and "),
                InlineSpan::bold("y"),
            ]
        );
    }

    #[test]
    fn test_unclosed_marker_is_plain() {
        assert_eq!(parse_inline("5 * 3"), vec![InlineSpan::plain("5 * 3")]);
    }

    #[test]
    fn test_inline_html() {
        assert_eq!(
            inline_html("**a** <b> [c](http://x?a=1&b=2)"),
            "<strong>a</strong> &lt;b&gt; <a href=\"http://x?a=1&amp;b=2\">c</a>"
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("**Lead** at [Acme](https://a.co)"), "Lead at Acme");
    }
}
