//! Inline rendering: code spans, images, links, emphasis and strikethrough
//! inside a single block's text.
//!
//! Code spans are pulled out before escaping and before any rule runs, so
//! their content is never interpreted as markup. Tags emitted by a rule can be
//! set aside the same way with [`InlineContext::protect`], which keeps later
//! rules from rewriting attribute values such as `target="_blank"`.
//! Everything set aside comes back in one final pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::options::MarkdownOptions;
use crate::rules::Rules;
use crate::utilities::escape_html;

/// Delimits a placeholder. Neither the escaper nor any built-in rule touches
/// it, and it is stripped from input before extraction.
const PLACEHOLDER_MARK: char = '\u{1A}';

static CODE_SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1A(\d+)\x1A").unwrap());

#[derive(Debug)]
enum Fragment {
    /// Raw code-span content, escaped on restore
    Code(String),
    /// Finished HTML emitted by a rule
    Markup(String),
}

/// Per-call state for one inline render.
///
/// Holds the options and an arena of set-aside fragments addressed by
/// position. Dropped when the render returns.
#[derive(Debug)]
pub struct InlineContext<'a> {
    options: &'a MarkdownOptions,
    fragments: Vec<Fragment>,
}

impl<'a> InlineContext<'a> {
    pub fn new(options: &'a MarkdownOptions) -> Self {
        Self {
            options,
            fragments: Vec::new(),
        }
    }

    pub fn options(&self) -> &MarkdownOptions {
        self.options
    }

    /// Set `html` aside and return the placeholder that stands in for it
    pub fn protect(&mut self, html: String) -> String {
        self.push(Fragment::Markup(html))
    }

    fn push(&mut self, fragment: Fragment) -> String {
        let id = self.fragments.len();
        self.fragments.push(fragment);
        format!("{PLACEHOLDER_MARK}{id}{PLACEHOLDER_MARK}")
    }

    /// Replace every code span in `text` with a placeholder
    fn extract_code_spans(&mut self, text: &str) -> String {
        CODE_SPAN_RE
            .replace_all(text, |caps: &Captures<'_>| {
                self.push(Fragment::Code(caps[1].to_string()))
            })
            .into_owned()
    }

    /// Swap every placeholder back for the fragment it stands for
    pub fn restore(&self, text: &str) -> String {
        if self.fragments.is_empty() {
            return text.to_string();
        }
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let fragment = caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|id| self.fragments.get(id));
                match fragment {
                    Some(Fragment::Code(code)) => format!("<code>{}</code>", escape_html(code)),
                    // A fragment only ever refers to fragments created before it
                    Some(Fragment::Markup(html)) => self.restore(html),
                    None => String::new(),
                }
            })
            .into_owned()
    }
}

/// Render one span of inline Markdown to HTML.
///
/// Runs code-span extraction, escaping, every rule in `rules` (in order), and
/// restoration. Never fails; empty input gives empty output.
pub(crate) fn render_inline(text: &str, rules: &Rules, options: &MarkdownOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace(PLACEHOLDER_MARK, "");

    let mut ctx = InlineContext::new(options);
    let extracted = ctx.extract_code_spans(&text);

    let mut html = escape_html(&extracted);
    for rule in rules.iter() {
        html = rule.apply(&html, &mut ctx);
    }

    ctx.restore(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        render_inline(text, &Rules::new(), &MarkdownOptions::default())
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(render("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
        assert_eq!(render("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn test_code_span_is_literal() {
        assert_eq!(render("`*x*`"), "<code>*x*</code>");
    }

    #[test]
    fn test_code_span_content_is_escaped_once() {
        assert_eq!(render("`a<b>&c`"), "<code>a&lt;b&gt;&amp;c</code>");
    }

    #[test]
    fn test_several_code_spans() {
        assert_eq!(
            render("Obtain `index.html`, `README.md`, and `LICENSE` files."),
            "Obtain <code>index.html</code>, <code>README.md</code>, and <code>LICENSE</code> files."
        );
    }

    #[test]
    fn test_unmatched_backtick_is_literal() {
        assert_eq!(render("a ` b"), "a ` b");
    }

    #[test]
    fn test_bold_then_emphasis() {
        assert_eq!(
            render("**bold** and *em*"),
            "<strong>bold</strong> and <em>em</em>"
        );
    }

    #[test]
    fn test_triple_delimiter_resolves_bold_first() {
        assert_eq!(render("***both***"), "<strong><em>both</strong></em>");
    }

    #[test]
    fn test_lone_delimiter_is_literal() {
        assert_eq!(render("2 * 3"), "2 * 3");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(render("~~old~~ new"), "<del>old</del> new");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[LICENSE](LICENSE)"),
            r#"<a href="LICENSE" target="_blank" rel="noopener">LICENSE</a>"#
        );
    }

    #[test]
    fn test_link_with_title() {
        assert_eq!(
            render(r#"[x](http://a.b "Home")"#),
            r#"<a href="http://a.b" target="_blank" rel="noopener" title="Home">x</a>"#
        );
    }

    #[test]
    fn test_link_label_gets_emphasis() {
        assert_eq!(
            render("[**x**](/y)"),
            r#"<a href="/y" target="_blank" rel="noopener"><strong>x</strong></a>"#
        );
    }

    #[test]
    fn test_two_links_keep_their_attributes() {
        assert_eq!(
            render("[a](/a_1) and [b](/b_2)"),
            concat!(
                r#"<a href="/a_1" target="_blank" rel="noopener">a</a> and "#,
                r#"<a href="/b_2" target="_blank" rel="noopener">b</a>"#
            )
        );
    }

    #[test]
    fn test_image_inside_link() {
        assert_eq!(
            render("[![logo](logo.png)](http://a.b)"),
            r#"<a href="http://a.b" target="_blank" rel="noopener"><img src="logo.png" alt="logo"></a>"#
        );
    }

    #[test]
    fn test_placeholder_mark_in_input_is_dropped() {
        assert_eq!(render("a\u{1A}0\u{1A}b"), "a0b");
    }
}
