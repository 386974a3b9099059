//! Block parsing: a line-at-a-time state machine over the normalized document.
//!
//! Precedence per line, first match wins: fence delimiter, fenced content,
//! thematic break, heading, blockquote, unordered item, ordered item, blank,
//! paragraph. Blockquotes recurse into [`parse_document`] with the markers
//! stripped, up to [`MAX_BLOCKQUOTE_DEPTH`] levels.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use tracing::trace;

use crate::service::MarkdownService;
use crate::utilities::{collapse_whitespace, escape_html, normalize_document};

static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*```([A-Za-z0-9_]+)?\s*$").unwrap());

static THEMATIC_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\*{3,}|-{3,}|_{3,})\s*$").unwrap());

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.*)$").unwrap());

static CLOSING_HASHES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+#+\s*$").unwrap());

static BLOCKQUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{0,3}>\s?(.*)$").unwrap());

static UNORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}[*+-]\s+(.*)$").unwrap());

static ORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{0,3}\d+\.\s+(.*)$").unwrap());

/// Nesting past this depth renders the remaining quoted text as a literal
/// paragraph instead of recursing.
const MAX_BLOCKQUOTE_DEPTH: usize = 64;

/// Lines that end a paragraph. A fence here is any line opening with three
/// backticks, even one that is not a valid delimiter on its own.
static PARAGRAPH_INTERRUPT: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^\s*```",
        r"^\s{0,3}(#{1,6})\s+",
        r"^\s{0,3}>",
        r"^\s{0,3}[*+-]\s+",
        r"^\s{0,3}\d+\.\s+",
        r"^\s*(\*{3,}|-{3,}|_{3,})\s*$",
    ])
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }

    fn item_pattern(self) -> &'static Regex {
        match self {
            ListKind::Unordered => &UNORDERED_ITEM_RE,
            ListKind::Ordered => &ORDERED_ITEM_RE,
        }
    }
}

/// An open fenced code block
#[derive(Debug)]
struct Fence<'a> {
    language: Option<&'a str>,
    lines: Vec<&'a str>,
}

/// Parser state for one document
struct BlockParser<'a> {
    service: &'a MarkdownService,
    lines: &'a [&'a str],
    cursor: usize,
    html: String,
    fence: Option<Fence<'a>>,
    open_list: Option<ListKind>,
    depth: usize,
}

/// Parse a whole Markdown document to HTML.
pub(crate) fn parse_document(document: &str, service: &MarkdownService) -> String {
    parse_nested(document, service, 0)
}

fn parse_nested(document: &str, service: &MarkdownService, depth: usize) -> String {
    if document.is_empty() {
        return String::new();
    }

    let normalized = normalize_document(document, service.options().tab_width);
    let lines: Vec<&str> = normalized.split('\n').collect();

    BlockParser::new(service, &lines, depth).run()
}

impl<'a> BlockParser<'a> {
    fn new(service: &'a MarkdownService, lines: &'a [&'a str], depth: usize) -> Self {
        Self {
            service,
            lines,
            cursor: 0,
            html: String::new(),
            fence: None,
            open_list: None,
            depth,
        }
    }

    fn run(mut self) -> String {
        while self.cursor < self.lines.len() {
            let line = self.lines[self.cursor];
            self.step(line);
        }

        self.close_list();

        if let Some(fence) = &self.fence {
            trace!(
                dropped_lines = fence.lines.len(),
                "unterminated fenced code block discarded"
            );
        }

        self.html
    }

    /// Decide one line; every branch advances the cursor by at least one.
    fn step(&mut self, line: &'a str) {
        if let Some(caps) = FENCE_RE.captures(line) {
            let language = caps.get(1).map(|m| m.as_str());
            self.toggle_fence(language);
            self.cursor += 1;
            return;
        }

        if let Some(fence) = self.fence.as_mut() {
            fence.lines.push(line);
            self.cursor += 1;
            return;
        }

        if THEMATIC_BREAK_RE.is_match(line) {
            self.close_list();
            self.html.push_str("<hr>");
            self.cursor += 1;
            return;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            self.close_list();
            let level = caps[1].len();
            let text = CLOSING_HASHES_RE.replace(&caps[2], "");
            let inline = self.service.render_inline(&text);
            self.html
                .push_str(&format!("<h{level}>{inline}</h{level}>"));
            self.cursor += 1;
            return;
        }

        if BLOCKQUOTE_RE.is_match(line) {
            self.close_list();
            self.blockquote();
            return;
        }

        if let Some(caps) = UNORDERED_ITEM_RE.captures(line) {
            self.list_item(ListKind::Unordered, caps.get(1).map_or("", |m| m.as_str()));
            return;
        }

        if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
            self.list_item(ListKind::Ordered, caps.get(1).map_or("", |m| m.as_str()));
            return;
        }

        if line.trim().is_empty() {
            self.cursor += 1;
            return;
        }

        self.close_list();
        self.paragraph();
    }

    fn toggle_fence(&mut self, language: Option<&'a str>) {
        match self.fence.take() {
            None => {
                self.close_list();
                trace!(line = self.cursor, ?language, "fenced code block opened");
                self.fence = Some(Fence {
                    language,
                    lines: Vec::new(),
                });
            }
            Some(fence) => {
                let class = fence
                    .language
                    .map(|lang| format!(" class=\"language-{lang}\""))
                    .unwrap_or_default();
                let code = escape_html(&fence.lines.join("\n"));
                self.html
                    .push_str(&format!("<pre><code{class}>{code}</code></pre>"));
            }
        }
    }

    /// Collect consecutive quoted lines and parse them as their own document
    fn blockquote(&mut self) {
        let lines = self.lines;
        let mut inner = Vec::new();
        while let Some(caps) = lines
            .get(self.cursor)
            .and_then(|line| BLOCKQUOTE_RE.captures(line))
        {
            inner.push(caps.get(1).map_or("", |m| m.as_str()));
            self.cursor += 1;
        }

        let inner_html = if self.depth < MAX_BLOCKQUOTE_DEPTH {
            trace!(lines = inner.len(), depth = self.depth, "parsing blockquote");
            parse_nested(&inner.join("\n"), self.service, self.depth + 1)
        } else {
            trace!(depth = self.depth, "blockquote nesting limit reached");
            let text = collapse_whitespace(&inner.join(" "));
            if text.is_empty() {
                String::new()
            } else {
                format!("<p>{}</p>", escape_html(&text))
            }
        };
        self.html
            .push_str(&format!("<blockquote>{inner_html}</blockquote>"));
    }

    /// Emit one list item, closing the list unless the next line continues it
    fn list_item(&mut self, kind: ListKind, text: &str) {
        if self.open_list != Some(kind) {
            self.close_list();
            self.html.push_str(kind.open_tag());
            self.open_list = Some(kind);
        }

        let inline = self.service.render_inline(text);
        self.html.push_str(&format!("<li>{inline}</li>"));
        self.cursor += 1;

        let next = self.lines.get(self.cursor).copied().unwrap_or("");
        if !kind.item_pattern().is_match(next) {
            self.close_list();
        }
    }

    fn paragraph(&mut self) {
        let lines = self.lines;
        let start = self.cursor;
        self.cursor += 1;
        while let Some(line) = lines.get(self.cursor) {
            if line.trim().is_empty() || PARAGRAPH_INTERRUPT.is_match(line) {
                break;
            }
            self.cursor += 1;
        }

        let joined = lines[start..self.cursor].join(" ");
        let inline = self.service.render_inline(&collapse_whitespace(&joined));
        if !inline.is_empty() {
            self.html.push_str(&format!("<p>{inline}</p>"));
        }
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            self.html.push_str(kind.close_tag());
        }
    }
}
