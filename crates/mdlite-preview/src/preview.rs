//! Static preview page: rendered pane, optional source pane, status line.

use mdlite::{escape_html, MarkdownService};

use crate::loader::LoadedDocument;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;display:flex;flex-direction:column;height:100vh}\
.status{margin:0;padding:.5rem 1rem;background:#f3f4f6;font-size:.875rem}\
.panes{display:flex;flex:1;min-height:0}\
.pane-rendered,.pane-source{flex:1;overflow:auto;padding:1rem}\
.pane-source{margin:0;background:#111827;color:#e5e7eb;white-space:pre-wrap}";

/// Builds the preview page for one loaded document.
pub struct Preview<'a> {
    service: &'a MarkdownService,
    show_source: bool,
}

impl<'a> Preview<'a> {
    /// Create a new Preview rendering through `service`
    pub fn new(service: &'a MarkdownService) -> Self {
        Self {
            service,
            show_source: true,
        }
    }

    /// Include or omit the raw-source pane
    pub fn show_source(mut self, show: bool) -> Self {
        self.show_source = show;
        self
    }

    /// Render `loaded` and wrap it in a complete HTML page
    pub fn render(&self, loaded: &LoadedDocument, status: &str) -> String {
        let rendered = self.service.parse(&loaded.content);

        let mut page = String::with_capacity(rendered.len() + loaded.content.len() + 1024);
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str("<title>Markdown preview</title>\n<style>");
        page.push_str(STYLE);
        page.push_str("</style>\n</head>\n<body>\n");
        page.push_str(&format!("<p class=\"status\">{}</p>\n", escape_html(status)));
        page.push_str("<div class=\"panes\">\n");
        page.push_str(&format!("<main class=\"pane-rendered\">{rendered}</main>\n"));
        if self.show_source {
            page.push_str(&format!(
                "<pre class=\"pane-source\">{}</pre>\n",
                escape_html(&loaded.content)
            ));
        }
        page.push_str("</div>\n</body>\n</html>\n");
        page
    }
}
