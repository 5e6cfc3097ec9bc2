use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Parse a CSS selector, turning parse failures into a typed error
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Snapshot of a rendered results page
pub struct ResultsPage {
    document: Html,
}

impl ResultsPage {
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// All listing nodes matching `selector`, in page order
    pub fn list_nodes(&self, selector: &Selector) -> Vec<ListingNode<'_>> {
        self.document.select(selector).map(ListingNode).collect()
    }
}

/// Handle to the DOM subtree of one listing. Borrows the page it came from.
#[derive(Clone, Copy)]
pub struct ListingNode<'a>(ElementRef<'a>);

impl<'a> ListingNode<'a> {
    /// Scoped lookup: first descendant matching `selector`, or `None`
    pub fn lookup(&self, selector: &Selector) -> Option<ListingNode<'a>> {
        self.0.select(selector).next().map(ListingNode)
    }

    /// Visible text laid out like `innerText`: inline content stays on one
    /// line, block elements and `<br>` start new lines, whitespace collapses.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        push_text(self.0, &mut raw);

        raw.lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            match name {
                "br" => out.push('\n'),
                "script" | "style" | "template" => {}
                _ if BLOCK_ELEMENTS.contains(&name) => {
                    out.push('\n');
                    push_text(child, out);
                    out.push('\n');
                }
                _ => push_text(child, out),
            }
        }
    }
}
