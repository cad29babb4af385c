use crate::error::ExtractError;
use crate::scrapers::traits::Renderer;
use crate::scrapers::normalize::{frame_url, parse_selector, rendered_lines};
use crate::scrapers::types::Markup;
use anyhow::Result;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use std::collections::HashMap;

/// Elements that start a new line in rendered text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "tbody", "td", "th", "thead", "tr", "ul",
];

/// Renderer over static HTML.
///
/// Holds the top-level document and the documents its iframes embed, keyed
/// by the iframe `src`. Rendered text is approximated from the markup: block
/// elements and `<br>` break lines, whitespace collapses, blank lines drop.
pub struct HtmlSnapshot {
    url: String,
    page: String,
    frames: HashMap<String, String>,
    current: Html,
}

impl HtmlSnapshot {
    pub fn new(url: &str, page: &str) -> Self {
        Self {
            url: url.to_string(),
            page: page.to_string(),
            frames: HashMap::new(),
            current: Html::parse_document(page),
        }
    }

    /// Register the document served at an absolute frame URL
    pub fn with_frame(mut self, src: &str, html: &str) -> Self {
        self.frames.insert(src.to_string(), html.to_string());
        self
    }

    fn first(&self, selector: &str) -> Result<ElementRef<'_>> {
        let parsed = parse_selector(selector)?;
        self.current.select(&parsed).next().ok_or_else(|| {
            ExtractError::ElementNotFound {
                selector: selector.to_string(),
            }
            .into()
        })
    }

    fn all(&self, scope: Option<&str>, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let parsed = parse_selector(selector)?;
        match scope {
            Some(scope) => Ok(self.first(scope)?.select(&parsed).collect()),
            None => Ok(self.current.select(&parsed).collect()),
        }
    }
}

impl Renderer for HtmlSnapshot {
    fn open(&mut self, url: &str) -> Result<()> {
        self.url = url.to_string();
        self.current = Html::parse_document(&self.page);
        Ok(())
    }

    fn current_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }

    fn enter_frame(&mut self, selector: &str) -> Result<()> {
        let src = self
            .attribute(selector, "src")?
            .ok_or(ExtractError::FieldNotFound { field: "iframe src" })?;
        let url = frame_url(&self.url, &src)?;
        let html = self
            .frames
            .get(&url)
            .ok_or_else(|| ExtractError::ElementNotFound {
                selector: format!("iframe[src=\"{src}\"]"),
            })?;

        self.current = Html::parse_document(html);
        self.url = url;
        Ok(())
    }

    fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self.first(selector)?.value().attr(name).map(str::to_string))
    }

    fn text(&self, selector: &str) -> Result<String> {
        Ok(inner_text(self.first(selector)?))
    }

    fn texts(&self, scope: Option<&str>, selector: &str) -> Result<Vec<String>> {
        Ok(self.all(scope, selector)?.into_iter().map(inner_text).collect())
    }

    fn markup(&self, selector: &str, markup: Markup) -> Result<String> {
        Ok(serialize(self.first(selector)?, markup))
    }

    fn markups(&self, scope: Option<&str>, selector: &str, markup: Markup) -> Result<Vec<String>> {
        Ok(self
            .all(scope, selector)?
            .into_iter()
            .map(|element| serialize(element, markup))
            .collect())
    }
}

fn serialize(element: ElementRef<'_>, markup: Markup) -> String {
    match markup {
        Markup::Inner => element.inner_html(),
        Markup::Outer => element.html(),
    }
}

/// Approximate the browser's `innerText` for an element
fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    rendered_lines(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                for (i, word) in text.split_whitespace().enumerate() {
                    if i > 0 || text.starts_with(char::is_whitespace) {
                        out.push(' ');
                    }
                    out.push_str(word);
                }
                if text.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if matches!(name, "script" | "style" | "template") {
                    continue;
                }
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };

                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html lang="en-US"><body>
        <div id="host"><iframe src="https://frames.test/one"></iframe></div>
    </body></html>"#;

    const FRAME: &str = r#"<html><body>
        <div id="card">
            <h2>Suite  100</h2>
            <p>Line one<br>Line   two</p>
            <span>inline</span> <span>text</span>
        </div>
        <ul id="list"><li>a</li><li>b</li></ul>
    </body></html>"#;

    fn snapshot() -> HtmlSnapshot {
        HtmlSnapshot::new("https://host.test/", PAGE).with_frame("https://frames.test/one", FRAME)
    }

    #[test]
    fn test_inner_text_breaks_blocks_and_collapses_whitespace() {
        let mut page = snapshot();
        page.enter_frame("#host > iframe").unwrap();

        assert_eq!(
            page.text("#card").unwrap(),
            "Suite 100\nLine one\nLine two\ninline text"
        );
    }

    #[test]
    fn test_enter_frame_switches_document() {
        let mut page = snapshot();
        assert_eq!(page.attribute("html", "lang").unwrap().as_deref(), Some("en-US"));

        page.enter_frame("#host > iframe").unwrap();
        assert_eq!(page.current_url().unwrap(), "https://frames.test/one");
        assert_eq!(page.texts(Some("#list"), "li").unwrap(), vec!["a", "b"]);
        assert!(page.text("#host").is_err());
    }

    #[test]
    fn test_missing_scope_is_an_error_but_no_matches_is_empty() {
        let page = snapshot();
        assert!(page.texts(Some("#nope"), "li").is_err());
        assert!(page.texts(None, "li").unwrap().is_empty());
    }

    #[test]
    fn test_relative_frame_src_resolves_against_page() {
        let page = r#"<html><body><div id="host"><iframe src="/embed/listing"></iframe></div></body></html>"#;
        let mut page = HtmlSnapshot::new("https://host.test/listings/?id=7", page)
            .with_frame("https://host.test/embed/listing", FRAME);

        page.enter_frame("#host > iframe").unwrap();
        assert_eq!(page.current_url().unwrap(), "https://host.test/embed/listing");
        assert_eq!(page.texts(Some("#list"), "li").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_frame_is_an_error() {
        let mut page = HtmlSnapshot::new("https://host.test/", PAGE);
        let err = page.enter_frame("#host > iframe").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_markup_reads_inner_and_outer_html() {
        let page = HtmlSnapshot::new("https://host.test/", r#"<div id="x"><b>hi</b></div>"#);
        assert_eq!(page.markup("#x", Markup::Inner).unwrap(), "<b>hi</b>");
        assert_eq!(
            page.markup("#x", Markup::Outer).unwrap(),
            r#"<div id="x"><b>hi</b></div>"#
        );
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let page = snapshot();
        let err = page.text("div[").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::Selector { .. })
        ));
    }
}
