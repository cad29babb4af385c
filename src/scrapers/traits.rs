use crate::scrapers::types::Markup;
use anyhow::Result;

/// Read access to a rendered page.
///
/// Queries run against the current document: the top-level page after
/// [`open`](Renderer::open), or an embedded frame after
/// [`enter_frame`](Renderer::enter_frame). Lookups that need a single element
/// fail when nothing matches; list lookups return an empty list instead.
pub trait Renderer {
    /// Load a page and make it the current document
    fn open(&mut self, url: &str) -> Result<()>;

    /// Address of the current document
    fn current_url(&self) -> Result<String>;

    /// Switch queries into the document embedded by the matching iframe
    fn enter_frame(&mut self, selector: &str) -> Result<()>;

    /// Attribute value of the first match, `None` if the attribute is unset
    fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Rendered text of the first match
    fn text(&self, selector: &str) -> Result<String>;

    /// Rendered text of every `selector` match inside the first `scope` match
    fn texts(&self, scope: Option<&str>, selector: &str) -> Result<Vec<String>>;

    /// Markup of the first match
    fn markup(&self, selector: &str, markup: Markup) -> Result<String>;

    /// Markup of every `selector` match inside the first `scope` match
    fn markups(&self, scope: Option<&str>, selector: &str, markup: Markup) -> Result<Vec<String>>;
}
