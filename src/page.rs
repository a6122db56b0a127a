//! The hosting page the widget is mounted into.
//!
//! [`Page`] is the seam between the widget and whatever owns the live
//! document. [`HostPage`] implements it over an in-memory
//! [`search_dom::Document`] plus the address the page was loaded from.

use std::fmt;

use search_dom::{Document, NodeId, ScrollBehavior};
use url::Url;

use crate::error::Result;

/// Operations the widget needs from the live page.
///
/// Implementations must be cheap to call repeatedly: the widget queries the
/// page on every input event.
pub trait Page {
    /// Handle to an element of this page.
    type Node: Copy + Eq + fmt::Debug;

    /// Address the page was loaded from, including its query string.
    fn location(&self) -> &Url;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>>;

    /// Every element matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Node>>;

    /// Rendered text of the element.
    fn inner_text(&self, node: Self::Node) -> String;

    /// Current value of a form control. Empty for anything else.
    fn input_value(&self, node: Self::Node) -> String;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str) -> Result<()>;

    fn add_class(&mut self, node: Self::Node, class: &str) -> Result<()>;

    /// Replace the children of `node` with literal text.
    fn set_text(&mut self, node: Self::Node, text: &str) -> Result<()>;

    /// Replace the children of `node` with parsed markup.
    fn set_inner_html(&mut self, node: Self::Node, html: &str) -> Result<()>;

    /// Insert `node` right after `reference`, moving it if already attached.
    fn insert_after(&mut self, reference: Self::Node, node: Self::Node) -> Result<()>;

    /// Append `child` to `parent`, moving it if already attached.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<()>;

    fn clear_children(&mut self, node: Self::Node) -> Result<()>;

    /// Top of the element relative to the viewport.
    fn bounding_top(&self, node: Self::Node) -> f64;

    /// Current vertical scroll offset of the page.
    fn page_y_offset(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// An in-memory live page: a parsed document and the address it was loaded from.
#[derive(Debug, Clone)]
pub struct HostPage {
    document: Document,
    location: Url,
}

impl HostPage {
    pub fn new(document: Document, location: Url) -> Self {
        Self { document, location }
    }

    /// Parse `html` as the page served at `location`.
    pub fn parse(html: &str, location: Url) -> Self {
        Self::new(Document::parse(html), location)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Set the value of a form control, as typing into it would.
    pub fn type_into(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.document.set_value(node, value)?;
        Ok(())
    }
}

impl Page for HostPage {
    type Node = NodeId;

    fn location(&self) -> &Url {
        &self.location
    }

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.document.select_first(selector)?)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        Ok(self.document.select(selector)?)
    }

    fn inner_text(&self, node: NodeId) -> String {
        self.document.inner_text(node)
    }

    fn input_value(&self, node: NodeId) -> String {
        self.document.value(node).unwrap_or_default().to_owned()
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.document.create_element(tag)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        Ok(self.document.set_attribute(node, name, value)?)
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        Ok(self.document.add_class(node, class)?)
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        Ok(self.document.set_text(node, text)?)
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()> {
        Ok(self.document.set_inner_html(node, html)?)
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        Ok(self.document.insert_after(reference, node)?)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        Ok(self.document.append_child(parent, child)?)
    }

    fn clear_children(&mut self, node: NodeId) -> Result<()> {
        Ok(self.document.clear_children(node)?)
    }

    fn bounding_top(&self, node: NodeId) -> f64 {
        self.document.bounding_top(node)
    }

    fn page_y_offset(&self) -> f64 {
        self.document.page_y_offset()
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.document.scroll_to(top, behavior);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn page(html: &str) -> HostPage {
        HostPage::parse(html, Url::parse("https://example.com/faq.html").unwrap())
    }

    #[test]
    fn query_selector_finds_first_match() {
        let page = page("<input class='q'><input class='q' id='second'>");
        let first = page.query_selector(".q").unwrap().expect("match");
        let all = page.query_selector_all(".q").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], first);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let page = page("<input>");
        assert!(page.query_selector("input[").is_err());
    }

    #[test]
    fn type_into_updates_input_value() {
        let mut page = page("<input id='q'>");
        let input = page.query_selector("#q").unwrap().expect("input");
        assert_eq!(page.input_value(input), "");
        page.type_into(input, "ban").unwrap();
        assert_eq!(page.input_value(input), "ban");
    }

    #[test]
    fn input_value_of_text_node_is_empty() {
        let mut page = page("<p>x</p>");
        let text = page.document_mut().create_text("loose");
        assert_eq!(page.input_value(text), "");
    }

    #[test]
    fn location_is_preserved() {
        let page = page("");
        assert_eq!(page.location().path(), "/faq.html");
    }
}
