//! HTML parsing and serialization, both through `scraper`'s html5ever.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{Html, Node};

use crate::document::Document;
use crate::error::Result;

impl Document {
    /// Parse a full HTML document. Parsing never fails; malformed markup is
    /// repaired the way browsers repair it.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        tracing::trace!(nodes = parsed.tree.nodes().count(), "parsed document");
        Self::from_html(parsed)
    }

    /// Replace the children of `id` with the nodes parsed from `html`.
    ///
    /// The markup is inserted verbatim: it is parsed as an HTML fragment, not
    /// escaped. Comments and doctypes in the fragment are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`](crate::DomError::NotAnElement) if
    /// `id` is not an element.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) -> Result<()> {
        self.set_text(id, "")?;
        let fragment = Html::parse_fragment(html);
        let context = fragment.root_element();
        let mut ids = HashMap::new();
        ids.insert(context.id(), id);

        for node in context.descendants().skip(1) {
            let Some(parent) = node.parent().and_then(|p| ids.get(&p.id()).copied()) else {
                continue;
            };
            let value: &Node = node.value();
            if !(value.is_element() || value.is_text()) {
                continue;
            }
            let new_id = self.create_node(value.clone());
            self.append_child(parent, new_id)?;
            ids.insert(node.id(), new_id);
        }
        Ok(())
    }

    /// Serialize the children of `id`. Empty for text and comment nodes.
    pub fn inner_html(&self, id: NodeId) -> String {
        if id == self.root() {
            return self.html().html();
        }
        self.element(id)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    /// Serialize `id` including its own tag. Empty for text and comment nodes.
    pub fn outer_html(&self, id: NodeId) -> String {
        if id == self.root() {
            return self.html().html();
        }
        self.element(id)
            .map(|element| element.html())
            .unwrap_or_default()
    }
}
