//! The mutable live document.
//!
//! A [`Document`] owns a `scraper::Html` and edits its `ego_tree` in place.
//! `ego_tree` never frees a node, so [`Document::clear_children`] puts the
//! removed subtree on a free list and later `create_*` calls reuse those
//! slots. Handles to cleared nodes must not be used afterwards. Queries walk
//! from the document root, so detached nodes never match.

use std::collections::HashMap;

use ego_tree::NodeId;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{CaseSensitivity, ElementRef, Html, Node, Selector};

use crate::error::{DomError, Result};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// How a scroll request should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// A recorded `scroll_to` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// A mutable HTML document with a simple vertical viewport.
///
/// There is no layout engine: hosts assign each element's document-relative
/// top with [`Document::set_offset_top`]; unassigned elements sit at `0`.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    values: HashMap<NodeId, String>,
    offsets: HashMap<NodeId, f64>,
    free: Vec<NodeId>,
    scroll_y: f64,
    scroll_log: Vec<ScrollRequest>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn element_name(tag: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(tag.to_ascii_lowercase().as_str()),
    )
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(""),
        LocalName::from(name.to_ascii_lowercase().as_str()),
    )
}

fn empty_text() -> Node {
    Node::Text(Text {
        text: StrTendril::new(),
    })
}

/// Parse a selector, keeping the message of the parse error.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DomError::Selector(format!("{selector:?}: {e}")))
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        Self::from_html(Html::new_document())
    }

    pub(crate) fn from_html(html: Html) -> Self {
        Self {
            html,
            values: HashMap::new(),
            offsets: HashMap::new(),
            free: Vec::new(),
            scroll_y: 0.0,
            scroll_log: Vec::new(),
        }
    }

    /// The underlying parsed page.
    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// The first `body` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.select_first("body").ok().flatten()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.html.tree.get(id).map(|node| node.value())
    }

    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// Lower-case tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.as_element().map(Element::name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.html.tree.get(id)?.parent().map(|parent| parent.id())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Whether the node is reachable from the root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let root = self.root();
        self.html
            .tree
            .get(id)
            .is_some_and(|node| node.id() == root || node.ancestors().any(|a| a.id() == root))
    }

    /// Number of node slots held by the tree, attached or not.
    pub fn allocated_nodes(&self) -> usize {
        self.html.tree.nodes().count()
    }

    /// Store `value` in a recycled slot, or a new one when none is free.
    pub(crate) fn create_node(&mut self, value: Node) -> NodeId {
        while let Some(id) = self.free.pop() {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                *node.value() = value;
                return id;
            }
        }
        self.html.tree.orphan(value).id()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_node(Node::Element(Element::new(element_name(tag), Vec::new())))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.create_node(Node::Text(Text {
            text: StrTendril::from_slice(text),
        }))
    }

    /// Detach the subtree at `id` and hand every slot in it to the free list.
    fn release(&mut self, id: NodeId) {
        let Some(node) = self.html.tree.get(id) else {
            return;
        };
        let subtree: Vec<NodeId> = node.descendants().map(|n| n.id()).collect();
        for id in subtree {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                *node.value() = empty_text();
            }
            self.values.remove(&id);
            self.offsets.remove(&id);
            self.free.push(id);
        }
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self
            .html
            .tree
            .get(parent)
            .ok_or(DomError::UnknownNode(parent))?;
        if self.html.tree.get(child).is_none() {
            return Err(DomError::UnknownNode(child));
        }
        if parent_node.value().is_text() {
            return Err(DomError::Hierarchy(format!(
                "text node {parent:?} cannot have children"
            )));
        }
        if child == self.root() {
            return Err(DomError::Hierarchy("the document root cannot be moved".into()));
        }
        if parent == child || parent_node.ancestors().any(|a| a.id() == child) {
            return Err(DomError::Hierarchy(format!(
                "node {child:?} cannot be inserted into its own subtree"
            )));
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if it is already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insertion(parent, child)?;
        if let Some(mut parent) = self.html.tree.get_mut(parent) {
            parent.append_id(child);
        }
        Ok(())
    }

    /// Insert `node` as the next sibling of `reference`, moving it if attached.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        let parent = self
            .parent(reference)
            .ok_or_else(|| DomError::Hierarchy(format!("node {reference:?} has no parent")))?;
        let next = self
            .html
            .tree
            .get(reference)
            .and_then(|r| r.next_sibling())
            .map(|n| n.id());
        if node == reference || next == Some(node) {
            return Ok(());
        }
        self.check_insertion(parent, node)?;
        if let Some(mut reference) = self.html.tree.get_mut(reference) {
            reference.insert_id_after(node);
        }
        Ok(())
    }

    /// Remove every child of `id`. Safe to call on a node without children.
    pub fn clear_children(&mut self, id: NodeId) -> Result<()> {
        if self.html.tree.get(id).is_none() {
            return Err(DomError::UnknownNode(id));
        }
        for child in self.children(id) {
            self.release(child);
        }
        Ok(())
    }

    fn require_element(&self, id: NodeId) -> Result<&Element> {
        self.node(id)
            .ok_or(DomError::UnknownNode(id))?
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        self.require_element(id)?;
        self.clear_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        self.html
            .tree
            .get(id)
            .map(|node| {
                node.descendants()
                    .filter_map(|n| n.value().as_text())
                    .map(|text| &**text)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rendered-style text: whitespace runs collapsed to one space and trimmed.
    pub fn inner_text(&self, id: NodeId) -> String {
        crate::collapse_whitespace(&self.text_content(id))
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?
            .as_element()?
            .attr(&name.to_ascii_lowercase())
    }

    /// Rebuild the element at `id` with edited attributes.
    ///
    /// `scraper` caches the id and class list inside each element, so
    /// attributes are never edited in place.
    fn update_attributes(&mut self, id: NodeId, edit: impl FnOnce(&mut Vec<Attribute>)) -> Result<()> {
        let mut node = self.html.tree.get_mut(id).ok_or(DomError::UnknownNode(id))?;
        let Node::Element(element) = node.value() else {
            return Err(DomError::NotAnElement(id));
        };
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        edit(&mut attrs);
        *element = Element::new(element.name.clone(), attrs);
        Ok(())
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = attribute_name(name);
        let value = StrTendril::from_slice(value);
        self.update_attributes(id, |attrs| {
            match attrs.iter().position(|attr| attr.name == name) {
                Some(idx) => attrs[idx].value = value,
                None => attrs.push(Attribute { name, value }),
            }
        })
    }

    /// Append a class token unless it is already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let element = self.require_element(id)?;
        if element.has_class(class, CaseSensitivity::CaseSensitive) {
            return Ok(());
        }
        let joined = match element.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_owned(),
        };
        self.set_attribute(id, "class", &joined)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id)
            .and_then(Node::as_element)
            .is_some_and(|el| el.has_class(class, CaseSensitivity::CaseSensitive))
    }

    /// Current value of a form control, initialised from its `value`
    /// attribute; `None` for non-elements.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        let element = self.node(id)?.as_element()?;
        Some(
            self.values
                .get(&id)
                .map(String::as_str)
                .or_else(|| element.attr("value"))
                .unwrap_or_default(),
        )
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        self.require_element(id)?;
        self.values.insert(id, value.to_owned());
        Ok(())
    }

    /// All connected elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Selector`] when the selector cannot be parsed.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .map(|el| el.id())
            .collect())
    }

    /// The first connected element matching `selector`.
    ///
    /// # Errors
    ///
    /// Same as [`Document::select`].
    pub fn select_first(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(|el| el.id()))
    }

    /// Assign the document-relative top of an element, in pixels.
    pub fn set_offset_top(&mut self, id: NodeId, top: f64) {
        self.offsets.insert(id, top);
    }

    pub fn offset_top(&self, id: NodeId) -> f64 {
        self.offsets.get(&id).copied().unwrap_or(0.0)
    }

    /// Top of the element relative to the viewport.
    pub fn bounding_top(&self, id: NodeId) -> f64 {
        self.offset_top(id) - self.scroll_y
    }

    /// Current vertical scroll position.
    pub fn page_y_offset(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll the viewport. Negative targets clamp to the top of the page.
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        tracing::trace!(top, ?behavior, "scroll_to");
        self.scroll_y = top.max(0.0);
        self.scroll_log.push(ScrollRequest { top, behavior });
    }

    /// Every scroll request issued so far, oldest first.
    pub fn scroll_log(&self) -> &[ScrollRequest] {
        &self.scroll_log
    }
}
