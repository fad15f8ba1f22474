//! The host document as seen by the engine.

use std::fmt::Debug;
use std::hash::Hash;

use formdom::{Document, NodeId, Selector};

/// Capabilities the engine needs from the document it validates.
///
/// The engine never holds on to host data between calls; it only keeps node
/// handles, so `Node` must be a cheap copyable identity.
pub trait HostTree {
    type Node: Copy + Eq + Hash + Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Strict descendants of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: Self::Node, selector: &Selector) -> Vec<Self::Node>;

    fn query_first(&self, scope: Self::Node, selector: &Selector) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Current value of an input-like element.
    fn value(&self, node: Self::Node) -> &str;

    /// Declared MIME types of the files attached to a file input.
    fn file_types(&self, node: Self::Node) -> Vec<String>;

    fn text_content(&self, node: Self::Node) -> String;
    fn set_text(&mut self, node: Self::Node, text: &str);

    fn has_class(&self, node: Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: Self::Node, class: &str);
    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);
    fn prepend_child(&mut self, parent: Self::Node, child: Self::Node);
    fn insert_after(&mut self, reference: Self::Node, node: Self::Node);
    fn remove(&mut self, node: Self::Node);

    /// Whether `node` is still part of the document.
    fn is_connected(&self, node: Self::Node) -> bool;

    /// Child indices from the root to `node`.
    fn path(&self, node: Self::Node) -> Vec<usize>;

    fn focus(&mut self, node: Self::Node);
    fn scroll_into_view(&mut self, node: Self::Node, align_to_top: bool);

    /// The host's own submit action for `form`.
    fn submit(&mut self, form: Self::Node);
}

impl HostTree for Document {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.get_element_by_id(id)
    }

    fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.query_selector_all(scope, selector)
    }

    fn query_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_selector(scope, selector)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Document::attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        Document::set_attribute(self, node, name, value);
    }

    fn value(&self, node: NodeId) -> &str {
        Document::value(self, node)
    }

    fn file_types(&self, node: NodeId) -> Vec<String> {
        self.files(node).iter().map(|f| f.mime.clone()).collect()
    }

    fn text_content(&self, node: NodeId) -> String {
        Document::text_content(self, node)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        Document::set_text(self, node, text);
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        Document::has_class(self, node, class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        Document::add_class(self, node, class);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        Document::remove_class(self, node, class);
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        Document::create_element(self, tag)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        Document::append_child(self, parent, child);
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        Document::prepend_child(self, parent, child);
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        Document::insert_after(self, reference, node);
    }

    fn remove(&mut self, node: NodeId) {
        Document::remove(self, node);
    }

    fn is_connected(&self, node: NodeId) -> bool {
        Document::is_connected(self, node)
    }

    fn path(&self, node: NodeId) -> Vec<usize> {
        Document::path(self, node)
    }

    fn focus(&mut self, node: NodeId) {
        Document::focus(self, node);
    }

    fn scroll_into_view(&mut self, node: NodeId, align_to_top: bool) {
        Document::scroll_into_view(self, node, align_to_top);
    }

    fn submit(&mut self, form: NodeId) {
        Document::submit(self, form);
    }
}

/// A field group (or section) given either directly or by element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRef<'a, N> {
    Node(N),
    Id(&'a str),
}

impl<'a> From<&'a str> for GroupRef<'a, NodeId> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a String> for GroupRef<'a, NodeId> {
    fn from(id: &'a String) -> Self {
        Self::Id(id)
    }
}

impl From<NodeId> for GroupRef<'_, NodeId> {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}
