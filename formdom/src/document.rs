//! Arena-backed live document.
//!
//! A [`Document`] owns every node it ever created. Nodes removed from the tree
//! are only detached: their [`NodeId`] stays valid and they can be inserted
//! again, which mirrors how a DOM node survives `removeChild`.

use crate::element::{Element, File};
use crate::selector::Selector;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    value: String,
    files: Vec<File>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn detached(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: String::new(),
            value: String::new(),
            files: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        if let Some(tag) = &selector.tag {
            if &self.tag != tag {
                return false;
            }
        }
        if let Some(id) = &selector.id {
            if self.id.as_ref() != Some(id) {
                return false;
            }
        }
        if !selector.classes.iter().all(|c| self.classes.contains(c)) {
            return false;
        }
        selector.attributes.iter().all(|cond| {
            let actual = match cond.name.as_str() {
                "id" => self.id.as_deref(),
                "class" if !self.classes.is_empty() => Some(""),
                name => self
                    .attributes
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.as_str()),
            };
            match (&cond.value, actual) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(expected), Some(_)) if cond.name == "class" => {
                    self.classes.iter().any(|c| c == expected)
                }
                (Some(expected), Some(actual)) => expected == actual,
            }
        })
    }
}

/// A mutable document tree with focus, scroll and submit bookkeeping.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
    scrolled: Option<(NodeId, bool)>,
    submissions: Vec<NodeId>,
}

impl Document {
    /// Load an element tree.
    pub fn new(root: Element) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            focused: None,
            scrolled: None,
            submissions: Vec::new(),
        };
        doc.root = doc.load(root, None);
        doc
    }

    fn load(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: element.tag,
            id: element.id,
            classes: element.classes,
            attributes: element.attributes,
            text: element.text,
            value: element.value,
            files: element.files,
            parent,
            children: Vec::new(),
        });
        for child in element.children {
            let child_id = self.load(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Queries

    /// Find a connected element by its `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.node(n).id.as_deref() == Some(id))
    }

    /// All strict descendants of `scope`, in document order.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.node(n).matches(selector))
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.node(n).matches(selector))
            .collect()
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.node(node).matches(selector)
    }

    // Reads

    pub fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.node(node).id.as_deref()
    }

    /// Read an attribute. `id` and `class` are served from their own fields.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let n = self.node(node);
        match name {
            "id" => n.id.as_deref(),
            _ => n
                .attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.node(node).value
    }

    pub fn files(&self, node: NodeId) -> &[File] {
        &self.node(node).files
    }

    /// Own text followed by the text of every descendant.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = self.node(node).text.clone();
        for id in self.descendants(node) {
            text.push_str(&self.node(id).text);
        }
        text
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.node(node).classes
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// True when `node` can be reached from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Child indices leading from the root to `node`.
    pub fn path(&self, node: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            let index = self
                .node(parent)
                .children
                .iter()
                .position(|&c| c == current)
                .unwrap_or_default();
            path.push(index);
            current = parent;
        }
        path.reverse();
        path
    }

    // Writes

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        let n = self.node_mut(node);
        match name.as_str() {
            "id" => n.id = Some(value),
            "class" => n.classes = value.split_whitespace().map(String::from).collect(),
            _ => match n.attributes.iter_mut().find(|(k, _)| *k == name) {
                Some((_, existing)) => *existing = value,
                None => n.attributes.push((name, value)),
            },
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let n = self.node_mut(node);
        match name {
            "id" => n.id = None,
            "class" => n.classes.clear(),
            _ => n.attributes.retain(|(k, _)| k != name),
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.node_mut(node).value = value.into();
    }

    pub fn set_files(&mut self, node: NodeId, files: Vec<File>) {
        self.node_mut(node).files = files;
    }

    /// Replace the node's own text. Children are kept.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.node_mut(node).text = text.into();
    }

    /// Returns true if the class was added.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            return false;
        }
        self.node_mut(node).classes.push(class.to_string());
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        let classes = &mut self.node_mut(node).classes;
        let before = classes.len();
        classes.retain(|c| c != class);
        classes.len() != before
    }

    /// Flip a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.remove_class(node, class) {
            false
        } else {
            self.add_class(node, class)
        }
    }

    /// Create a detached element. Insert it with [`Document::append_child`] and friends.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(tag));
        id
    }

    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                log::warn!("refusing to insert {child:?} into its own subtree");
                return false;
            }
            current = self.node(id).parent;
        }
        true
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.remove(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.remove(child);
        self.node_mut(parent).children.insert(0, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `node` as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.node(reference).parent else {
            log::warn!("cannot insert after detached node {reference:?}");
            return;
        };
        if reference == node || !self.can_adopt(parent, node) {
            return;
        }
        self.remove(node);
        let siblings = &mut self.node_mut(parent).children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, node);
        self.node_mut(node).parent = Some(parent);
    }

    /// Detach `node` (and its subtree) from its parent. No-op for detached nodes.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
        if self.focused.is_some_and(|f| !self.is_connected(f)) {
            self.focused = None;
        }
    }

    // Host behaviors

    pub fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn scroll_into_view(&mut self, node: NodeId, align_to_top: bool) {
        self.scrolled = Some((node, align_to_top));
    }

    /// Last node scrolled into view and whether it was aligned to the top.
    pub fn scrolled_into_view(&self) -> Option<(NodeId, bool)> {
        self.scrolled
    }

    /// The default submit action. Records the submission.
    pub fn submit(&mut self, form: NodeId) {
        log::info!("submitting form {:?}", self.id(form).unwrap_or("<anonymous>"));
        self.submissions.push(form);
    }

    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }
}
