//! Document access for the widgets
//!
//! [`Dom`] is the narrow slice of a browser document the widgets need:
//! lookup, class and attribute mutation, inline style, text, form values,
//! focus and scrolling. [`MemoryDom`] is an arena-backed implementation that
//! also records layout so the scroll-spy can be driven without a renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::geometry::{Span, Viewport};

/// Handle to an element inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

pub trait Dom {
    /// The document element (`<html>`)
    fn root(&self) -> NodeId;
    fn body(&self) -> Option<NodeId>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn tag(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    /// Set an inline style property; an empty value removes it
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Text content of the element and its descendants
    fn text(&self, node: NodeId) -> String;
    /// Replace all children with the given text
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Current value of a form control
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str);

    fn create_element(&mut self, tag: &str) -> NodeId;
    /// Append `child` to `parent`, detaching it from its previous parent
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    fn clear_children(&mut self, node: NodeId);

    fn focus(&mut self, node: NodeId);
    fn focused(&self) -> Option<NodeId>;

    fn layout(&self, node: NodeId) -> Option<Span>;
    fn viewport(&self) -> Viewport;
    fn set_scroll_y(&mut self, scroll_y: f64);
    /// Smooth-scroll so the element's top meets the viewport top.
    /// Returns the new scroll offset when the element has a layout.
    fn scroll_into_view(&mut self, node: NodeId) -> Option<f64>;

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// All descendants of `scope` in document order, excluding `scope`
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root();
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|node| self.attribute(*node, "id").as_deref() == Some(id))
    }

    fn descendants_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    fn descendants_with_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.tag(*node) == Some(tag))
            .collect()
    }

    fn first_with_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.has_class(*node, class))
    }

    /// Nearest inclusive ancestor matching `predicate`
    fn closest<P>(&self, node: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Self, NodeId) -> bool,
    {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if predicate(self, candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Whether `node` is `ancestor` or lies inside it
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.closest(node, |_, candidate| candidate == ancestor)
            .is_some()
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    layout: Option<Span>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            layout: None,
        }
    }
}

/// In-memory document
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    focused: Option<NodeId>,
    viewport: Viewport,
    scroll_history: Vec<NodeId>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty `<html><body></body></html>` document
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Node::new("html")],
            root: NodeId(0),
            body: NodeId(0),
            focused: None,
            viewport: Viewport::default(),
            scroll_history: Vec::new(),
        };
        let body = dom.create_element("body");
        dom.append_child(dom.root, body);
        dom.body = body;
        dom
    }

    pub fn set_layout(&mut self, node: NodeId, span: Span) {
        if let Some(n) = self.node_mut(node) {
            n.layout = Some(span);
        }
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport.height = height;
    }

    /// Elements passed to `scroll_into_view`, oldest first
    pub fn scroll_history(&self) -> &[NodeId] {
        &self.scroll_history
    }

    /// Classes of an element in insertion order
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    /// Convenience constructor used when assembling markup
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
    ) -> NodeId {
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_attribute(node, "id", id);
        }
        for class in classes {
            self.add_class(node, class);
        }
        self.append_child(parent, node);
        node
    }

    /// Serializable view of the attached tree
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            viewport: self.viewport,
            focused: self.focused.map(|node| self.describe(node)),
            root: self.snapshot_node(self.root),
        }
    }

    fn describe(&self, node: NodeId) -> String {
        match self.attribute(node, "id") {
            Some(id) => format!("#{id}"),
            None => self.tag(node).unwrap_or_default().to_string(),
        }
    }

    fn snapshot_node(&self, node: NodeId) -> NodeSnapshot {
        let Some(n) = self.node(node) else {
            return NodeSnapshot::default();
        };
        NodeSnapshot {
            tag: n.tag.clone(),
            attributes: n.attributes.clone(),
            classes: n.classes.clone(),
            style: n.style.clone(),
            text: n.text.clone(),
            value: n.value.clone(),
            children: n
                .children
                .iter()
                .map(|child| self.snapshot_node(*child))
                .collect(),
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.node_mut(old_parent) {
            parent.children.retain(|c| *c != child);
        }
        if let Some(n) = self.node_mut(child) {
            n.parent = None;
        }
    }
}

impl Dom for MemoryDom {
    fn root(&self) -> NodeId {
        self.root
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let n = self.node(node)?;
        if name == "class" {
            return (!n.classes.is_empty()).then(|| n.classes.join(" "));
        }
        n.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        if name == "class" {
            n.classes = value.split_whitespace().map(String::from).collect();
        } else {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            if name == "class" {
                n.classes.clear();
            } else {
                n.attributes.remove(name);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(n) = self.node_mut(node) {
            n.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node).and_then(|n| n.style.get(property).cloned())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        if value.is_empty() {
            n.style.remove(property);
        } else {
            n.style.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, node: NodeId) -> String {
        let Some(n) = self.node(node) else {
            return String::new();
        };
        let mut text = n.text.clone();
        for child in &n.children {
            text.push_str(&self.text(*child));
        }
        text
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if let Some(n) = self.node_mut(node) {
            n.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.value = value.to_string();
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.contains(child, parent) || self.node(parent).is_none() {
            return;
        }
        self.detach(child);
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        for child in self.children(node) {
            self.detach(child);
        }
        if let Some(n) = self.node_mut(node) {
            n.text.clear();
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.node(node).is_some() {
            self.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn layout(&self, node: NodeId) -> Option<Span> {
        self.node(node).and_then(|n| n.layout)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y.max(0.0);
    }

    fn scroll_into_view(&mut self, node: NodeId) -> Option<f64> {
        self.node(node)?;
        self.scroll_history.push(node);
        let top = self.layout(node)?.top;
        self.set_scroll_y(top);
        Some(self.viewport.scroll_y)
    }
}

/// Serializable element tree
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub viewport: Viewport,
    pub focused: Option<String>,
    pub root: NodeSnapshot,
}
