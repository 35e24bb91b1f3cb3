//! In-memory element tree.
//!
//! A `Document` is a tree of `DomNode` values stored in a `petgraph` stable
//! graph, with edges going from parent → child. It stands in for the browser
//! DOM: elements have a tag and namespace, an optional interned id, ordered
//! attributes, and optional text content. An id → node index keeps lookups by
//! id O(1), which is what the drawers rely on to reuse elements frame after
//! frame instead of recreating them.

use crate::error::DomError;
use crate::id::ElementId;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Element namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    Html,
    Svg,
}

impl Namespace {
    pub fn uri(self) -> &'static str {
        match self {
            Self::Html => XHTML_NS,
            Self::Svg => SVG_NS,
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            XHTML_NS => Some(Self::Html),
            SVG_NS => Some(Self::Svg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document itself. Exactly one per tree, never removed.
    Document,
    Element { tag: String, namespace: Namespace },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A single node of the element tree.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub kind: NodeKind,

    /// The element's `id` attribute, interned.
    pub id: Option<ElementId>,

    /// Attributes other than `id`, in the order they were first set.
    pub attributes: SmallVec<[Attribute; 8]>,

    /// Text content (`textContent`); only leaf elements use it.
    pub text: Option<String>,

    /// Insertion sequence. Children are ordered by it.
    seq: u64,
}

impl DomNode {
    fn new(kind: NodeKind, seq: u64) -> Self {
        Self {
            kind,
            id: None,
            attributes: SmallVec::new(),
            text: None,
            seq,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Document => None,
        }
    }

    pub fn namespace(&self) -> Option<Namespace> {
        match &self.kind {
            NodeKind::Element { namespace, .. } => Some(*namespace),
            NodeKind::Document => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Look up an attribute value. `id` is answered from the interned id.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_ref().map(ElementId::as_str);
        }
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    fn upsert(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete element tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// The underlying directed graph.
    pub graph: StableDiGraph<DomNode, ()>,

    /// The document node.
    pub root: NodeIndex,

    /// The `body` element, created with the document.
    body: NodeIndex,

    /// Index from ElementId → NodeIndex for fast lookup.
    id_index: HashMap<ElementId, NodeIndex>,

    next_seq: u64,
}

impl Document {
    /// Create a document holding only an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(DomNode::new(NodeKind::Document, 0));
        let body = graph.add_node(DomNode::new(
            NodeKind::Element {
                tag: "body".into(),
                namespace: Namespace::Html,
            },
            1,
        ));
        graph.add_edge(root, body, ());

        Self {
            graph,
            root,
            body,
            id_index: HashMap::new(),
            next_seq: 2,
        }
    }

    pub fn body(&self) -> NodeIndex {
        self.body
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.graph.contains_node(idx)
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&DomNode> {
        self.graph.node_weight(idx)
    }

    /// Number of elements, not counting the document node.
    pub fn element_count(&self) -> usize {
        self.graph.node_count() - 1
    }

    /// Create a namespaced element and append it to `parent`.
    pub fn create_element(
        &mut self,
        parent: NodeIndex,
        tag: &str,
        namespace: Namespace,
    ) -> Result<NodeIndex, DomError> {
        if !self.contains(parent) {
            return Err(DomError::InvalidParent(parent));
        }
        let seq = self.bump_seq();
        let kind = NodeKind::Element {
            tag: tag.to_string(),
            namespace,
        };
        let idx = self.graph.add_node(DomNode::new(kind, seq));
        self.graph.add_edge(parent, idx, ());
        Ok(idx)
    }

    /// Swap an element for a fresh one with another tag, keeping its id and
    /// its position among its siblings. Attributes, text and children are
    /// dropped.
    pub fn replace_element(
        &mut self,
        idx: NodeIndex,
        tag: &str,
        namespace: Namespace,
    ) -> Result<NodeIndex, DomError> {
        let old = self.node(idx).ok_or(DomError::UnknownNode(idx))?;
        let (seq, id) = (old.seq, old.id);
        let parent = self.parent(idx).ok_or(DomError::RootRemoval)?;
        self.remove_node(idx)?;

        let kind = NodeKind::Element {
            tag: tag.to_string(),
            namespace,
        };
        let mut node = DomNode::new(kind, seq);
        node.id = id;
        let new_idx = self.graph.add_node(node);
        self.graph.add_edge(parent, new_idx, ());
        if let Some(id) = id {
            self.id_index.insert(id, new_idx);
        }
        Ok(new_idx)
    }

    /// Set (or move) an element id, keeping the index synchronized.
    /// When two elements claim the same id the later one wins the lookup.
    pub fn set_id(&mut self, idx: NodeIndex, id: &str) -> Result<(), DomError> {
        let node = self
            .graph
            .node_weight_mut(idx)
            .ok_or(DomError::UnknownNode(idx))?;
        let new_id = ElementId::intern(id);
        if let Some(old) = node.id.replace(new_id)
            && self.id_index.get(&old) == Some(&idx)
        {
            self.id_index.remove(&old);
        }
        if let Some(prev) = self.id_index.insert(new_id, idx)
            && prev != idx
        {
            log::debug!("id `{id}` moved from {prev:?} to {idx:?}");
        }
        Ok(())
    }

    /// Look up an element by its id without interning the lookup key.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeIndex> {
        ElementId::lookup(id).and_then(|id| self.index_of(id))
    }

    pub fn index_of(&self, id: ElementId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Set one attribute. Setting `id` goes through [`set_id`](Self::set_id).
    pub fn set_attribute(
        &mut self,
        idx: NodeIndex,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let value = value.into();
        if name == "id" {
            return self.set_id(idx, &value);
        }
        self.graph
            .node_weight_mut(idx)
            .ok_or(DomError::UnknownNode(idx))?
            .upsert(name, value);
        Ok(())
    }

    /// Set several attributes at once, in iteration order.
    pub fn set_attributes<I, K, V>(&mut self, idx: NodeIndex, attrs: I) -> Result<(), DomError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in attrs {
            self.set_attribute(idx, name.as_ref(), value)?;
        }
        Ok(())
    }

    pub fn attribute(&self, idx: NodeIndex, name: &str) -> Option<&str> {
        self.node(idx)?.attribute(name)
    }

    pub fn set_text(&mut self, idx: NodeIndex, text: impl Into<String>) -> Result<(), DomError> {
        self.graph
            .node_weight_mut(idx)
            .ok_or(DomError::UnknownNode(idx))?
            .text = Some(text.into());
        Ok(())
    }

    /// Get the parent index of a node.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    /// Get children of a node in append order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        if !self.contains(idx) {
            return Vec::new();
        }
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        children.sort_by_key(|c| self.graph[*c].seq);
        children
    }

    /// All descendants of `idx` in document (pre-)order, excluding `idx`.
    pub fn descendants(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeIndex> = self.children(idx).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }

    /// Descendants of `scope` whose class list contains `class`.
    pub fn find_by_class(&self, scope: NodeIndex, class: &str) -> Vec<NodeIndex> {
        self.descendants(scope)
            .into_iter()
            .filter(|idx| self.graph[*idx].has_class(class))
            .collect()
    }

    /// Descendants of `scope` with the given tag name.
    pub fn find_by_tag(&self, scope: NodeIndex, tag: &str) -> Vec<NodeIndex> {
        self.descendants(scope)
            .into_iter()
            .filter(|idx| self.graph[*idx].tag() == Some(tag))
            .collect()
    }

    /// Remove a node and its whole subtree. Returns how many nodes went away.
    pub fn remove_node(&mut self, idx: NodeIndex) -> Result<usize, DomError> {
        if idx == self.root {
            return Err(DomError::RootRemoval);
        }
        if !self.contains(idx) {
            return Err(DomError::UnknownNode(idx));
        }
        let mut doomed = self.descendants(idx);
        doomed.push(idx);
        for victim in &doomed {
            if let Some(node) = self.graph.remove_node(*victim)
                && let Some(id) = node.id
                && self.id_index.get(&id) == Some(victim)
            {
                self.id_index.remove(&id);
            }
        }
        Ok(doomed.len())
    }

    /// Remove every child subtree of `idx`, keeping `idx` itself.
    pub fn clear_children(&mut self, idx: NodeIndex) -> Result<usize, DomError> {
        if !self.contains(idx) {
            return Err(DomError::UnknownNode(idx));
        }
        let mut removed = 0;
        for child in self.children(idx) {
            removed += self.remove_node(child)?;
        }
        Ok(removed)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
