//! # Pipeline Node Tree
//!
//! The input side of the compiler. A [`NodeSpec`] is the plain, decodable
//! shape of an inference graph; [`PipelineTree::build`] turns it into an
//! immutable tree of [`PipelineNode`]s with stable ids and the per-node
//! attributes the linker needs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a pipeline stage
///
/// Decoded from the `type` field of a graph node. Any string outside the
/// five known kinds is kept verbatim as [`NodeKind::Unknown`] so that an
/// unexpected value degrades gracefully instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Model,
    Transformer,
    OutputTransformer,
    Router,
    Combiner,
    Unknown(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Model => "MODEL",
            NodeKind::Transformer => "TRANSFORMER",
            NodeKind::OutputTransformer => "OUTPUT_TRANSFORMER",
            NodeKind::Router => "ROUTER",
            NodeKind::Combiner => "COMBINER",
            NodeKind::Unknown(raw) => raw,
        }
    }

    /// Whether the stage is called when control first reaches it
    pub fn is_pre_order(&self) -> bool {
        matches!(self, NodeKind::Model | NodeKind::Transformer | NodeKind::Router)
    }

    /// Whether the stage is called only after everything below it returned
    pub fn is_post_order(&self) -> bool {
        matches!(self, NodeKind::Combiner | NodeKind::OutputTransformer)
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Unknown(String::new())
    }
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "MODEL" => NodeKind::Model,
            "TRANSFORMER" => NodeKind::Transformer,
            "OUTPUT_TRANSFORMER" => NodeKind::OutputTransformer,
            "ROUTER" => NodeKind::Router,
            "COMBINER" => NodeKind::Combiner,
            _ => NodeKind::Unknown(raw),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(raw: &str) -> Self {
        NodeKind::from(raw.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodable description of one graph node and its children
///
/// A node that names a prebuilt server in `implementation` but carries no
/// `type` is a model; a node with neither decodes to an empty unknown kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNodeSpec")]
pub struct NodeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    pub children: Vec<NodeSpec>,
}

#[derive(Deserialize)]
struct RawNodeSpec {
    name: String,
    #[serde(rename = "type")]
    kind: Option<NodeKind>,
    implementation: Option<String>,
    #[serde(default)]
    children: Vec<NodeSpec>,
}

impl From<RawNodeSpec> for NodeSpec {
    fn from(raw: RawNodeSpec) -> Self {
        let kind = match (raw.kind, &raw.implementation) {
            (Some(kind), _) => kind,
            (None, Some(_)) => NodeKind::Model,
            (None, None) => NodeKind::default(),
        };

        Self {
            name: raw.name,
            kind,
            implementation: raw.implementation,
            children: raw.children,
        }
    }
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<NodeKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            implementation: None,
            children: Vec::new(),
        }
    }

    /// Append a child, keeping insertion order
    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Pre-order position of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One stage of a built pipeline tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineNode {
    id: NodeId,
    // First pre-order id past this node's subtree.
    subtree_end: usize,
    name: String,
    kind: NodeKind,
    children: Vec<PipelineNode>,
    suppress_response_edge: bool,
}

impl PipelineNode {
    fn build(spec: &NodeSpec, next_id: &mut usize, under_combiner: bool) -> Self {
        let id = NodeId(*next_id);
        *next_id += 1;

        if let NodeKind::Unknown(raw) = &spec.kind {
            tracing::debug!(
                "[TREE] Node '{}' has unknown kind '{}', treated as pass-through",
                spec.name,
                raw
            );
        }

        // Everything strictly below a combiner is answered through it.
        let children_suppressed = under_combiner || spec.kind == NodeKind::Combiner;
        let children = spec
            .children
            .iter()
            .map(|child| PipelineNode::build(child, next_id, children_suppressed))
            .collect();

        Self {
            id,
            subtree_end: *next_id,
            name: spec.name.clone(),
            kind: spec.kind.clone(),
            children,
            suppress_response_edge: under_combiner,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[PipelineNode] {
        &self.children
    }

    /// True for strict descendants of a combiner; such nodes never answer
    /// the request directly.
    pub fn suppress_response_edge(&self) -> bool {
        self.suppress_response_edge
    }

    /// Whether `id` is this node or one of its descendants
    pub fn contains(&self, id: NodeId) -> bool {
        self.id.0 <= id.0 && id.0 < self.subtree_end
    }

    /// Index of the child whose subtree holds `id`
    pub fn child_index_containing(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|child| child.contains(id))
    }

    fn find(&self, id: NodeId) -> Option<&PipelineNode> {
        if !self.contains(id) {
            return None;
        }
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Immutable pipeline tree with exactly one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineTree {
    root: PipelineNode,
}

impl PipelineTree {
    /// Build the tree, assigning pre-order ids and propagating the
    /// combiner response suppression to every descendant.
    pub fn build(spec: &NodeSpec) -> Self {
        let mut next_id = 0;
        let root = PipelineNode::build(spec, &mut next_id, false);
        tracing::debug!("[TREE] Built tree rooted at '{}' with {} nodes", root.name, next_id);
        Self { root }
    }

    pub fn root(&self) -> &PipelineNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.subtree_end
    }

    pub fn node(&self, id: NodeId) -> Option<&PipelineNode> {
        self.root.find(id)
    }

    /// All nodes in pre-order, which is also id order
    pub fn nodes(&self) -> Vec<&PipelineNode> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}
