//! # Flowchart Edges

use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One end of an edge: a synthetic endpoint or a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Request,
    Response,
    Node(NodeId),
}

/// Whether an edge is a plain hand-off or part of a fan-out/fan-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    PassThrough,
    Branch,
}

/// Display annotation identifying which child an edge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeLabel {
    /// Router fan-out towards the router's child at this index
    Option(usize),
    /// Combiner fan-in from the combiner's child at this index
    Element(usize),
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeLabel::Option(index) => write!(f, "option[{}]", index),
            EdgeLabel::Element(index) => write!(f, "element[{}]", index),
        }
    }
}

/// Directed call-order edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub head: Endpoint,
    pub tail: Endpoint,
    pub kind: EdgeKind,
    pub label: Option<EdgeLabel>,
    /// Set only on edges converging into a combiner from its own children
    pub bidirectional: bool,
}

impl Edge {
    pub fn new(head: Endpoint, tail: Endpoint, kind: EdgeKind) -> Self {
        Self {
            head,
            tail,
            kind,
            label: None,
            bidirectional: false,
        }
    }
}
