//! # Sequence Linker
//!
//! Connects a call sequence into an ordered edge list framed by the
//! synthetic Request and Response endpoints.

use super::edge::{Edge, EdgeKind, EdgeLabel, Endpoint};
use crate::error::{FlowchartError, Result};
use crate::sequence::{BranchGroup, Element, Sequence};
use crate::tree::{NodeKind, PipelineNode, PipelineTree};

/// Something an edge can start or end at
#[derive(Debug, Clone, Copy)]
enum Terminal<'t> {
    Request,
    Response,
    Node(&'t PipelineNode),
}

impl<'t> Terminal<'t> {
    fn endpoint(self) -> Endpoint {
        match self {
            Terminal::Request => Endpoint::Request,
            Terminal::Response => Endpoint::Response,
            Terminal::Node(node) => Endpoint::Node(node.id()),
        }
    }

    fn node(self) -> Option<&'t PipelineNode> {
        match self {
            Terminal::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// A position in the walk: an edge terminal or a whole branch group
#[derive(Debug, Clone, Copy)]
enum Step<'s, 't> {
    Terminal(Terminal<'t>),
    Branches(&'s BranchGroup<'t>),
}

impl<'s, 't> From<&'s Element<'t>> for Step<'s, 't> {
    fn from(element: &'s Element<'t>) -> Self {
        match element {
            Element::Node(node) => Step::Terminal(Terminal::Node(*node)),
            Element::Branches(group) => Step::Branches(group),
        }
    }
}

/// Link `sequence`, built from `tree`, into edges
pub fn link_sequence(tree: &PipelineTree, sequence: &Sequence<'_>) -> Result<Vec<Edge>> {
    SequenceLinker::new(tree).link(sequence)
}

/// Edge emitter for one call sequence
pub struct SequenceLinker<'a> {
    tree: &'a PipelineTree,
    edges: Vec<Edge>,
}

impl<'a> SequenceLinker<'a> {
    pub fn new(tree: &'a PipelineTree) -> Self {
        Self {
            tree,
            edges: Vec::new(),
        }
    }

    /// Walk Request, the sequence, then Response, connecting each adjacent pair
    pub fn link(mut self, sequence: &Sequence<'_>) -> Result<Vec<Edge>> {
        if sequence.is_empty() {
            return Err(FlowchartError::EmptySequence {
                root: self.tree.root().name().to_string(),
            });
        }

        let mut steps = Vec::with_capacity(sequence.len() + 2);
        steps.push(Step::Terminal(Terminal::Request));
        steps.extend(sequence.elements().iter().map(Step::from));
        steps.push(Step::Terminal(Terminal::Response));

        self.link_steps(&steps)?;

        tracing::debug!(
            "[LINKER] Linked {} top-level elements into {} edges",
            sequence.len(),
            self.edges.len()
        );
        Ok(self.edges)
    }

    fn link_steps(&mut self, steps: &[Step<'_, '_>]) -> Result<()> {
        for pair in steps.windows(2) {
            self.connect(pair[0], pair[1])?;
        }
        Ok(())
    }

    fn link_elements(&mut self, elements: &[Element<'_>]) -> Result<()> {
        let steps: Vec<Step<'_, '_>> = elements.iter().map(Step::from).collect();
        self.link_steps(&steps)
    }

    fn connect(&mut self, head: Step<'_, '_>, tail: Step<'_, '_>) -> Result<()> {
        match (head, tail) {
            (Step::Branches(head), Step::Branches(tail)) => {
                Err(FlowchartError::AdjacentBranchGroups {
                    head: head.owner.name().to_string(),
                    tail: tail.owner.name().to_string(),
                })
            }
            (Step::Terminal(head), Step::Branches(group)) => self.fan_out(head, group),
            (Step::Branches(group), Step::Terminal(tail)) => self.fan_in(group, tail),
            (Step::Terminal(head), Step::Terminal(tail)) => {
                self.push_edge(head, tail, EdgeKind::PassThrough);
                Ok(())
            }
        }
    }

    /// Connect `head` to the start of every fork, then link each fork
    fn fan_out(&mut self, head: Terminal<'_>, group: &BranchGroup<'_>) -> Result<()> {
        for fork in &group.forks {
            let first = fork.elements.first().ok_or_else(|| FlowchartError::EmptyFork {
                owner: group.owner.name().to_string(),
                fork: fork.index,
            })?;

            match first {
                Element::Node(node) => {
                    self.push_edge(head, Terminal::Node(*node), EdgeKind::Branch)
                }
                Element::Branches(nested) => self.fan_out(head, nested)?,
            }

            self.link_elements(&fork.elements)?;
        }
        Ok(())
    }

    /// Connect the tail of every fork, however deeply nested, to `tail`
    fn fan_in(&mut self, group: &BranchGroup<'_>, tail: Terminal<'_>) -> Result<()> {
        for fork in &group.forks {
            let last = fork.elements.last().ok_or_else(|| FlowchartError::EmptyFork {
                owner: group.owner.name().to_string(),
                fork: fork.index,
            })?;

            match last {
                Element::Node(node) => {
                    self.push_edge(Terminal::Node(*node), tail, EdgeKind::Branch)
                }
                Element::Branches(nested) => self.fan_in(nested, tail)?,
            }
        }
        Ok(())
    }

    fn push_edge(&mut self, head: Terminal<'_>, tail: Terminal<'_>, kind: EdgeKind) {
        if let (Some(node), Terminal::Response) = (head.node(), tail) {
            if node.suppress_response_edge() {
                tracing::debug!(
                    "[LINKER] '{}' sits under a combiner, no Response edge",
                    node.name()
                );
                return;
            }
        }

        let mut edge = Edge::new(head.endpoint(), tail.endpoint(), kind);
        if let (Some(from), Some(to)) = (head.node(), tail.node()) {
            annotate(&mut edge, from, to);
        }

        tracing::debug!("[LINKER] Edge {:?} -> {:?} ({:?})", edge.head, edge.tail, edge.kind);
        self.edges.push(edge);
    }
}

/// Router fan-out carries the router's child index; combiner fan-in carries
/// the combiner's child index and runs both ways.
fn annotate(edge: &mut Edge, head: &PipelineNode, tail: &PipelineNode) {
    match (head.kind(), tail.kind()) {
        (NodeKind::Router, _) if head.contains(tail.id()) => {
            edge.label = head.child_index_containing(tail.id()).map(EdgeLabel::Option);
        }
        (_, NodeKind::Combiner) if tail.contains(head.id()) => {
            edge.label = tail.child_index_containing(head.id()).map(EdgeLabel::Element);
            edge.bidirectional = true;
        }
        _ => {}
    }
}
