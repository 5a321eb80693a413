//! # Call Sequences
//!
//! The nested, order-preserving shape of a pipeline's call order. A
//! [`Sequence`] is a run of [`Element`]s; an element is either a single
//! stage or a [`BranchGroup`] of forks that leave one upstream element and
//! reconverge on one downstream element.

mod builder;

pub use builder::build_sequence;

use crate::tree::PipelineNode;

/// One step of a call sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<'t> {
    Node(&'t PipelineNode),
    Branches(BranchGroup<'t>),
}

/// Parallel call paths created by a node with several children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchGroup<'t> {
    pub owner: &'t PipelineNode,
    pub forks: Vec<Fork<'t>>,
}

/// One call path of a branch group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fork<'t> {
    /// Index of the owner's child this path was built from
    pub index: usize,
    pub elements: Vec<Element<'t>>,
}

impl<'t> Fork<'t> {
    pub fn new(index: usize, elements: Vec<Element<'t>>) -> Self {
        Self { index, elements }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence<'t> {
    elements: Vec<Element<'t>>,
}

impl<'t> Sequence<'t> {
    pub fn new(elements: Vec<Element<'t>>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element<'t>] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Nodes in visiting order with branch groups flattened fork by fork
    pub fn flatten(&self) -> Vec<&'t PipelineNode> {
        fn walk<'t>(elements: &[Element<'t>], out: &mut Vec<&'t PipelineNode>) {
            for element in elements {
                match element {
                    Element::Node(node) => out.push(*node),
                    Element::Branches(group) => {
                        for fork in &group.forks {
                            walk(&fork.elements, out);
                        }
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.elements, &mut out);
        out
    }
}
