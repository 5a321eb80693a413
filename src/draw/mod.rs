//! # Flowchart Drawing
//!
//! Edge synthesis and the instruction stream handed to a drawing surface.

mod edge;
mod linker;
mod node_styles;

pub use edge::*;
pub use linker::{link_sequence, SequenceLinker};
pub use node_styles::*;

use crate::error::Result;
use crate::tree::NodeKind;
use serde::Serialize;

/// Identity and look of one node on the surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDescriptor {
    pub endpoint: Endpoint,
    pub name: String,
    /// `None` for the synthetic Request and Response nodes
    pub kind: Option<NodeKind>,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawInstruction {
    CreateNode(NodeDescriptor),
    CreateEdge(Edge),
}

/// Receiver of a finished flowchart
///
/// The surface is opened and owned by the caller. Instructions arrive in
/// order: every node first, then every edge. `finish` runs exactly once
/// after emission, even when an earlier call failed.
pub trait DrawSurface {
    fn create_node(&mut self, node: &NodeDescriptor) -> Result<()>;

    fn create_edge(&mut self, edge: &Edge) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory surface that keeps every instruction it receives
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub instructions: Vec<DrawInstruction>,
    pub finished: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            DrawInstruction::CreateEdge(edge) => Some(edge),
            DrawInstruction::CreateNode(_) => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn create_node(&mut self, node: &NodeDescriptor) -> Result<()> {
        self.instructions.push(DrawInstruction::CreateNode(node.clone()));
        Ok(())
    }

    fn create_edge(&mut self, edge: &Edge) -> Result<()> {
        self.instructions.push(DrawInstruction::CreateEdge(edge.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
