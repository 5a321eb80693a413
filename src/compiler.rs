//! # Flowchart Compiler
//!
//! Main entry points for compiling inference graphs into call-order flowcharts.

use crate::config::FlowchartConfig;
use crate::deployment::SeldonDeployment;
use crate::draw::{
    endpoint_style, link_sequence, style_for_kind, DrawInstruction, DrawSurface, Edge, Endpoint,
    NodeDescriptor,
};
use crate::error::Result;
use crate::sequence::build_sequence;
use crate::tree::{NodeSpec, PipelineTree};

/// A fully linked flowchart, ready to be flushed to a surface
///
/// Compilation either yields the complete node and edge lists or fails
/// before anything is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flowchart {
    nodes: Vec<NodeDescriptor>,
    edges: Vec<Edge>,
}

impl Flowchart {
    /// Request, every tree node in pre-order, then Response
    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, endpoint: Endpoint) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|node| node.endpoint == endpoint)
    }

    /// Edges as `(head name, tail name)` pairs
    pub fn edge_names(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|edge| (self.display_name(edge.head), self.display_name(edge.tail)))
            .collect()
    }

    fn display_name(&self, endpoint: Endpoint) -> &str {
        self.node(endpoint).map(|node| node.name.as_str()).unwrap_or_default()
    }

    /// Full instruction stream: node creations first, then edges in link order
    pub fn instructions(&self) -> Vec<DrawInstruction> {
        self.nodes
            .iter()
            .cloned()
            .map(DrawInstruction::CreateNode)
            .chain(self.edges.iter().cloned().map(DrawInstruction::CreateEdge))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.instructions())?)
    }

    /// Flush the flowchart to `surface`, then let the surface finish
    ///
    /// `finish` is called even when emission fails; the first error wins.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let emitted = self.emit(surface);
        let finished = surface.finish();
        if let Err(e) = &emitted {
            tracing::warn!("[FLOWCHART] Drawing stopped early: {}", e);
        }
        emitted.and(finished)
    }

    fn emit<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        for node in &self.nodes {
            surface.create_node(node)?;
        }
        for edge in &self.edges {
            surface.create_edge(edge)?;
        }
        tracing::debug!(
            "[FLOWCHART] Flushed {} nodes and {} edges",
            self.nodes.len(),
            self.edges.len()
        );
        Ok(())
    }
}

/// Compile a node graph into a flowchart with the default config
///
/// # Examples
///
/// ```rust
/// use inference_flowchart::{compile_graph, NodeKind, NodeSpec};
///
/// let graph = NodeSpec::new("classifier", NodeKind::Model);
/// let flowchart = compile_graph(&graph).unwrap();
/// assert_eq!(
///     flowchart.edge_names(),
///     vec![("Request", "classifier"), ("classifier", "Response")]
/// );
/// ```
pub fn compile_graph(graph: &NodeSpec) -> Result<Flowchart> {
    compile_graph_with_config(graph, &FlowchartConfig::default())
}

pub fn compile_graph_with_config(graph: &NodeSpec, config: &FlowchartConfig) -> Result<Flowchart> {
    compile_tree(&PipelineTree::build(graph), config)
}

/// Compile an already built tree
pub fn compile_tree(tree: &PipelineTree, config: &FlowchartConfig) -> Result<Flowchart> {
    tracing::info!("[FLOWCHART] Starting flowchart compilation");
    tracing::info!("[FLOWCHART] Tree: '{}' ({} nodes)", tree.root().name(), tree.node_count());

    // Phase 1: Sequence the calls
    tracing::info!("[FLOWCHART] Phase 1: Building call sequence...");
    let sequence = build_sequence(tree.root());
    tracing::info!("[FLOWCHART]   - {} top-level elements", sequence.len());

    // Phase 2: Link the sequence
    tracing::info!("[FLOWCHART] Phase 2: Linking edges...");
    let mut edges = link_sequence(tree, &sequence)?;
    if !config.edge_labels {
        for edge in &mut edges {
            edge.label = None;
            edge.bidirectional = false;
        }
    }
    tracing::info!("[FLOWCHART]   - {} edges", edges.len());

    // Phase 3: Describe the nodes
    tracing::info!("[FLOWCHART] Phase 3: Describing nodes...");
    let mut nodes = Vec::with_capacity(tree.node_count() + 2);
    nodes.push(NodeDescriptor {
        endpoint: Endpoint::Request,
        name: config.request_name.clone(),
        kind: None,
        style: endpoint_style(),
    });
    nodes.extend(tree.nodes().into_iter().map(|node| NodeDescriptor {
        endpoint: Endpoint::Node(node.id()),
        name: node.name().to_string(),
        kind: Some(node.kind().clone()),
        style: style_for_kind(node.kind()),
    }));
    nodes.push(NodeDescriptor {
        endpoint: Endpoint::Response,
        name: config.response_name.clone(),
        kind: None,
        style: endpoint_style(),
    });

    tracing::info!("[FLOWCHART] Compilation successful!");

    Ok(Flowchart { nodes, edges })
}

/// Compile the predictor graph selected by `config.predictor`
pub fn compile_deployment(
    deployment: &SeldonDeployment,
    config: &FlowchartConfig,
) -> Result<Flowchart> {
    tracing::info!(
        "[FLOWCHART] Deployment '{}', predictor {}",
        deployment.name(),
        config.predictor
    );
    let graph = deployment.predictor_graph(config.predictor)?;
    compile_graph_with_config(graph, config)
}

/// Decode a JSON SeldonDeployment manifest and compile it
pub fn compile_deployment_json(json: &str, config: &FlowchartConfig) -> Result<Flowchart> {
    let deployment = SeldonDeployment::from_json(json)?;
    compile_deployment(&deployment, config)
}

/// Compile and flush to `surface` in one step; nothing is drawn on failure
pub fn draw_graph<S: DrawSurface + ?Sized>(graph: &NodeSpec, surface: &mut S) -> Result<Flowchart> {
    let flowchart = compile_graph(graph)?;
    flowchart.draw(surface)?;
    Ok(flowchart)
}
