//! # Inference Flowchart
//!
//! Compiler from Seldon-style inference graphs (trees of models,
//! transformers, routers, combiners and output transformers) to flowcharts
//! that show the order in which a request actually visits each stage.
//!
//! The crate stops at an abstract instruction stream: nodes with shape
//! hints and directed edges with optional labels. Turning that stream into
//! pixels is the job of a [`DrawSurface`] supplied by the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use inference_flowchart::{compile_graph, NodeKind, NodeSpec};
//!
//! let graph = NodeSpec::new("preprocess", NodeKind::Transformer).with_child(
//!     NodeSpec::new("router", NodeKind::Router).with_children([
//!         NodeSpec::new("model-a", NodeKind::Model),
//!         NodeSpec::new("model-b", NodeKind::Model),
//!     ]),
//! );
//!
//! let flowchart = compile_graph(&graph)?;
//! assert_eq!(flowchart.edges().len(), 6);
//! # Ok::<(), inference_flowchart::FlowchartError>(())
//! ```
//!
//! ## Architecture
//!
//! 1. **Tree Building** - Assign ids and mark combiner descendants
//! 2. **Sequencing** - Order the calls, grouping parallel paths
//! 3. **Linking** - Connect the sequence between Request and Response
//! 4. **Flushing** - Hand the finished instruction stream to a surface

pub mod compiler;
pub mod config;
pub mod deployment;
pub mod draw;
pub mod error;
pub mod sequence;
pub mod tree;

// Re-export the main compilation API
pub use compiler::{
    compile_deployment,
    compile_deployment_json,
    compile_graph,
    compile_graph_with_config,
    compile_tree,
    draw_graph,
    Flowchart,
};

pub use config::FlowchartConfig;
pub use deployment::{DeploymentSpec, Predictor, SeldonDeployment};
pub use draw::{
    DrawInstruction, DrawSurface, Edge, EdgeKind, EdgeLabel, Endpoint, NodeDescriptor, NodeShape,
    NodeStyle, RecordingSurface,
};
pub use error::{FlowchartError, Result};
pub use sequence::{build_sequence, BranchGroup, Element, Fork, Sequence};
pub use tree::{NodeId, NodeKind, NodeSpec, PipelineNode, PipelineTree};
