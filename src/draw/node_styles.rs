//! # Node Shape Hints
//!
//! How the renderer is expected to dress each kind of stage. Only hints are
//! produced here; the actual drawing belongs to the surface.

use crate::tree::NodeKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    Octagon,
    Oval,
    DoubleCircle,
    DoubleOctagon,
    InvHouse,
    Box,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeStyle {
    pub shape: NodeShape,
    pub color: Option<&'static str>,
    pub filled: bool,
}

pub fn style_for_kind(kind: &NodeKind) -> NodeStyle {
    match kind {
        NodeKind::Model => NodeStyle {
            shape: NodeShape::Octagon,
            color: Some("chocolate1"),
            filled: true,
        },
        NodeKind::Transformer | NodeKind::OutputTransformer => NodeStyle {
            shape: NodeShape::Oval,
            color: Some("burlywood"),
            filled: true,
        },
        NodeKind::Router => NodeStyle {
            shape: NodeShape::DoubleCircle,
            color: Some("blue"),
            filled: false,
        },
        NodeKind::Combiner => NodeStyle {
            shape: NodeShape::DoubleOctagon,
            color: Some("turquoise"),
            filled: false,
        },
        NodeKind::Unknown(_) => NodeStyle {
            shape: NodeShape::Box,
            color: None,
            filled: false,
        },
    }
}

/// Request and Response share one look
pub fn endpoint_style() -> NodeStyle {
    NodeStyle {
        shape: NodeShape::InvHouse,
        color: None,
        filled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformers_share_a_style() {
        assert_eq!(
            style_for_kind(&NodeKind::Transformer),
            style_for_kind(&NodeKind::OutputTransformer)
        );
    }

    #[test]
    fn unknown_kinds_are_plain_boxes() {
        let style = style_for_kind(&NodeKind::Unknown("SPLITTER".into()));
        assert_eq!(style.shape, NodeShape::Box);
        assert!(style.color.is_none());
    }
}
