//! # Sequence Builder
//!
//! Turns a pipeline tree into the order in which a request reaches each
//! stage. Models, transformers and routers are called on the way down;
//! combiners and output transformers on the way back up.

use super::{BranchGroup, Element, Fork, Sequence};
use crate::tree::{NodeKind, PipelineNode};

/// Build the call sequence of the subtree rooted at `root`
///
/// Never fails. A node of unknown kind adds nothing of its own but its
/// children are still visited.
pub fn build_sequence(root: &PipelineNode) -> Sequence<'_> {
    let mut elements = Vec::new();
    append_node(root, &mut elements);
    Sequence::new(elements)
}

fn append_node<'t>(node: &'t PipelineNode, out: &mut Vec<Element<'t>>) {
    let kind = node.kind();

    if kind.is_pre_order() {
        out.push(Element::Node(node));
    }

    match node.children() {
        [] => {}
        [only] => append_node(only, out),
        children => {
            let forks: Vec<Fork<'t>> = children
                .iter()
                .enumerate()
                .filter_map(|(index, child)| {
                    let mut elements = Vec::new();
                    append_node(child, &mut elements);
                    if elements.is_empty() {
                        tracing::debug!(
                            "[SEQUENCE] Child {} of '{}' contributes no call, fork dropped",
                            index,
                            node.name()
                        );
                        None
                    } else {
                        Some(Fork::new(index, elements))
                    }
                })
                .collect();

            if !forks.is_empty() {
                out.push(Element::Branches(BranchGroup { owner: node, forks }));
            }
        }
    }

    if kind.is_post_order() {
        out.push(Element::Node(node));
    }

    if let NodeKind::Unknown(raw) = kind {
        tracing::debug!("[SEQUENCE] '{}' ({}) is not a call site", node.name(), raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeSpec, PipelineTree};

    fn names(seq: &Sequence<'_>) -> Vec<String> {
        fn render(element: &Element<'_>) -> String {
            match element {
                Element::Node(node) => node.name().to_string(),
                Element::Branches(group) => {
                    let forks: Vec<String> = group
                        .forks
                        .iter()
                        .map(|fork| {
                            let inner: Vec<String> = fork.elements.iter().map(render).collect();
                            format!("{}:[{}]", fork.index, inner.join(" "))
                        })
                        .collect();
                    format!("{{{}}}", forks.join(" | "))
                }
            }
        }
        seq.elements().iter().map(render).collect()
    }

    #[test]
    fn pre_order_kinds_come_first() {
        let spec = NodeSpec::new("t", NodeKind::Transformer)
            .with_child(NodeSpec::new("m", NodeKind::Model));
        let tree = PipelineTree::build(&spec);
        assert_eq!(names(&build_sequence(tree.root())), vec!["t", "m"]);
    }

    #[test]
    fn post_order_kinds_come_last() {
        let spec = NodeSpec::new("o", NodeKind::OutputTransformer).with_child(
            NodeSpec::new("m", NodeKind::Model).with_child(NodeSpec::new("n", NodeKind::Model)),
        );
        let tree = PipelineTree::build(&spec);
        assert_eq!(names(&build_sequence(tree.root())), vec!["m", "n", "o"]);
    }

    #[test]
    fn several_children_form_a_branch_group() {
        let spec = NodeSpec::new("a", NodeKind::Transformer).with_child(
            NodeSpec::new("b", NodeKind::Router).with_children([
                NodeSpec::new("c", NodeKind::Model),
                NodeSpec::new("d", NodeKind::Model),
            ]),
        );
        let tree = PipelineTree::build(&spec);
        assert_eq!(names(&build_sequence(tree.root())), vec!["a", "b", "{0:[c] | 1:[d]}"]);
    }

    #[test]
    fn combiner_waits_on_its_group() {
        let spec = NodeSpec::new("x", NodeKind::Combiner).with_children([
            NodeSpec::new("y", NodeKind::Model),
            NodeSpec::new("t", NodeKind::Transformer)
                .with_child(NodeSpec::new("z", NodeKind::Model)),
        ]);
        let tree = PipelineTree::build(&spec);
        let seq = build_sequence(tree.root());
        assert_eq!(names(&seq), vec!["{0:[y] | 1:[t z]}", "x"]);
        let flat: Vec<_> = seq.flatten().iter().map(|n| n.name()).collect();
        assert_eq!(flat, vec!["y", "t", "z", "x"]);
    }

    #[test]
    fn childless_nodes_contribute_only_themselves() {
        for kind in [NodeKind::Router, NodeKind::Combiner, NodeKind::OutputTransformer] {
            let spec = NodeSpec::new("solo", kind);
            let tree = PipelineTree::build(&spec);
            assert_eq!(names(&build_sequence(tree.root())), vec!["solo"]);
        }
    }

    #[test]
    fn unknown_kind_is_transparent() {
        let spec = NodeSpec::new("u", "SPLITTER").with_children([
            NodeSpec::new("p", NodeKind::Model),
            NodeSpec::new("q", "MYSTERY"),
            NodeSpec::new("r", NodeKind::Model),
        ]);
        let tree = PipelineTree::build(&spec);
        assert_eq!(names(&build_sequence(tree.root())), vec!["{0:[p] | 2:[r]}"]);

        let lone = PipelineTree::build(&NodeSpec::new("u", "MYSTERY"));
        assert!(build_sequence(lone.root()).is_empty());
    }

    #[test]
    fn extra_children_of_a_model_still_branch() {
        let spec = NodeSpec::new("m", NodeKind::Model).with_children([
            NodeSpec::new("p", NodeKind::Model),
            NodeSpec::new("q", NodeKind::Model),
        ]);
        let tree = PipelineTree::build(&spec);
        assert_eq!(names(&build_sequence(tree.root())), vec!["m", "{0:[p] | 1:[q]}"]);
    }
}
