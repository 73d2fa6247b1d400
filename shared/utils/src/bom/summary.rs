//! Tree Summarizer
//!
//! Node count and initially expanded rows of a raw BOM tree. Both work on the
//! tree as fetched, before and independent of rendering.

use bomview_models::TreeNode;
use serde::Serialize;

/// Counts every node of `tree`, descendants included
pub fn count_nodes(tree: &[TreeNode]) -> usize {
    tree.iter()
        .map(|node| 1 + count_nodes(node.children()))
        .sum()
}

/// Rows expanded when the table first shows: the first root and its first
/// child. This is a fixed two-level policy, not an expand-to-depth setting.
pub fn initial_expanded_ids(tree: &[TreeNode]) -> Vec<String> {
    let Some(root) = tree.first() else {
        return Vec::new();
    };

    [Some(root), root.children().first()]
        .into_iter()
        .flatten()
        .filter_map(|node| node.id().map(str::to_string))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSummary {
    pub record_count: usize,
    pub expanded_rows: Vec<String>,
}

pub fn summarize(tree: &[TreeNode]) -> TreeSummary {
    TreeSummary {
        record_count: count_nodes(tree),
        expanded_rows: initial_expanded_ids(tree),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::fixtures::{id, node};
    use bomview_models::RawRecord;
    use proptest::prelude::*;

    fn line(n: u32) -> RawRecord {
        RawRecord::with_id(id("a0x", n))
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(count_nodes(&[]), 0);
        assert!(initial_expanded_ids(&[]).is_empty());
    }

    #[test]
    fn test_expands_root_and_first_child() {
        let tree = vec![
            node(line(1), vec![
                node(line(2), vec![node(line(3), vec![])]),
                node(line(4), vec![]),
            ]),
            node(line(5), vec![]),
        ];

        assert_eq!(count_nodes(&tree), 5);
        assert_eq!(initial_expanded_ids(&tree), vec![id("a0x", 1), id("a0x", 2)]);
    }

    #[test]
    fn test_root_without_children() {
        let tree = vec![node(line(1), vec![]), node(line(2), vec![])];
        assert_eq!(initial_expanded_ids(&tree), vec![id("a0x", 1)]);

        let empty_children = vec![TreeNode::leaf(line(1)).with_children(Vec::new())];
        assert_eq!(initial_expanded_ids(&empty_children), vec![id("a0x", 1)]);
    }

    fn reference_count(tree: &[TreeNode]) -> usize {
        let mut stack: Vec<&TreeNode> = tree.iter().collect();
        let mut seen = 0;
        while let Some(current) = stack.pop() {
            seen += 1;
            stack.extend(current.children());
        }
        seen
    }

    fn arb_tree() -> impl Strategy<Value = TreeNode> {
        let leaf = (0u32..1000).prop_map(|n| TreeNode::leaf(line(n)));
        leaf.prop_recursive(4, 48, 5, |inner| {
            ((0u32..1000), proptest::collection::vec(inner, 0..5))
                .prop_map(|(n, children)| node(line(n), children))
        })
    }

    proptest! {
        #[test]
        fn prop_count_matches_reference(tree in proptest::collection::vec(arb_tree(), 0..4)) {
            prop_assert_eq!(count_nodes(&tree), reference_count(&tree));
        }

        #[test]
        fn prop_expanded_rows_shape(tree in proptest::collection::vec(arb_tree(), 0..4)) {
            let expanded = initial_expanded_ids(&tree);
            match tree.first() {
                None => prop_assert!(expanded.is_empty()),
                Some(root) if root.has_children() => prop_assert_eq!(expanded.len(), 2),
                Some(_) => prop_assert!(expanded.len() <= 1),
            }
        }
    }
}
