//! Tests for the tree builder.

use super::super::parse::parse;
use super::{Forest, TreeError, build_forest};

fn forest_of(text: &str) -> Forest {
    build_forest(&parse(text, 4).unwrap()).unwrap()
}

#[test]
fn empty_document_is_an_error() {
    assert_eq!(build_forest(&[]).unwrap_err(), TreeError::EmptyDocument);
}

#[test]
fn single_line_is_a_single_root() {
    let forest = forest_of("Root");
    assert_eq!(forest.nodes.len(), 1);
    assert_eq!(forest.roots, vec![0]);
    assert_eq!(forest.nodes[0].parent, None);
    assert!(forest.nodes[0].children.is_empty());
}

#[test]
fn builds_parent_child_links() {
    let forest = forest_of("Root\n    A\n    B\n        C");
    assert_eq!(forest.nodes.len(), 4);
    assert_eq!(forest.roots, vec![0]);
    assert_eq!(forest.nodes[0].children, vec![1, 2]);
    assert_eq!(forest.nodes[1].parent, Some(0));
    assert_eq!(forest.nodes[2].parent, Some(0));
    assert_eq!(forest.nodes[3].parent, Some(2));
}

#[test]
fn child_depth_is_parent_depth_plus_one() {
    let forest = forest_of("Root\n    A\n        B\n    C");
    for node in &forest.nodes {
        if let Some(parent) = node.parent {
            assert_eq!(node.depth, forest.nodes[parent].depth + 1);
        } else {
            assert_eq!(node.depth, 0);
        }
    }
}

#[test]
fn preserves_document_order_as_sibling_order() {
    let forest = forest_of("Root\n    First\n    Second\n    Third");
    let labels: Vec<&str> = forest.nodes[0]
        .children
        .iter()
        .map(|&c| forest.nodes[c].label.as_str())
        .collect();
    assert_eq!(labels, vec!["First", "Second", "Third"]);
    assert_eq!(forest.nodes[1].sibling_index, 0);
    assert_eq!(forest.nodes[2].sibling_index, 1);
    assert_eq!(forest.nodes[3].sibling_index, 2);
}

#[test]
fn accepts_multiple_roots() {
    let forest = forest_of("First Tree\n    Leaf\nSecond Tree\n    Leaf");
    assert_eq!(forest.roots.len(), 2);
    assert_eq!(forest.nodes[forest.roots[0]].label, "First Tree");
    assert_eq!(forest.nodes[forest.roots[1]].label, "Second Tree");
    assert_eq!(forest.nodes[forest.roots[1]].sibling_index, 1);
}

#[test]
fn returning_shallow_reattaches_to_the_right_ancestor() {
    let forest = forest_of("Root\n    A\n        B\n    C");
    // C pops B and A, attaching back to Root.
    let c = forest
        .nodes
        .iter()
        .position(|n| n.label == "C")
        .unwrap();
    assert_eq!(forest.nodes[c].parent, Some(0));
    assert_eq!(forest.nodes[0].children.len(), 2);
}

#[test]
fn sibling_at_same_depth_closes_previous_subtree() {
    let forest = forest_of("Root\n    A\n    B");
    let a = 1;
    let b = 2;
    assert_eq!(forest.nodes[a].parent, Some(0));
    assert_eq!(forest.nodes[b].parent, Some(0));
    assert!(forest.nodes[a].children.is_empty());
}
