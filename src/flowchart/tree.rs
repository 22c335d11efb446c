//! Tree builder: hierarchy lines into an arena-backed forest.
//!
//! DESIGN
//! ======
//! Nodes live in a flat arena (`Vec<TreeNode>`) and refer to each other
//! by index, so parent links need no shared ownership. An ancestor
//! stack keyed by depth makes construction O(n) while preserving
//! document order as sibling order.

use super::parse::HierarchyLine;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("document contains no usable lines")]
    EmptyDocument,
}

/// A node in the hierarchy forest. Indices refer into [`Forest::nodes`].
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub label: String,
    pub depth: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Position among the parent's children (or among the roots).
    pub sibling_index: usize,
}

/// A forest of hierarchy trees. Multiple roots are legal: independent
/// top-level lines become independent trees rendered side by side.
#[derive(Debug, Clone)]
pub struct Forest {
    pub nodes: Vec<TreeNode>,
    pub roots: Vec<usize>,
}

/// Build the forest from an ordered line sequence.
///
/// For each line, ancestors at the same or deeper level are closed; the
/// remaining top of the stack (if any) becomes the parent.
///
/// # Errors
///
/// Returns [`TreeError::EmptyDocument`] when no lines were parsed.
pub fn build_forest(lines: &[HierarchyLine]) -> Result<Forest, TreeError> {
    if lines.is_empty() {
        return Err(TreeError::EmptyDocument);
    }

    let mut forest = Forest { nodes: Vec::with_capacity(lines.len()), roots: Vec::new() };
    let mut stack: Vec<usize> = Vec::new();

    for line in lines {
        while stack.last().is_some_and(|&open| forest.nodes[open].depth >= line.depth) {
            stack.pop();
        }
        let parent = stack.last().copied();
        let index = forest.nodes.len();
        let sibling_index = match parent {
            Some(p) => forest.nodes[p].children.len(),
            None => forest.roots.len(),
        };

        forest.nodes.push(TreeNode {
            label: line.label.clone(),
            depth: line.depth,
            parent,
            children: Vec::new(),
            sibling_index,
        });
        match parent {
            Some(p) => forest.nodes[p].children.push(index),
            None => forest.roots.push(index),
        }
        stack.push(index);
    }

    Ok(forest)
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
