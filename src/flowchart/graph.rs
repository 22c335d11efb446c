//! Graph model: lower the forest into nodes, edges, and box metrics.
//!
//! DESIGN
//! ======
//! Ids are assigned by a pre-order walk (roots in order, then children
//! in order), so identical input always numbers nodes identically.
//! Edges are derived 1:1 from parent links, which keeps the graph a
//! forest by construction: `edges == nodes - roots` and no node has
//! more than one incoming edge.

use super::tree::Forest;

// Box metrics (canvas pixels). Width tracks the longest wrapped line,
// height tracks the wrapped line count.
const CHAR_WIDTH: f64 = 15.0;
pub(crate) const LINE_HEIGHT: f64 = 36.0;
const BOX_PAD_X: f64 = 30.0;
const BOX_PAD_Y: f64 = 22.0;
const MIN_BOX_WIDTH: f64 = 150.0;

/// A rendering-agnostic graph node.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Stable id assigned in pre-order, starting at 0.
    pub id: usize,
    pub label: String,
    pub depth: usize,
    pub box_width: f64,
    pub box_height: f64,
}

/// A directed parent-to-child edge between node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub root_count: usize,
}

/// Lower a forest into the graph model.
#[must_use]
pub fn lower(forest: &Forest, wrap_chars: usize) -> Graph {
    let mut graph = Graph {
        nodes: Vec::with_capacity(forest.nodes.len()),
        edges: Vec::with_capacity(forest.nodes.len().saturating_sub(forest.roots.len())),
        root_count: forest.roots.len(),
    };
    let mut ids = vec![0usize; forest.nodes.len()];

    for &root in &forest.roots {
        visit(forest, root, wrap_chars, &mut graph, &mut ids);
    }

    graph
}

fn visit(forest: &Forest, index: usize, wrap_chars: usize, graph: &mut Graph, ids: &mut [usize]) {
    let node = &forest.nodes[index];
    let id = graph.nodes.len();
    ids[index] = id;

    let lines = wrap_label(&node.label, wrap_chars);
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let box_width = (longest as f64).mul_add(CHAR_WIDTH, 2.0 * BOX_PAD_X).max(MIN_BOX_WIDTH);
    #[allow(clippy::cast_precision_loss)]
    let box_height = (lines.len().max(1) as f64).mul_add(LINE_HEIGHT, 2.0 * BOX_PAD_Y);

    graph.nodes.push(GraphNode {
        id,
        label: node.label.clone(),
        depth: node.depth,
        box_width,
        box_height,
    });
    if let Some(parent) = node.parent {
        graph.edges.push(GraphEdge { from: ids[parent], to: id });
    }

    for &child in &node.children {
        visit(forest, child, wrap_chars, graph, ids);
    }
}

/// Word-wrap a label at the given character budget. Words longer than
/// the budget are hard-split so a single token cannot blow out a box.
#[must_use]
pub fn wrap_label(label: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        let mut word = word;
        while word.chars().count() > budget {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(budget)
                .map_or(word.len(), |(i, _)| i);
            lines.push(word[..split].to_owned());
            word = &word[split..];
        }
        let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
        if current.chars().count() + needed > budget && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
