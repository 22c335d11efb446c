//! Layered tree layout: deterministic positions for every graph node.
//!
//! DESIGN
//! ======
//! Each root is laid out independently Reingold–Tilford style: subtree
//! spans are computed bottom-up, children are placed left-to-right
//! inside their parent's span, and parents are centered over their
//! children's extent. Roots are then placed left-to-right with a fixed
//! inter-root gap. Rows are a pure function of depth.
//!
//! Small diagrams are centered inside the configured canvas floor —
//! the margins grow, the content never stretches, so text renders at
//! its native size on the high-resolution canvas.

use super::graph::{Graph, GraphEdge, GraphNode};

// Layout constants (canvas pixels).
const SIBLING_GAP: f64 = 70.0;
const ROOT_GAP: f64 = 180.0;
const ROW_HEIGHT: f64 = 110.0;
const ROW_GAP: f64 = 130.0;
const CANVAS_MARGIN: f64 = 120.0;

/// A node's placed box, in canvas-pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub node_id: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The fully laid-out diagram handed to the emitter and the renderer.
/// Immutable after construction; `layout` is indexed by node id.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub layout: Vec<LayoutBox>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub canvas_min_width: f64,
    pub canvas_min_height: f64,
}

/// Compute positions for every node and the enclosing canvas size.
#[must_use]
pub fn layout(graph: Graph, options: &LayoutOptions) -> Diagram {
    let node_count = graph.nodes.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut has_parent = vec![false; node_count];
    for edge in &graph.edges {
        children[edge.from].push(edge.to);
        has_parent[edge.to] = true;
    }
    // Pre-order ids make ascending id order equal input order here.
    let roots: Vec<usize> = (0..node_count).filter(|&id| !has_parent[id]).collect();

    let mut spans = vec![0.0f64; node_count];
    for &root in &roots {
        compute_span(&graph.nodes, &children, root, &mut spans);
    }

    let mut centers = vec![0.0f64; node_count];
    let mut cursor = CANVAS_MARGIN;
    for &root in &roots {
        place(&children, &spans, root, cursor, &mut centers);
        cursor += spans[root] + ROOT_GAP;
    }

    let mut boxes = Vec::with_capacity(node_count);
    for node in &graph.nodes {
        #[allow(clippy::cast_precision_loss)]
        let row_top = CANVAS_MARGIN + node.depth as f64 * (ROW_HEIGHT + ROW_GAP);
        boxes.push(LayoutBox {
            node_id: node.id,
            x: centers[node.id] - node.box_width / 2.0,
            y: row_top + (ROW_HEIGHT - node.box_height) / 2.0,
            width: node.box_width,
            height: node.box_height,
        });
    }

    let (canvas_width, canvas_height) = fit_canvas(&mut boxes, options);

    Diagram { nodes: graph.nodes, edges: graph.edges, layout: boxes, canvas_width, canvas_height }
}

/// Bottom-up subtree span: a leaf spans its own box; an internal node
/// spans its children (plus gaps), never less than its own box.
fn compute_span(nodes: &[GraphNode], children: &[Vec<usize>], id: usize, spans: &mut [f64]) {
    let mut child_total = 0.0;
    for (i, &child) in children[id].iter().enumerate() {
        compute_span(nodes, children, child, spans);
        if i > 0 {
            child_total += SIBLING_GAP;
        }
        child_total += spans[child];
    }
    spans[id] = nodes[id].box_width.max(child_total);
}

/// Top-down placement. Children are packed left-to-right, centered
/// within the span when the parent's own box is the wider side; the
/// parent is centered over its children's centers. Width ties keep the
/// earlier sibling on the left because placement is sequential.
fn place(children: &[Vec<usize>], spans: &[f64], id: usize, left: f64, centers: &mut [f64]) {
    let kids = &children[id];
    if kids.is_empty() {
        centers[id] = left + spans[id] / 2.0;
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let child_total: f64 =
        kids.iter().map(|&c| spans[c]).sum::<f64>() + SIBLING_GAP * (kids.len() - 1) as f64;
    let mut child_left = left + (spans[id] - child_total) / 2.0;
    for &child in kids {
        place(children, spans, child, child_left, centers);
        child_left += spans[child] + SIBLING_GAP;
    }

    let first = centers[kids[0]];
    let last = centers[kids[kids.len() - 1]];
    centers[id] = f64::midpoint(first, last);
}

/// Grow the canvas to the bounding box plus margin, then pad out to the
/// configured floor by shifting the content to the center.
fn fit_canvas(boxes: &mut [LayoutBox], options: &LayoutOptions) -> (f64, f64) {
    let right = boxes.iter().map(|b| b.x + b.width).fold(0.0, f64::max);
    let bottom = boxes.iter().map(|b| b.y + b.height).fold(0.0, f64::max);
    let mut width = right + CANVAS_MARGIN;
    let mut height = bottom + CANVAS_MARGIN;

    if width < options.canvas_min_width {
        let shift = (options.canvas_min_width - width) / 2.0;
        for b in boxes.iter_mut() {
            b.x += shift;
        }
        width = options.canvas_min_width;
    }
    if height < options.canvas_min_height {
        let shift = (options.canvas_min_height - height) / 2.0;
        for b in boxes.iter_mut() {
            b.y += shift;
        }
        height = options.canvas_min_height;
    }

    (width, height)
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
