//! Hierarchical-text-to-flowchart compiler.
//!
//! Parses indentation-structured text into a forest of hierarchy
//! nodes, lowers the forest to a node/edge graph with stable pre-order
//! ids, computes a layered tree layout, and produces two artifacts:
//! portable Mermaid source and a high-resolution PNG.
//!
//! Every stage is a pure function over the previous stage's output, so
//! identical input and configuration always produce identical node
//! numbering, layout coordinates, Mermaid source, and canvas size.

pub mod emit;
pub mod graph;
pub mod layout;
pub mod parse;
pub mod render;
pub mod tree;
