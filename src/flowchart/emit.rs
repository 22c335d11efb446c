//! Mermaid source emitter.
//!
//! Serializes the laid-out diagram as a `graph TD` document: one node
//! declaration per line in id order, then one edge per line in
//! declaration order. Coordinates are deliberately absent — the source
//! is a structural artifact, portable to any Mermaid renderer.

use std::fmt::Write as _;

use super::layout::Diagram;

/// Mermaid declarations clip labels at this many characters.
const MAX_MERMAID_LABEL: usize = 50;

/// Styling trailer applied to every node class.
const CLASS_DEF: &str = "classDef default fill:#e1f5ff,stroke:#01579b,stroke-width:3px,color:#000,font-size:16px,font-weight:bold,padding:15px";

/// Emit the Mermaid flowchart source for a diagram.
#[must_use]
pub fn emit_mermaid(diagram: &Diagram) -> String {
    let mut out = String::from("graph TD");

    for node in &diagram.nodes {
        let _ = write!(out, "\n    node{}[\"{}\"]", node.id, sanitize_label(&node.label));
    }
    out.push('\n');
    for edge in &diagram.edges {
        let _ = write!(out, "\n    node{} --> node{}", edge.from, edge.to);
    }
    out.push('\n');
    let _ = write!(out, "\n    {CLASS_DEF}");

    out
}

/// Replace characters Mermaid treats as syntax and clip long labels.
fn sanitize_label(label: &str) -> String {
    let safe: String = label
        .chars()
        .map(|ch| match ch {
            '"' => '\'',
            '[' => '(',
            ']' => ')',
            '\n' => ' ',
            other => other,
        })
        .collect();
    if safe.chars().count() > MAX_MERMAID_LABEL {
        let clipped: String = safe.chars().take(MAX_MERMAID_LABEL - 3).collect();
        format!("{clipped}...")
    } else {
        safe
    }
}

#[cfg(test)]
#[path = "emit_test.rs"]
mod tests;
