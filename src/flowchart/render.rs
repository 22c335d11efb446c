//! Raster renderer: paints the laid-out diagram and encodes a PNG.
//!
//! DESIGN
//! ======
//! The diagram is first written as an SVG scene (rounded boxes,
//! centered word-wrapped labels, arrowhead connectors), then rasterized
//! with `resvg` into a `tiny_skia` pixmap and PNG-encoded. Connectors
//! run from the parent's bottom-center to the child's top-center, with
//! an orthogonal elbow when the two are not vertically aligned.
//!
//! Color is a function of depth only: the palette is indexed by
//! `depth % palette_len`, never by label content.

use std::fmt::Write as _;
use std::sync::Arc;

use resvg::usvg::fontdb;
use resvg::{tiny_skia, usvg};

use super::graph::{LINE_HEIGHT, wrap_label};
use super::layout::Diagram;

const FONT_SIZE: f64 = 26.0;
const CORNER_RADIUS: f64 = 14.0;
const BOX_STROKE_WIDTH: f64 = 3.0;
const EDGE_STROKE_WIDTH: f64 = 2.5;
const EDGE_COLOR: &str = "#455a64";
const TEXT_COLOR: &str = "#1f1a17";
const BACKGROUND: &str = "#ffffff";

/// Hard allocation ceiling: canvases above this many pixels are
/// rejected before any surface is allocated.
pub const MAX_CANVAS_PIXELS: u64 = 40_000_000;

/// Fill/stroke pairs indexed by `depth % len`.
const PALETTE: &[(&str, &str)] = &[
    ("#e1f5ff", "#01579b"),
    ("#e8f5e9", "#1b5e20"),
    ("#fff3e0", "#e65100"),
    ("#f3e5f5", "#4a148c"),
    ("#fbe9e7", "#bf360c"),
    ("#e0f2f1", "#004d40"),
];

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas {width}x{height} exceeds the {MAX_CANVAS_PIXELS} pixel ceiling")]
    CanvasTooLarge { width: u32, height: u32 },
    #[error("canvas allocation failed for {width}x{height}")]
    Allocation { width: u32, height: u32 },
    #[error("generated scene was rejected: {0}")]
    InvalidScene(String),
    #[error("png encoding failed: {0}")]
    PngEncode(String),
}

/// An encoded raster image.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Rasterize the diagram to PNG bytes.
///
/// # Errors
///
/// Returns [`RenderError`] when the canvas exceeds the pixel ceiling,
/// the surface cannot be allocated, or encoding fails.
pub fn render_png(diagram: &Diagram, wrap_chars: usize) -> Result<RenderedImage, RenderError> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let width = diagram.canvas_width.ceil().max(1.0) as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let height = diagram.canvas_height.ceil().max(1.0) as u32;
    if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
        return Err(RenderError::CanvasTooLarge { width, height });
    }

    let svg = build_svg(diagram, wrap_chars);

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let options = usvg::Options { fontdb: Arc::new(db), ..Default::default() };
    let tree = usvg::Tree::from_str(&svg, &options)
        .map_err(|e| RenderError::InvalidScene(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::Allocation { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    Ok(RenderedImage { png, width, height })
}

/// Write the SVG scene: background, connectors underneath, then boxes
/// and their labels. `diagram.layout` is indexed by node id.
fn build_svg(diagram: &Diagram, wrap_chars: usize) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" \
         viewBox=\"0 0 {:.0} {:.0}\" font-family=\"sans-serif\">",
        diagram.canvas_width, diagram.canvas_height, diagram.canvas_width, diagram.canvas_height,
    );
    let _ = writeln!(
        svg,
        "  <defs><marker id=\"arrowhead\" markerWidth=\"18\" markerHeight=\"14\" refX=\"16\" \
         refY=\"7\" orient=\"auto\" markerUnits=\"userSpaceOnUse\">\
         <path d=\"M 0 0 L 18 7 L 0 14 Z\" fill=\"{EDGE_COLOR}\"/></marker></defs>",
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{:.0}\" height=\"{:.0}\" fill=\"{BACKGROUND}\"/>",
        diagram.canvas_width, diagram.canvas_height,
    );

    for edge in &diagram.edges {
        let from = diagram.layout[edge.from];
        let to = diagram.layout[edge.to];
        let fx = from.x + from.width / 2.0;
        let fy = from.y + from.height;
        let tx = to.x + to.width / 2.0;
        let ty = to.y;
        let path = if (fx - tx).abs() < 0.5 {
            format!("M {fx:.1} {fy:.1} L {tx:.1} {ty:.1}")
        } else {
            let elbow_y = f64::midpoint(fy, ty);
            format!("M {fx:.1} {fy:.1} L {fx:.1} {elbow_y:.1} L {tx:.1} {elbow_y:.1} L {tx:.1} {ty:.1}")
        };
        let _ = writeln!(
            svg,
            "  <path d=\"{path}\" fill=\"none\" stroke=\"{EDGE_COLOR}\" \
             stroke-width=\"{EDGE_STROKE_WIDTH}\" marker-end=\"url(#arrowhead)\"/>",
        );
    }

    for node in &diagram.nodes {
        let b = diagram.layout[node.id];
        let (fill, stroke) = PALETTE[node.depth % PALETTE.len()];
        let _ = writeln!(
            svg,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"{CORNER_RADIUS}\" \
             fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{BOX_STROKE_WIDTH}\"/>",
            b.x, b.y, b.width, b.height,
        );

        let lines = wrap_label(&node.label, wrap_chars);
        let cx = b.x + b.width / 2.0;
        let cy = b.y + b.height / 2.0;
        #[allow(clippy::cast_precision_loss)]
        let start_y = cy - LINE_HEIGHT * (lines.len() as f64 - 1.0) / 2.0;
        let _ = writeln!(
            svg,
            "  <text fill=\"{TEXT_COLOR}\" font-size=\"{FONT_SIZE}\" text-anchor=\"middle\">",
        );
        for (i, line) in lines.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let line_y = start_y + LINE_HEIGHT * i as f64;
            let _ = writeln!(
                svg,
                "    <tspan x=\"{cx:.1}\" y=\"{line_y:.1}\" dominant-baseline=\"central\">{}</tspan>",
                escape_xml(line),
            );
        }
        svg.push_str("  </text>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
