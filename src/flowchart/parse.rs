//! Indentation parser: raw text into (depth, label) records.
//!
//! DESIGN
//! ======
//! Pure function over the input text. Leading tabs are expanded to the
//! configured unit width before measuring, so mixed tab/space documents
//! measure consistently. Depth is the leading-whitespace column count
//! divided by the unit, rounded to the nearest whole unit.

/// Labels longer than this are clipped at parse time.
pub const MAX_LABEL_CHARS: usize = 100;

/// One non-blank input line, measured and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyLine {
    /// Nesting level, starting at 0 for top-level lines.
    pub depth: usize,
    /// Trimmed line content, clipped to [`MAX_LABEL_CHARS`].
    pub label: String,
    /// 1-based line number in the original text.
    pub source_line: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// A line is nested more than one level deeper than the line before
    /// it, so no parent exists for it. Collapsing the gap silently would
    /// guess at structure the author never wrote.
    #[error("line {line}: indentation level {found} exceeds the allowed level {allowed}; nest one level at a time")]
    MalformedIndentation {
        line: usize,
        found: usize,
        allowed: usize,
    },
}

/// Split text into measured hierarchy lines.
///
/// Blank and whitespace-only lines are discarded. The returned list may
/// be empty; the tree builder decides whether that is an error.
///
/// # Errors
///
/// Returns [`ParseError::MalformedIndentation`] on an ambiguous depth
/// jump (including a first line that is already indented).
pub fn parse(text: &str, indent_spaces: usize) -> Result<Vec<HierarchyLine>, ParseError> {
    let unit = indent_spaces.max(1);
    let mut lines = Vec::new();
    let mut prev_depth: Option<usize> = None;

    for (index, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }

        let source_line = index + 1;
        let depth = measure_depth(raw, unit);
        let allowed = prev_depth.map_or(0, |d| d + 1);
        if depth > allowed {
            return Err(ParseError::MalformedIndentation { line: source_line, found: depth, allowed });
        }

        lines.push(HierarchyLine { depth, label: clip_label(raw.trim()), source_line });
        prev_depth = Some(depth);
    }

    Ok(lines)
}

/// Count leading whitespace columns (tabs expand to the unit width) and
/// convert to a depth, rounding to the nearest whole unit.
fn measure_depth(line: &str, unit: usize) -> usize {
    let mut columns = 0usize;
    for ch in line.chars() {
        match ch {
            ' ' => columns += 1,
            '\t' => columns += unit,
            _ => break,
        }
    }
    (columns + unit / 2) / unit
}

fn clip_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        label.chars().take(MAX_LABEL_CHARS).collect()
    } else {
        label.to_owned()
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
