//! Pose sequence breakdown
//!
//! Splits the pose markdown at `### ` headings, numbers each pose and moves
//! bold duration/hold annotations onto their own line.

use tracing::debug;

/// Heading marker that starts a pose block
const HEADING: &str = "### ";

/// Bold annotations that must start their own line
const ANNOTATIONS: [&str; 2] = ["**Duration:", "**Hold:"];

/// Columns per row in the pose grid
pub const GRID_COLUMNS: usize = 4;

/// One pose (or leading text without a heading) ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseBlock {
    /// 1-based fragment position; `None` for text before the first heading
    pub number: Option<usize>,

    /// Rewritten markdown for this block
    pub markdown: String,
}

/// Split `text` before every line that starts with `### `
///
/// Fragments are trimmed and empty ones dropped.
pub fn split_pose_blocks(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if line.starts_with(HEADING) && !current.is_empty() {
            fragments.push(std::mem::take(&mut current));
        }
        current.push_str(line);
    }
    fragments.push(current);

    fragments
        .into_iter()
        .map(|fragment| fragment.trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Rewrite `### <name>` on the first line to `### <number>. <name>`
///
/// Returns `None` when the block does not open with a heading.
pub fn number_heading(block: &str, number: usize) -> Option<String> {
    let rest = block.strip_prefix("###")?;
    if !rest.starts_with(|c: char| c.is_whitespace() && c != '\n') {
        return None;
    }

    let (heading, body) = match rest.find('\n') {
        Some(end) => rest.split_at(end),
        None => (rest, ""),
    };
    Some(format!("### {}. {}{}", number, heading.trim_start(), body))
}

/// Insert a line break before each bold duration/hold annotation not already at a line start
///
/// An annotation only counts when its bold marker closes on the same line.
pub fn isolate_annotations(block: &str) -> String {
    let mut starts: Vec<usize> = ANNOTATIONS
        .iter()
        .flat_map(|marker| block.match_indices(marker).map(|(pos, _)| pos))
        .filter(|&pos| closes_on_line(block, pos) && pos > 0 && !block[..pos].ends_with('\n'))
        .collect();
    starts.sort_unstable();

    if starts.is_empty() {
        return block.to_string();
    }
    debug!(count = starts.len(), "isolate_annotations: moving annotations");

    let mut out = String::with_capacity(block.len() + starts.len());
    let mut last = 0;
    for pos in starts {
        out.push_str(&block[last..pos]);
        out.push('\n');
        last = pos;
    }
    out.push_str(&block[last..]);
    out
}

fn closes_on_line(block: &str, pos: usize) -> bool {
    let after = &block[pos + 2..];
    let line = after.split('\n').next().unwrap_or("");
    line.contains("**")
}

/// Break the pose text into numbered, display-ready blocks in sequence order
///
/// Numbers are fragment positions, so text ahead of the first heading takes
/// position 1 and stays unnumbered while the first pose becomes `2.`.
pub fn pose_blocks(text: &str) -> Vec<PoseBlock> {
    debug!(len = text.len(), "pose_blocks: called");

    split_pose_blocks(text)
        .into_iter()
        .enumerate()
        .map(|(idx, fragment)| {
            let position = idx + 1;
            let (number, markdown) = match number_heading(&fragment, position) {
                Some(numbered) => (Some(position), numbered),
                None => (None, fragment),
            };
            PoseBlock {
                number,
                markdown: isolate_annotations(&markdown),
            }
        })
        .collect()
}

/// Rows of [`GRID_COLUMNS`] blocks, left to right, top to bottom
pub fn grid_rows(blocks: &[PoseBlock]) -> impl Iterator<Item = &[PoseBlock]> {
    blocks.chunks(GRID_COLUMNS)
}
