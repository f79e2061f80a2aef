//! Plan presentation
//!
//! Builds the on-screen breakdown (markdown or terminal) and the plain-text
//! export. Empty sections show a placeholder on screen but stay empty in the
//! export.

mod export;
mod poses;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

pub use export::{EXPORT_FILE_NAME, EXPORT_MIME, ExportError, export_text, write_export};
pub use poses::{GRID_COLUMNS, PoseBlock, grid_rows, isolate_annotations, number_heading, pose_blocks, split_pose_blocks};

use crate::plan::{PlanSection, YogaPlan};

pub const TITLE: &str = "🧘‍♀️ Your Personalized Yoga Plan";

pub const DISCLAIMER: &str = "⚠️ **Disclaimer:** This yoga plan is AI-generated and is intended for general wellness. \
Please consult a certified yoga instructor or healthcare professional before beginning any new exercise routine.";

const RULE: &str = "---";

/// Section body for display, or its placeholder when empty
fn display_body(plan: &YogaPlan, section: PlanSection) -> &str {
    let body = plan.section(section);
    if body.trim().is_empty() { section.placeholder() } else { body }
}

/// Render the plan as one markdown document
///
/// Pose blocks are emitted in sequence order, one row of the grid after another.
pub fn render_markdown(plan: &YogaPlan) -> String {
    debug!("render_markdown: called");
    let mut out = format!("## {TITLE}\n\n");

    for section in PlanSection::ALL {
        out.push_str(&format!("{RULE}\n\n## {}\n\n", section.header()));
        match section {
            PlanSection::Poses => {
                let blocks = pose_blocks(plan.section(section));
                if blocks.is_empty() {
                    out.push_str(section.placeholder());
                } else {
                    let rendered: Vec<&str> = blocks.iter().map(|b| b.markdown.as_str()).collect();
                    out.push_str(&rendered.join("\n\n"));
                }
            }
            _ => out.push_str(display_body(plan, section)),
        }
        out.push_str("\n\n");
    }

    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

/// Render the plan for a terminal, with the poses laid out in a grid
pub fn render_terminal(plan: &YogaPlan) -> String {
    debug!("render_terminal: called");
    let mut out = format!("{}\n", TITLE.bold().green());

    for section in PlanSection::ALL {
        out.push_str(&format!("\n{}\n\n", section.header().as_str().bold().cyan()));
        match section {
            PlanSection::Poses => {
                let blocks = pose_blocks(plan.section(section));
                if blocks.is_empty() {
                    out.push_str(section.placeholder());
                } else {
                    out.push_str(&pose_table(&blocks).to_string());
                }
            }
            _ => out.push_str(display_body(plan, section)),
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&DISCLAIMER.yellow().to_string());
    out.push('\n');
    out
}

fn pose_table(blocks: &[PoseBlock]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in grid_rows(blocks) {
        let mut cells: Vec<String> = row.iter().map(|b| b.markdown.clone()).collect();
        cells.resize(GRID_COLUMNS, String::new());
        table.add_row(cells);
    }
    table
}
