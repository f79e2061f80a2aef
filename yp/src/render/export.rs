//! Plain-text plan export

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::plan::{PlanSection, YogaPlan};

/// Default download file name
pub const EXPORT_FILE_NAME: &str = "yoga_plan.txt";

/// MIME type of the export document
pub const EXPORT_MIME: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write plan to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flatten the plan into one document: five headed sections, blank-line separated
///
/// Empty fields keep their header with an empty body.
pub fn export_text(plan: &YogaPlan) -> String {
    PlanSection::ALL
        .iter()
        .map(|section| format!("{}\n{}", section.header(), plan.section(*section)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write the export document to `path`
pub fn write_export(plan: &YogaPlan, path: &Path) -> Result<(), ExportError> {
    debug!(path = %path.display(), "write_export: called");
    fs::write(path, export_text(plan)).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "write_export: plan exported");
    Ok(())
}
