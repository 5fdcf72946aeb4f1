//! Project serialization

use crate::{ProjectFile, Result, StoreError};
use layout_tree::Node;

/// Serialize a project to JSON
pub fn serialize(project: &ProjectFile) -> Result<String> {
    let json = serde_json::to_string_pretty(project)?;
    Ok(json)
}

/// Deserialize a project from JSON.
///
/// Rejects unknown or newer formats and layouts with two cells on the same
/// coordinate.
pub fn deserialize(json: &str) -> Result<ProjectFile> {
    let project: ProjectFile = serde_json::from_str(json)?;

    if !project.header.is_valid() {
        return Err(StoreError::InvalidFormat(format!(
            "Invalid or unsupported project format: {} v{}",
            project.header.magic, project.header.version
        )));
    }

    for table in project.tree.tables() {
        project.tree.check_table(table.id())?;
    }

    Ok(project)
}
