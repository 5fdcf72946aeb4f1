//! Project file format

use crate::EditorSettings;
use chrono::{DateTime, Utc};
use layout_tree::LayoutTree;
use serde::{Deserialize, Serialize};

/// File format version
pub const FORMAT_VERSION: u32 = 1;

/// File extension for project files
pub const FILE_EXTENSION: &str = "scmp";

/// File header for format identification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHeader {
    /// Magic string for format identification
    pub magic: String,
    /// Format version
    pub version: u32,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ProjectHeader {
    pub const MAGIC: &'static str = "SCENE-COMPOSER";

    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            magic: Self::MAGIC.to_string(),
            version: FORMAT_VERSION,
            created: now,
            modified: now,
        }
    }

    /// Refresh the modification time before a save
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn is_valid(&self) -> bool {
        self.magic == Self::MAGIC && self.version <= FORMAT_VERSION
    }
}

impl Default for ProjectHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete project file: header, project settings, and the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub header: ProjectHeader,
    #[serde(default)]
    pub settings: EditorSettings,
    pub tree: LayoutTree,
}

impl ProjectFile {
    pub fn new(tree: LayoutTree, settings: EditorSettings) -> Self {
        Self {
            header: ProjectHeader::new(),
            settings,
            tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_validity() {
        let mut header = ProjectHeader::new();
        assert!(header.is_valid());

        header.version = FORMAT_VERSION + 1;
        assert!(!header.is_valid());

        header.version = FORMAT_VERSION;
        header.magic = "MSWORD-DOC".into();
        assert!(!header.is_valid());
    }

    #[test]
    fn test_touch_moves_modified_only() {
        let mut header = ProjectHeader::new();
        let created = header.created;
        header.touch();
        assert_eq!(header.created, created);
        assert!(header.modified >= created);
    }
}
