//! Recently opened projects

use chrono::{DateTime, Utc};
use layout_tree::proper_name;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of projects remembered
pub const MAX_RECENT_FILES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFile {
    pub path: PathBuf,
    /// File name without extension, as shown in the menu
    pub name: String,
    pub opened: DateTime<Utc>,
}

impl RecentFile {
    fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| proper_name(&n.to_string_lossy()).to_string())
            .unwrap_or_default();
        Self {
            path,
            name,
            opened: Utc::now(),
        }
    }
}

/// Most recent first, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFiles {
    entries: Vec<RecentFile>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `path` to the front, dropping the oldest entry past the limit
    pub fn put(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(0, RecentFile::new(path));
        self.entries.truncate(MAX_RECENT_FILES);
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.path != path);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentFile> {
        self.entries.iter()
    }

    /// Entries whose file is still on disk
    pub fn existing(&self) -> impl Iterator<Item = &RecentFile> {
        self.entries.iter().filter(|entry| entry.path.exists())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paths(recent: &RecentFiles) -> Vec<&Path> {
        recent.iter().map(|entry| entry.path.as_path()).collect()
    }

    #[test]
    fn test_put_moves_to_front() {
        let mut recent = RecentFiles::new();
        recent.put("/a.scmp");
        recent.put("/b.scmp");
        recent.put("/a.scmp");

        assert_eq!(paths(&recent), vec![Path::new("/a.scmp"), Path::new("/b.scmp")]);
        assert_eq!(recent.iter().next().unwrap().name, "a");
    }

    #[test]
    fn test_put_caps_entries() {
        let mut recent = RecentFiles::new();
        for i in 0..8 {
            recent.put(format!("/p{}.scmp", i));
        }
        assert_eq!(recent.len(), MAX_RECENT_FILES);
        assert_eq!(recent.iter().next().unwrap().path, Path::new("/p7.scmp"));
        assert!(recent.iter().all(|entry| entry.path != Path::new("/p2.scmp")));
    }

    #[test]
    fn test_existing_filters_missing_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let present = temp_dir.path().join("menu.scmp");
        std::fs::write(&present, "{}").unwrap();

        let mut recent = RecentFiles::new();
        recent.put(&present);
        recent.put(temp_dir.path().join("gone.scmp"));

        let existing: Vec<_> = recent.existing().map(|entry| entry.path.clone()).collect();
        assert_eq!(existing, vec![present]);
        assert!(recent.remove(&temp_dir.path().join("gone.scmp")));
        assert_eq!(recent.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_unique_and_bounded(indices in prop::collection::vec(0u8..10, 0..40)) {
            let mut recent = RecentFiles::new();
            for i in &indices {
                recent.put(format!("/p{}.scmp", i));
            }
            prop_assert!(recent.len() <= MAX_RECENT_FILES);

            let mut seen = std::collections::HashSet::new();
            prop_assert!(recent.iter().all(|entry| seen.insert(entry.path.clone())));

            if let Some(last) = indices.last() {
                let expected = format!("/p{}.scmp", last);
                prop_assert_eq!(recent.iter().next().map(|e| e.path.clone()), Some(PathBuf::from(expected)));
            }
        }
    }
}
