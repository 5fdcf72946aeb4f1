//! File I/O operations

use crate::{ProjectFile, Result, StoreError};
use std::path::Path;

/// Save a project to a file, refreshing its modification time
pub async fn save_project(project: &mut ProjectFile, path: impl AsRef<Path>) -> Result<()> {
    project.header.touch();
    let json = crate::serialize(project)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Load a project from a file
pub async fn load_project(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = tokio::fs::read_to_string(path).await?;
    crate::deserialize(&json)
}

/// Save a project synchronously
pub fn save_project_sync(project: &mut ProjectFile, path: impl AsRef<Path>) -> Result<()> {
    project.header.touch();
    let json = crate::serialize(project)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a project synchronously
pub fn load_project_sync(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    crate::deserialize(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorSettings;
    use layout_tree::LayoutTree;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_sync() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("menu.scmp");

        let settings = EditorSettings {
            simple_names: true,
            ..EditorSettings::default()
        };
        let mut project = ProjectFile::new(LayoutTree::with_empty_table().unwrap(), settings);
        save_project_sync(&mut project, &path).unwrap();

        let loaded = load_project_sync(&path).unwrap();
        assert_eq!(loaded.tree, project.tree);
        assert!(loaded.settings.simple_names);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_project_sync(temp_dir.path().join("nope.scmp"));
        assert!(matches!(result, Err(StoreError::FileNotFound(_))));
    }

    #[test]
    fn test_load_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.scmp");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_project_sync(&path), Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_save_load_async() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("menu.scmp");

        let mut project = ProjectFile::new(LayoutTree::with_empty_table().unwrap(), EditorSettings::default());
        save_project(&mut project, &path).await.unwrap();

        let loaded = load_project(&path).await.unwrap();
        assert_eq!(loaded, project);
    }
}
