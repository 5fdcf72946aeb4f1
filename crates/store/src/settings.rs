//! Editor settings management
//!
//! This module provides settings persistence, loading, and updating
//! for the scene composer. Project-level settings travel inside each
//! project file; the settings file holds the defaults for new projects
//! plus application-wide preferences.

use crate::{RecentFiles, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default size of the undo history
pub const DEFAULT_MAX_UNDOS: usize = 30;

/// Main application settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Application-wide preferences
    pub general: GeneralSettings,
    /// Settings given to newly created projects
    pub editor: EditorSettings,
}

/// Application-wide preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// Show the welcome screen on startup
    pub show_welcome: bool,
    pub check_for_updates: bool,
    /// Warn about problems found during export
    pub export_warnings: bool,
    pub recent_files: RecentFiles,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            show_welcome: true,
            check_for_updates: true,
            export_warnings: true,
            recent_files: RecentFiles::default(),
        }
    }
}

/// Per-project editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Number of undoable edits kept
    pub max_undos: usize,
    /// Use bare style names instead of fully qualified ones
    pub simple_names: bool,
    /// Background colour of the live preview
    pub preview_background: Rgba,
    pub export: ExportSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_undos: DEFAULT_MAX_UNDOS,
            simple_names: false,
            preview_background: Rgba::WHITE,
            export: ExportSettings::default(),
        }
    }
}

/// RGBA colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// What an export writes next to the layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    /// Write the texture atlas
    pub atlas: bool,
    /// Copy font files
    pub fonts: bool,
    /// Write colours as hex strings
    pub hex_colors: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Minimal,
            atlas: true,
            fonts: true,
            hex_colors: false,
        }
    }
}

/// Amount of detail in exported files
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Minimal,
    Complete,
}

/// Settings manager for loading, saving, and updating application settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: AppSettings,
}

impl SettingsManager {
    /// Create a new settings manager with the given app data directory
    pub fn new(app_data_dir: PathBuf) -> Self {
        let settings_path = app_data_dir.join("settings.json");
        Self {
            settings_path,
            current: AppSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn parse_or_default(content: &str) -> AppSettings {
        match serde_json::from_str::<AppSettings>(content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                AppSettings::default()
            }
        }
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&AppSettings> {
        self.current = if self.settings_path.exists() {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            Self::parse_or_default(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during app startup)
    pub fn load_sync(&mut self) -> Result<&AppSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            Self::parse_or_default(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub async fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    /// Update settings synchronously
    pub fn update_sync(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Update only the defaults for new projects
    pub fn update_editor_sync(&mut self, editor: EditorSettings) -> Result<()> {
        self.current.editor = editor;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub async fn reset(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save().await?;
        Ok(&self.current)
    }

    /// Reset settings to defaults synchronously
    pub fn reset_sync(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }

    /// Record an opened or saved project and persist the list
    pub fn put_recent_file_sync(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.current.general.recent_files.put(path);
        self.save_sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();

        assert_eq!(settings.editor.max_undos, 30);
        assert!(!settings.editor.simple_names);
        assert_eq!(settings.editor.preview_background, Rgba::WHITE);
        assert_eq!(settings.editor.export.format, ExportFormat::Minimal);
        assert!(settings.editor.export.atlas);
        assert!(settings.editor.export.fonts);
        assert!(!settings.editor.export.hex_colors);

        assert!(settings.general.show_welcome);
        assert!(settings.general.recent_files.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppSettings = serde_json::from_str(r#"{ "editor": { "max_undos": 12 } }"#).unwrap();
        assert_eq!(parsed.editor.max_undos, 12);
        assert!(parsed.editor.export.atlas);
        assert!(parsed.general.check_for_updates);
    }

    #[test]
    fn test_export_format_serialization() {
        assert_eq!(serde_json::to_string(&ExportFormat::Minimal).unwrap(), "\"minimal\"");
        assert_eq!(serde_json::to_string(&ExportFormat::Complete).unwrap(), "\"complete\"");
    }

    #[test]
    fn test_settings_manager_load_save_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        // Load should return defaults when no file exists
        let settings = manager.load_sync().unwrap();
        assert_eq!(settings, &AppSettings::default());

        let mut new_settings = AppSettings::default();
        new_settings.editor.max_undos = 50;
        new_settings.editor.export.format = ExportFormat::Complete;
        manager.update_sync(new_settings).unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path().to_path_buf());
        let loaded = manager2.load_sync().unwrap();
        assert_eq!(loaded.editor.max_undos, 50);
        assert_eq!(loaded.editor.export.format, ExportFormat::Complete);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());
        std::fs::write(manager.settings_path(), "not json at all").unwrap();

        let settings = manager.load_sync().unwrap();
        assert_eq!(settings, &AppSettings::default());
    }

    #[test]
    fn test_settings_manager_reset_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        manager
            .update_editor_sync(EditorSettings {
                simple_names: true,
                ..EditorSettings::default()
            })
            .unwrap();
        assert!(manager.get().editor.simple_names);

        let settings = manager.reset_sync().unwrap();
        assert!(!settings.editor.simple_names);
    }

    #[test]
    fn test_recent_files_persist() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());
        manager.put_recent_file_sync("/projects/menu.scmp").unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path().to_path_buf());
        let loaded = manager2.load_sync().unwrap();
        assert_eq!(loaded.general.recent_files.len(), 1);
    }

    #[tokio::test]
    async fn test_settings_manager_async() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        manager.load().await.unwrap();

        let mut new_settings = AppSettings::default();
        new_settings.editor.max_undos = 5;
        manager.update(new_settings).await.unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path().to_path_buf());
        let loaded = manager2.load().await.unwrap();
        assert_eq!(loaded.editor.max_undos, 5);
    }
}
