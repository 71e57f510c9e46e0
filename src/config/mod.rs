//! Configuration management for snapshot-manifest
//!
//! Handles the optional snapshot-manifest.toml in the project root and the
//! paths derived from it

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the project root
pub const CONFIG_FILE: &str = "snapshot-manifest.toml";

/// Components every manifest is expected to reference
const DEFAULT_COMPONENTS: &[&str] = &[
    "MenuBarView",
    "TunaDictationView",
    "QuickDictationView",
    "AboutCardView",
    "TunaSettingsView",
    "BidirectionalSlider",
    "ShortcutTextField",
    "GlassCard",
    "ModernToggleStyle",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Preview directory, relative to the root. Also the path prefix used in references.
    pub previews_dir: String,
    /// Manifest written by `sync`
    pub sync_manifest: String,
    /// Manifest checked and repaired by `validate`
    pub validate_manifest: String,
    /// Title of the skeleton written when the sync manifest is absent
    pub manifest_title: String,
    /// Screenshots smaller than this are flagged as likely invalid
    pub min_screenshot_bytes: u64,
    pub components: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            previews_dir: "docs/previews".to_string(),
            sync_manifest: ".UISnapshotManifest".to_string(),
            validate_manifest: ".UISnapshotManifest.md".to_string(),
            manifest_title: "Tuna UI Snapshot Manifest".to_string(),
            min_screenshot_bytes: 1000,
            components: DEFAULT_COMPONENTS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Relative link path of a screenshot, e.g. `docs/previews/Foo.png`
    pub fn preview_link(&self, filename: &str) -> String {
        format!("{}/{}", self.previews_dir.trim_end_matches('/'), filename)
    }
}

/// Returns paths to every file snapshot-manifest touches
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub previews: PathBuf,
    pub sync_manifest: PathBuf,
    pub validate_manifest: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: root.join(CONFIG_FILE),
            previews: root.join(&config.previews_dir),
            sync_manifest: root.join(&config.sync_manifest),
            validate_manifest: root.join(&config.validate_manifest),
            root: root.to_path_buf(),
        }
    }
}

/// Load configuration from `<root>/snapshot-manifest.toml`, falling back to defaults
pub fn load_config(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Save configuration to `<root>/snapshot-manifest.toml`
pub fn save_config(root: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(root.join(CONFIG_FILE), content).context("Failed to write config file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.components.len(), 9);
        assert_eq!(config.min_screenshot_bytes, 1000);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "components = [\"Foo\", \"Bar\"]\nmin_screenshot_bytes = 10\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.components, vec!["Foo", "Bar"]);
        assert_eq!(config.min_screenshot_bytes, 10);
        assert_eq!(config.previews_dir, "docs/previews");
        assert_eq!(config.validate_manifest, ".UISnapshotManifest.md");
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.manifest_title = "Widgets".to_string();
        save_config(temp.path(), &config).unwrap();
        assert_eq!(load_config(temp.path()).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "components = 3").unwrap();
        assert!(load_config(temp.path()).is_err());
    }

    #[test]
    fn test_paths_are_distinct_manifests() {
        let config = Config::default();
        let paths = ProjectPaths::new(Path::new("/project"), &config);
        assert_ne!(paths.sync_manifest, paths.validate_manifest);
        assert_eq!(paths.previews, Path::new("/project/docs/previews"));
        assert_eq!(config.preview_link("Foo.png"), "docs/previews/Foo.png");
    }
}
