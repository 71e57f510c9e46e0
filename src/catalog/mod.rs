//! Screenshot catalog
//!
//! Discovers preview screenshots on disk, or checks a fixed component list against them

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::models::{Component, ScreenshotStatus, SCREENSHOT_EXTENSION};

/// A screenshot found in the preview directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredScreenshot {
    pub component: String,
    pub filename: String,
}

pub struct ScreenshotCatalog {
    previews: PathBuf,
    min_bytes: u64,
}

impl ScreenshotCatalog {
    pub fn new(previews: impl Into<PathBuf>, min_bytes: u64) -> Self {
        Self {
            previews: previews.into(),
            min_bytes,
        }
    }

    /// List every `*.png` in the preview directory, sorted by filename
    pub fn discover(&self) -> Result<Vec<DiscoveredScreenshot>> {
        let entries = fs::read_dir(&self.previews).with_context(|| {
            format!("Failed to read preview directory {}", self.previews.display())
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read preview directory entry")?;
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 filename");
                continue;
            };
            if let Some(component) = filename.strip_suffix(SCREENSHOT_EXTENSION) {
                if component.is_empty() {
                    continue;
                }
                found.push(DiscoveredScreenshot {
                    component: component.to_string(),
                    filename,
                });
            }
        }

        found.sort_by(|a, b| a.filename.cmp(&b.filename));
        tracing::debug!(count = found.len(), dir = %self.previews.display(), "discovered screenshots");
        Ok(found)
    }

    /// Classify one component's screenshot by existence and size
    pub fn classify(&self, component: &Component) -> ScreenshotStatus {
        let path = component.screenshot_path(&self.previews);
        let status = match fs::metadata(&path) {
            Err(_) => ScreenshotStatus::Missing,
            Ok(meta) if meta.len() < self.min_bytes => ScreenshotStatus::TooSmall { bytes: meta.len() },
            Ok(meta) => ScreenshotStatus::Ok { bytes: meta.len() },
        };
        tracing::debug!(component = %component.name, %status, "classified screenshot");
        status
    }
}
