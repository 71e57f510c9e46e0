//! Data models shared by the synchronizer and the validator
//!
//! Components and screenshots are derived fresh on every run; nothing here is persisted

use serde::Serialize;
use std::path::PathBuf;

/// Extension every preview screenshot carries
pub const SCREENSHOT_EXTENSION: &str = ".png";

/// A named UI component expected to have one preview screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Expected screenshot filename, `<name>.png`
    pub fn filename(&self) -> String {
        format!("{}{}", self.name, SCREENSHOT_EXTENSION)
    }

    /// Expected on-disk location inside the preview directory
    pub fn screenshot_path(&self, previews: &std::path::Path) -> PathBuf {
        previews.join(self.filename())
    }
}

/// Classification of a component's screenshot on disk
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreenshotStatus {
    Missing,
    TooSmall { bytes: u64 },
    Ok { bytes: u64 },
}

impl ScreenshotStatus {
    pub fn is_missing(&self) -> bool {
        matches!(self, ScreenshotStatus::Missing)
    }
}

impl std::fmt::Display for ScreenshotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotStatus::Missing => write!(f, "missing"),
            ScreenshotStatus::TooSmall { bytes } => write!(f, "too small ({} bytes)", bytes),
            ScreenshotStatus::Ok { bytes } => write!(f, "ok ({} bytes)", bytes),
        }
    }
}

/// Which fallback pattern found a nonstandard reference
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTier {
    /// Any alt text, canonical path
    AnyAltExactPath,
    /// Alt text mentions the component, path under the preview directory
    NamedAltPreviewPath,
    /// Any alt text, any path ending in the screenshot filename
    AnyAltMatchingFilename,
}

impl std::fmt::Display for FallbackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackTier::AnyAltExactPath => write!(f, "nonstandard alt text"),
            FallbackTier::NamedAltPreviewPath => write!(f, "nonstandard path"),
            FallbackTier::AnyAltMatchingFilename => write!(f, "filename match only"),
        }
    }
}

/// Classification of a component's reference in the manifest
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "tier", rename_all = "snake_case")]
pub enum ReferenceStatus {
    Ok,
    Nonstandard(FallbackTier),
    Missing,
}

impl std::fmt::Display for ReferenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceStatus::Ok => write!(f, "ok"),
            ReferenceStatus::Nonstandard(tier) => write!(f, "nonstandard ({})", tier),
            ReferenceStatus::Missing => write!(f, "missing"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ComponentReport {
    pub name: String,
    pub screenshot: ScreenshotStatus,
    pub reference: ReferenceStatus,
}

/// Outcome of one validator run
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub manifest: PathBuf,
    pub components: Vec<ComponentReport>,
    /// Screenshot filenames that do not exist on disk
    pub missing_screenshots: Vec<String>,
    /// Components whose reference was appended to the manifest
    pub repaired: Vec<String>,
    pub manifest_updated: bool,
}

impl ValidationReport {
    pub fn undersized_screenshots(&self) -> impl Iterator<Item = &ComponentReport> {
        self.components
            .iter()
            .filter(|c| matches!(c.screenshot, ScreenshotStatus::TooSmall { .. }))
    }
}

/// How the synchronizer placed a missing reference
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Inserted below an existing component heading
    UnderHeading,
    /// Appended as a new section at the end of the manifest
    NewSection,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncAction {
    pub component: String,
    pub filename: String,
    pub placement: Placement,
}

/// Outcome of one synchronizer run
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    pub manifest: PathBuf,
    pub manifest_created: bool,
    pub added: Vec<SyncAction>,
    pub manifest_updated: bool,
}
