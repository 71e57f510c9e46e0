//! Screenshot and manifest validation
//!
//! Checks a fixed component list against the preview directory, classifies each
//! component's manifest reference, and appends sections for the missing ones.

use anyhow::{Context, Result};

use crate::catalog::ScreenshotCatalog;
use crate::config::{Config, ProjectPaths};
use crate::manifest::{ManifestStore, Reference};
use crate::models::{
    Component, ComponentReport, FallbackTier, ReferenceStatus, ValidationReport,
};

/// Alt-text suffixes accepted by the primary reference format
const PREVIEW_SUFFIXES: &[&str] = &["Preview", "预览"];

/// Suffix used for references the validator writes
const REPAIR_SUFFIX: &str = "预览";

/// Classifies how a component is referenced by a set of manifest references
pub struct ReferenceMatcher<'a> {
    references: &'a [Reference],
    previews_dir: &'a str,
}

impl<'a> ReferenceMatcher<'a> {
    pub fn new(references: &'a [Reference], previews_dir: &'a str) -> Self {
        Self {
            references,
            previews_dir: previews_dir.trim_end_matches('/'),
        }
    }

    /// Primary format first, then each fallback in order; first match wins
    pub fn classify(&self, component: &Component) -> ReferenceStatus {
        let filename = component.filename();
        let canonical = format!("{}/{}", self.previews_dir, filename);
        let preview_prefix = format!("{}/", self.previews_dir);

        if self
            .references
            .iter()
            .any(|r| r.path == canonical && is_standard_alt(&r.alt, &component.name))
        {
            return ReferenceStatus::Ok;
        }

        let fallbacks = [
            FallbackTier::AnyAltExactPath,
            FallbackTier::NamedAltPreviewPath,
            FallbackTier::AnyAltMatchingFilename,
        ];
        for tier in fallbacks {
            let matched = self.references.iter().any(|r| match tier {
                FallbackTier::AnyAltExactPath => r.path == canonical,
                FallbackTier::NamedAltPreviewPath => {
                    r.alt.contains(&component.name) && r.path.starts_with(&preview_prefix)
                }
                FallbackTier::AnyAltMatchingFilename => r.file_name() == filename,
            });
            if matched {
                tracing::debug!(component = %component.name, %tier, "nonstandard reference");
                return ReferenceStatus::Nonstandard(tier);
            }
        }

        ReferenceStatus::Missing
    }
}

/// `<name>Preview` or `<name>预览`, optionally with one space before the suffix.
/// The spaced form is also accepted so that the `<name> Preview` references
/// written by the synchronizer count as standard.
fn is_standard_alt(alt: &str, name: &str) -> bool {
    let Some(rest) = alt.strip_prefix(name) else {
        return false;
    };
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    PREVIEW_SUFFIXES.contains(&rest)
}

pub struct Validator {
    config: Config,
    paths: ProjectPaths,
}

impl Validator {
    pub fn new(config: Config, paths: ProjectPaths) -> Self {
        Self { config, paths }
    }

    fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.config.components.iter().map(Component::new)
    }

    /// Run the artifact pass, the reference pass, and the repair pass.
    /// Fails only when the manifest cannot be read or written.
    pub fn run(&self) -> Result<ValidationReport> {
        let mut store = ManifestStore::load(&self.paths.validate_manifest)?;
        self.run_on(&mut store)
    }

    /// Same as [`Validator::run`], against an already loaded manifest
    pub fn run_on(&self, store: &mut ManifestStore) -> Result<ValidationReport> {
        let catalog = ScreenshotCatalog::new(&self.paths.previews, self.config.min_screenshot_bytes);

        let screenshots: Vec<_> = self
            .components()
            .map(|c| {
                let status = catalog.classify(&c);
                (c, status)
            })
            .collect();
        let missing_screenshots: Vec<String> = screenshots
            .iter()
            .filter(|(_, status)| status.is_missing())
            .map(|(c, _)| c.filename())
            .collect();

        let references = store.document().references();
        let matcher = ReferenceMatcher::new(&references, &self.config.previews_dir);

        let components: Vec<ComponentReport> = screenshots
            .into_iter()
            .map(|(c, screenshot)| ComponentReport {
                reference: matcher.classify(&c),
                screenshot,
                name: c.name,
            })
            .collect();

        let mut repaired = Vec::new();
        for report in components.iter().filter(|c| c.reference == ReferenceStatus::Missing) {
            let component = Component::new(report.name.as_str());
            let reference = Reference::new(
                format!("{}{}", component.name, REPAIR_SUFFIX),
                self.config.preview_link(&component.filename()),
            );
            store.document_mut().append_section(&component.name, &reference);
            tracing::debug!(component = %component.name, "appended missing reference");
            repaired.push(component.name);
        }

        let manifest_updated = store
            .save_if_changed()
            .with_context(|| format!("Failed to update {}", store.path().display()))?;

        Ok(ValidationReport {
            manifest: store.path().to_path_buf(),
            components,
            missing_screenshots,
            repaired,
            manifest_updated,
        })
    }
}
