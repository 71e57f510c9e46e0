//! Synchronizer
//!
//! Adds a reference to the sync manifest for every screenshot found in the preview directory

use anyhow::{Context, Result};

use crate::catalog::ScreenshotCatalog;
use crate::config::{Config, ProjectPaths};
use crate::manifest::{ManifestStore, Reference};
use crate::models::{Placement, SyncAction, SyncReport};

pub struct Synchronizer {
    config: Config,
    paths: ProjectPaths,
}

impl Synchronizer {
    pub fn new(config: Config, paths: ProjectPaths) -> Self {
        Self { config, paths }
    }

    /// Run one sync pass. With `dry_run` the manifest skeleton and the
    /// computed changes are never written.
    pub fn run(&self, dry_run: bool) -> Result<SyncReport> {
        let mut store = if dry_run && !self.paths.sync_manifest.exists() {
            ManifestStore::in_memory(&self.paths.sync_manifest, &self.config.manifest_title)
        } else {
            ManifestStore::load_or_init(&self.paths.sync_manifest, &self.config.manifest_title)?
        };

        let catalog = ScreenshotCatalog::new(&self.paths.previews, self.config.min_screenshot_bytes);
        let mut added = Vec::new();

        for screenshot in catalog.discover()? {
            if store.has_reference_to(&screenshot.filename) {
                tracing::debug!(component = %screenshot.component, "reference already present");
                continue;
            }

            let reference = Reference::new(
                format!("{} Preview", screenshot.component),
                self.config.preview_link(&screenshot.filename),
            );
            let document = store.document_mut();
            let placement = if document.find_section(&screenshot.component).is_some() {
                document.insert_under_heading(&screenshot.component, &reference);
                Placement::UnderHeading
            } else {
                document.append_section(&screenshot.component, &reference);
                Placement::NewSection
            };
            tracing::debug!(component = %screenshot.component, ?placement, "added reference");

            added.push(SyncAction {
                component: screenshot.component,
                filename: screenshot.filename,
                placement,
            });
        }

        let manifest_updated = if dry_run {
            store.is_dirty()
        } else {
            store
                .save_if_changed()
                .with_context(|| format!("Failed to update {}", store.path().display()))?
        };

        Ok(SyncReport {
            manifest: store.path().to_path_buf(),
            manifest_created: store.was_created(),
            added,
            manifest_updated,
        })
    }
}
