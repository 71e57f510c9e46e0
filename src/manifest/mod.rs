//! Manifest store
//!
//! Loads the manifest text, exposes it as a [`ManifestDocument`], and writes it back
//! only when the content actually changed

use std::fs;
use std::path::{Path, PathBuf};

pub mod document;

pub use document::{Heading, ManifestDocument, Reference, Section};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct ManifestStore {
    path: PathBuf,
    original: String,
    document: ManifestDocument,
    created: bool,
}

impl ManifestStore {
    /// Read an existing manifest. A missing file is a read error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let original = fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = original.len(), "loaded manifest");
        Ok(Self {
            document: ManifestDocument::parse(&original),
            original,
            path,
            created: false,
        })
    }

    /// Read the manifest, first writing a `# <title>` skeleton if it does not exist
    pub fn load_or_init(path: impl Into<PathBuf>, title: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let mut created = false;
        if !path.exists() {
            fs::write(&path, skeleton(title)).map_err(|source| ManifestError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "created manifest skeleton");
            created = true;
        }
        let mut store = Self::load(path)?;
        store.created = created;
        Ok(store)
    }

    /// A skeleton that `load_or_init` would create, without touching disk
    pub fn in_memory(path: impl Into<PathBuf>, title: &str) -> Self {
        let original = skeleton(title);
        Self {
            path: path.into(),
            document: ManifestDocument::parse(&original),
            original,
            created: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `load_or_init` had to create the file
    pub fn was_created(&self) -> bool {
        self.created
    }

    pub fn document(&self) -> &ManifestDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ManifestDocument {
        &mut self.document
    }

    /// Whether any reference, whatever its alt text, points at `filename`
    pub fn has_reference_to(&self, filename: &str) -> bool {
        self.document
            .references()
            .iter()
            .any(|r| r.file_name() == filename)
    }

    pub fn is_dirty(&self) -> bool {
        self.document.to_text() != self.original
    }

    /// Write the document back if it differs from what was loaded. Returns whether it wrote.
    pub fn save_if_changed(&mut self) -> Result<bool, ManifestError> {
        let text = self.document.to_text();
        if text == self.original {
            tracing::debug!(path = %self.path.display(), "manifest unchanged, skipping write");
            return Ok(false);
        }
        fs::write(&self.path, &text).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "saved manifest");
        self.original = text;
        Ok(true)
    }
}

fn skeleton(title: &str) -> String {
    format!("# {}\n\n", title)
}
