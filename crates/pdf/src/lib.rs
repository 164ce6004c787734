use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use backend::LopdfBackend;
use pdfsplit_core::{build_tree, plan_split, OutlineTree, SplitOptions, StructuralError};

pub mod backend;
pub mod outline;
pub mod types;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use types::*;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Cannot read {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("Cannot derive an output directory name from {}", .0.display())]
    InvalidSourceName(PathBuf),
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("Cannot create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot serialize {}: {reason}", .path.display())]
    Save { path: PathBuf, reason: String },
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Coarse classification of [`PdfError`] for callers that only need to know
/// who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source file is missing, unreadable or not a usable PDF.
    Input,
    /// The outline cannot be turned into consistent page ranges.
    Structural,
    /// An output directory or file could not be written.
    Io,
}

impl PdfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PdfError::Open { .. }
            | PdfError::Parse(_)
            | PdfError::Encrypted
            | PdfError::InvalidSourceName(_) => ErrorKind::Input,
            PdfError::Structural(_) => ErrorKind::Structural,
            PdfError::CreateDir { .. } | PdfError::Save { .. } | PdfError::Write { .. } => {
                ErrorKind::Io
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A loaded source document with its bookmark tree.
///
/// Constructed via [`SourceDocument::from_bytes`]. The document is parsed
/// once and only read afterwards; every split output is built from a copy.
pub struct SourceDocument {
    backend: LopdfBackend,
    pub tree: OutlineTree,
}

impl SourceDocument {
    /// Parse PDF bytes and build the bookmark tree.
    pub fn from_bytes(bytes: &[u8], options: &SplitOptions) -> Result<Self, PdfError> {
        let backend = LopdfBackend::load_bytes(bytes)?;
        let raw = backend.raw_outline()?;
        let tree = build_tree(&raw, &backend, options)?;

        log::debug!(
            "Loaded document: {} pages, {} bookmarks, {} split points at depth {}",
            backend.page_count(),
            tree.bookmark_count(),
            tree.flat.len(),
            options.max_depth
        );

        Ok(SourceDocument { backend, tree })
    }

    pub fn page_count(&self) -> usize {
        self.backend.page_count()
    }

    /// Compute every unit and validate the ranges. Nothing is written.
    pub fn plan(&self) -> Result<SplitPlan, PdfError> {
        let units = plan_split(&self.tree, self.page_count())?;
        Ok(SplitPlan {
            page_count: self.page_count(),
            tree: self.tree.clone(),
            units,
        })
    }

    /// Write one PDF per non-empty unit of `plan` into `output_dir`.
    ///
    /// Units are written in order. The first failure aborts the run; files
    /// written before it are left in place.
    pub fn write(&self, plan: &SplitPlan, output_dir: &Path) -> Result<SplitReport, PdfError> {
        fs::create_dir_all(output_dir).map_err(|source| PdfError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::new();
        let mut skipped = Vec::new();

        for unit in &plan.units {
            if unit.range.is_empty() {
                log::warn!(
                    "Skipping '{}': no pages between bookmark and the next one (page {})",
                    unit.file_name,
                    unit.range.start + 1
                );
                skipped.push(SkippedUnit {
                    file_name: unit.file_name.clone(),
                    range: unit.range,
                });
                continue;
            }

            let path = output_dir.join(&unit.file_name);
            let mut doc = writer::extract_unit(self.backend.raw_doc(), unit)?;
            let bytes = writer::to_bytes(&mut doc).map_err(|e| PdfError::Save {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            fs::write(&path, bytes).map_err(|source| PdfError::Write {
                path: path.clone(),
                source,
            })?;

            log::info!(
                "Wrote {} (pages {}-{})",
                path.display(),
                unit.range.start + 1,
                unit.range.end
            );

            written.push(WrittenFile {
                path,
                title: unit.safe_title.clone(),
                range: unit.range,
                page_count: unit.range.len(),
                bookmark_count: pdfsplit_core::count_nodes(&unit.outline),
            });
        }

        Ok(SplitReport {
            output_dir: output_dir.to_path_buf(),
            page_count: plan.page_count,
            written,
            skipped,
        })
    }
}

// ---------------------------------------------------------------------------
// Convenience free functions
// ---------------------------------------------------------------------------

/// Directory the outputs of `source` go to: `<target_dir>/<source stem>`.
pub fn output_dir_for(source: &Path, target_dir: &Path) -> Result<PathBuf, PdfError> {
    let stem = source
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| PdfError::InvalidSourceName(source.to_path_buf()))?;
    Ok(target_dir.join(stem))
}

/// Read and parse the PDF at `path`.
pub fn open(path: &Path, options: &SplitOptions) -> Result<SourceDocument, PdfError> {
    let bytes = fs::read(path).map_err(|source| PdfError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    SourceDocument::from_bytes(&bytes, options)
}

/// Split the PDF at `source` into `<target_dir>/<source stem>/`.
///
/// The whole plan is validated before the first file is written, so a
/// structural problem leaves the filesystem untouched.
pub fn split_file(
    source: &Path,
    target_dir: &Path,
    options: &SplitOptions,
) -> Result<SplitReport, PdfError> {
    let output_dir = output_dir_for(source, target_dir)?;
    let document = open(source, options)?;
    let plan = document.plan()?;

    log::info!(
        "Splitting {} into {} parts",
        source.display(),
        plan.units.len()
    );

    document.write(&plan, &output_dir)
}

/// Parse PDF bytes into a bookmark tree.
pub fn outline(bytes: &[u8], options: &SplitOptions) -> Result<OutlineTree, PdfError> {
    Ok(SourceDocument::from_bytes(bytes, options)?.tree)
}

/// Get document metadata without building the bookmark tree.
pub fn info(bytes: &[u8]) -> Result<DocumentMetadata, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    let bookmarks = count_outline_items(&backend.raw_outline()?);
    Ok(extract_metadata(&backend, bookmarks))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn extract_metadata(backend: &LopdfBackend, bookmark_count: usize) -> DocumentMetadata {
    let raw = backend.metadata();
    DocumentMetadata {
        title: raw.get("Title").cloned(),
        author: raw.get("Author").cloned(),
        creator: raw.get("Creator").cloned(),
        page_count: backend.page_count(),
        bookmark_count,
    }
}

fn count_outline_items<T>(entries: &[pdfsplit_core::OutlineEntry<T>]) -> usize {
    entries
        .iter()
        .map(|entry| match entry {
            pdfsplit_core::OutlineEntry::Item(_) => 1,
            pdfsplit_core::OutlineEntry::Children(children) => count_outline_items(children),
        })
        .sum()
}
