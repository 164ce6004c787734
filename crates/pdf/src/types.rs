use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use pdfsplit_core::{OutlineTree, PageRange, SplitUnit};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub page_count: usize,
    pub bookmark_count: usize,
}

/// Everything decided before any file is written.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SplitPlan {
    pub page_count: usize,
    pub tree: OutlineTree,
    pub units: Vec<SplitUnit>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub title: String,
    pub range: PageRange,
    pub page_count: usize,
    pub bookmark_count: usize,
}

/// A unit whose range holds no pages, typically a parent bookmark that
/// shares its page with its first child.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    pub file_name: String,
    pub range: PageRange,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub page_count: usize,
    pub written: Vec<WrittenFile>,
    pub skipped: Vec<SkippedUnit>,
}
