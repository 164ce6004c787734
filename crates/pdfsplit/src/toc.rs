use std::path::PathBuf;

use pdfsplit_core::{BookmarkNode, Depth, FlatBookmark, SplitOptions};
use serde::Serialize;

use crate::prelude::{println, *};

#[derive(Debug, clap::Args)]
pub struct App {
    /// Path to the PDF file
    pub path: PathBuf,

    /// Number of outline levels that start a new file (1-5)
    #[arg(short, long, default_value = "2", value_parser = crate::parse_depth)]
    pub depth: Depth,
}

#[derive(Debug, Serialize)]
pub struct TocOutput<'a> {
    pub page_count: usize,
    pub bookmark_count: usize,
    pub bookmarks: &'a [BookmarkNode],
    /// Bookmarks that start a new file at the chosen depth.
    pub split_points: &'a [FlatBookmark],
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let source = crate::source_file(&app.path)?;
    let options = SplitOptions {
        max_depth: app.depth,
        ..SplitOptions::default()
    };

    let document = pdf::open(&source, &options).map_err(|e| eyre!(e))?;
    let output = TocOutput {
        page_count: document.page_count(),
        bookmark_count: document.tree.bookmark_count(),
        bookmarks: &document.tree.roots,
        split_points: &document.tree.flat,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
