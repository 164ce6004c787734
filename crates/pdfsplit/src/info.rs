use std::path::PathBuf;

use crate::prelude::{println, *};

#[derive(Debug, clap::Args)]
pub struct App {
    /// Path to the PDF file
    pub path: PathBuf,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let source = crate::source_file(&app.path)?;
    let bytes = std::fs::read(&source)
        .wrap_err_with(|| f!("Failed to read {}", source.display()))?;
    let meta = pdf::info(&bytes).map_err(|e| eyre!(e))?;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}
