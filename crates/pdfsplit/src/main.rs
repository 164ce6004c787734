use std::path::{Path, PathBuf};

use crate::prelude::*;
use clap::Parser;
use pdfsplit_core::Depth;

mod error;
mod info;
mod prelude;
mod split;
mod toc;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Split PDF documents into one file per bookmark"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Split a PDF into one file per bookmark
    Split(crate::split::App),

    /// Print the bookmark tree and the resulting split points
    Toc(crate::toc::App),

    /// Print document metadata
    Info(crate::info::App),
}

fn main() -> Result<()> {
    let app = App::parse();

    init_logger(app.global.verbose);
    color_eyre::install()?;

    match app.command {
        SubCommands::Split(sub_app) => crate::split::run(sub_app, app.global),
        SubCommands::Toc(sub_app) => crate::toc::run(sub_app, app.global),
        SubCommands::Info(sub_app) => crate::info::run(sub_app, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

/// `RUST_LOG` wins over `--verbose`.
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Clap value parser for `--depth`.
pub fn parse_depth(value: &str) -> std::result::Result<Depth, Error> {
    let raw: u8 = value
        .parse()
        .map_err(|_| Error::InvalidDepth(f!("'{}' is not a number", value)))?;
    Depth::try_from(raw).map_err(|e| Error::InvalidDepth(e.to_string()))
}

/// Check that `path` names an existing regular file.
pub fn source_file(path: &Path) -> std::result::Result<PathBuf, Error> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(Error::SourceNotAFile(path.display().to_string()));
    }
    Ok(path.to_path_buf())
}
