use std::path::{Path, PathBuf};

use colored::Colorize;
use pdf::{SplitPlan, SplitReport};
use pdfsplit_core::{Depth, PageRange, SplitOptions};

use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args)]
pub struct App {
    /// Path to the PDF file
    pub path: PathBuf,

    /// Base directory for the output folder (defaults to the PDF's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of outline levels that start a new file (1-5)
    #[arg(short, long, default_value = "2", value_parser = crate::parse_depth)]
    pub depth: Depth,

    /// Prefix file names with their position (01_, 02_, ...)
    #[arg(short, long)]
    pub index: bool,

    /// Print the plan without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let source = crate::source_file(&app.path)?;
    let target = match app.output {
        Some(output) => output,
        None => default_target(&source),
    };
    if target.exists() && !target.is_dir() {
        return Err(Error::OutputNotADirectory(target.display().to_string()).into());
    }

    let options = SplitOptions {
        max_depth: app.depth,
        add_index: app.index,
    };

    if global.verbose {
        eprintln!(
            "Splitting {} at depth {} into {}",
            source.display(),
            options.max_depth,
            target.display()
        );
    }

    if app.dry_run {
        let output_dir = pdf::output_dir_for(&source, &target).map_err(|e| eyre!(e))?;
        let document = pdf::open(&source, &options).map_err(|e| eyre!(e))?;
        let plan = document.plan().map_err(|e| eyre!(e))?;

        if app.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            plan_table(&plan).printstd();
            println!();
            println!("Would write to {}", output_dir.display());
        }
        return Ok(());
    }

    let report = pdf::split_file(&source, &target, &options).map_err(|e| eyre!(e))?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        eprintln!(
            "{}",
            f!("{} has no bookmarks; nothing to split", source.display())
                .yellow()
                .bold()
        );
        return Ok(());
    }

    report_table(&report).printstd();
    println!();
    for skipped in &report.skipped {
        eprintln!(
            "{}",
            f!("Skipped {}: no pages of its own", skipped.file_name).yellow()
        );
    }
    println!(
        "{}",
        f!(
            "Wrote {} files to {}",
            report.written.len(),
            report.output_dir.display()
        )
        .green()
        .bold()
    );

    Ok(())
}

/// Directory the source lives in, or `.` for a bare file name.
fn default_target(source: &Path) -> PathBuf {
    source
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// 1-based, inclusive page span for display.
fn page_span(range: PageRange) -> String {
    match range.len() {
        0 => "-".to_string(),
        1 => f!("{}", range.start + 1),
        _ => f!("{}-{}", range.start + 1, range.end),
    }
}

fn plan_table(plan: &SplitPlan) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row!["#", "File", "Pages", "Bookmarks"]);
    for (i, unit) in plan.units.iter().enumerate() {
        table.add_row(prettytable::row![
            i + 1,
            unit.file_name,
            page_span(unit.range),
            pdfsplit_core::count_nodes(&unit.outline)
        ]);
    }
    table
}

fn report_table(report: &SplitReport) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row!["File", "Pages", "Page count", "Bookmarks"]);
    for file in &report.written {
        let name = file
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(prettytable::row![
            name,
            page_span(file.range),
            file.page_count,
            file.bookmark_count
        ]);
    }
    table
}
