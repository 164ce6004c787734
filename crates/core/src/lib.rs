//! Core library for pdfsplit
//!
//! This crate implements the **Functional Core** of the pdfsplit application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The pdfsplit project uses a three-crate architecture to enforce separation of concerns:
//!
//! - **`pdfsplit_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: The `lopdf` adapter that reads outlines and writes split documents
//! - **`pdfsplit`**: The command-line shell (argument parsing, reporting)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no PDF files required
//!
//! The only contact point with a concrete PDF library is the
//! [`outline::DestinationResolver`] trait, which the adapter implements for its
//! own outline item handles.
//!
//! # Module Organization
//!
//! - [`outline`]: Raw outline entries and the recursive-descent tree builder
//! - [`naming`]: Filesystem-safe titles and output file names
//! - [`ranges`]: Page range computation and coverage validation
//! - [`reroot`]: Filtering and rebasing of the bookmark tree for one range
//! - [`plan`]: Assembles everything into one [`SplitUnit`] per flat bookmark
//! - [`types`]: Shared domain models
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use pdfsplit_core::{build_tree, plan_split, SplitOptions};
//!
//! let tree = build_tree(&raw_outline, &resolver, &SplitOptions::default())?;
//! let units = plan_split(&tree, total_pages)?;
//!
//! for unit in &units {
//!     println!("{} -> pages {}..{}", unit.file_name, unit.range.start, unit.range.end);
//! }
//! ```

pub mod error;
pub mod naming;
pub mod outline;
pub mod plan;
pub mod ranges;
pub mod reroot;
pub mod types;

pub use error::StructuralError;
pub use outline::{build_tree, DestinationResolver, OutlineEntry};
pub use plan::plan_split;
pub use ranges::{compute_ranges, validate_coverage};
pub use reroot::reroot;
pub use types::*;
