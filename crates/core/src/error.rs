use thiserror::Error;

/// The outline cannot be turned into a consistent set of page ranges.
///
/// Always fatal for the run: nothing is guessed or skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Bookmark '{title}' does not resolve to a page: {reason}")]
    UnresolvedDestination { title: String, reason: String },

    #[error("Child list at position {position} (depth {depth}) does not follow a bookmark")]
    OrphanChildList { depth: usize, position: usize },

    #[error("Malformed outline: {0}")]
    MalformedOutline(String),

    #[error("Bookmark '{title}' points to page {page}, but the document has {total_pages} pages")]
    PageOutOfBounds {
        title: String,
        page: usize,
        total_pages: usize,
    },

    #[error(
        "Bookmark '{title}' (page {page}) follows '{previous_title}' (page {previous_page}) in the outline but starts earlier in the document"
    )]
    OutOfOrder {
        title: String,
        page: usize,
        previous_title: String,
        previous_page: usize,
    },

    #[error("Page range #{index} starts at page {found}, expected {expected}")]
    NonContiguous {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Page ranges end at page {covered}, but the document has {total_pages} pages")]
    IncompleteCoverage { covered: usize, total_pages: usize },
}
