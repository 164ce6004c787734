//! Page range computation.
//!
//! Each flat bookmark owns the pages from its own destination up to the next
//! flat bookmark's destination. The outline is expected to list bookmarks in
//! page order; an outline that does not is rejected instead of producing
//! negative or overlapping ranges.

use crate::error::StructuralError;
use crate::types::{FlatBookmark, PageRange};

/// Compute one range per flat bookmark.
///
/// Pages before the first bookmark are folded into the first range, so the
/// result always covers `[0, total_pages)`. Bookmarks that share a page
/// produce empty ranges.
pub fn compute_ranges(
    flat: &[FlatBookmark],
    total_pages: usize,
) -> Result<Vec<PageRange>, StructuralError> {
    for bookmark in flat {
        if bookmark.page >= total_pages {
            return Err(StructuralError::PageOutOfBounds {
                title: bookmark.title.clone(),
                page: bookmark.page,
                total_pages,
            });
        }
    }

    for pair in flat.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.page < previous.page {
            return Err(StructuralError::OutOfOrder {
                title: current.title.clone(),
                page: current.page,
                previous_title: previous.title.clone(),
                previous_page: previous.page,
            });
        }
    }

    let ranges = flat
        .iter()
        .enumerate()
        .map(|(i, bookmark)| {
            let start = if i == 0 { 0 } else { bookmark.page };
            let end = flat.get(i + 1).map_or(total_pages, |next| next.page);
            PageRange::new(start, end)
        })
        .collect();

    Ok(ranges)
}

/// Check that `ranges` tile `[0, total_pages)` without gaps or overlaps.
///
/// An empty list is valid: no ranges, no output.
pub fn validate_coverage(ranges: &[PageRange], total_pages: usize) -> Result<(), StructuralError> {
    if ranges.is_empty() {
        return Ok(());
    }

    let mut expected = 0;
    for (index, range) in ranges.iter().enumerate() {
        if range.start != expected || range.end < range.start {
            return Err(StructuralError::NonContiguous {
                index,
                expected,
                found: range.start,
            });
        }
        expected = range.end;
    }

    if expected != total_pages {
        return Err(StructuralError::IncompleteCoverage {
            covered: expected,
            total_pages,
        });
    }

    Ok(())
}
