//! Re-rooting of the full bookmark tree onto one page range.

use crate::types::{BookmarkNode, PageRange};

/// Rebuild the part of `roots` that lives inside `range`.
///
/// A node is kept when its page lies in `range`. A node outside the range is
/// left out, but its in-range descendants are lifted into its place, so a
/// section whose chapter starts on an earlier page becomes a root of its own
/// unit. Kept nodes keep their relative order and nesting; pages are rebased
/// to `page - range.start` and depths count from the rebuilt roots. The input
/// is left untouched.
pub fn reroot(roots: &[BookmarkNode], range: PageRange) -> Vec<BookmarkNode> {
    reroot_level(roots, range, 0)
}

fn reroot_level(nodes: &[BookmarkNode], range: PageRange, depth: usize) -> Vec<BookmarkNode> {
    let mut rebuilt = Vec::new();

    for node in nodes {
        if range.contains(node.page) {
            rebuilt.push(BookmarkNode {
                title: node.title.clone(),
                page: node.page - range.start,
                depth,
                children: reroot_level(&node.children, range, depth + 1),
            });
        } else {
            rebuilt.extend(reroot_level(&node.children, range, depth));
        }
    }

    rebuilt
}
