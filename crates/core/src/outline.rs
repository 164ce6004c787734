//! Outline tree builder.
//!
//! PDF libraries commonly expose an outline as a flat sequence in which a
//! nested list stands for the children of the item right before it:
//!
//! ```text
//! [Item(A), Children([Item(A.1), Item(A.2)]), Item(B)]
//! ```
//!
//! The parent/child relationship is positional, so the builder scans each
//! level with an explicit cursor and classifies every entry before consuming
//! it.

use crate::error::StructuralError;
use crate::naming::flat_title;
use crate::types::{BookmarkNode, FlatBookmark, OutlineTree, SplitOptions};

/// One position of a raw outline sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineEntry<T> {
    /// A bookmark, as an opaque handle of the PDF library.
    Item(T),
    /// Children of the `Item` immediately preceding this entry.
    Children(Vec<OutlineEntry<T>>),
}

/// Reads title and destination out of a library-specific bookmark handle.
pub trait DestinationResolver<T> {
    fn title(&self, item: &T) -> String;

    /// 0-based page index of the bookmark's destination, or the reason it
    /// cannot be determined.
    fn resolve_page(&self, item: &T) -> Result<usize, String>;
}

/// Build the full bookmark tree and the depth-limited flat list.
///
/// `flat` holds every node with `depth < options.max_depth` in pre-order.
/// Deeper nodes are only present in `roots`.
pub fn build_tree<T, R>(
    entries: &[OutlineEntry<T>],
    resolver: &R,
    options: &SplitOptions,
) -> Result<OutlineTree, StructuralError>
where
    R: DestinationResolver<T> + ?Sized,
{
    let roots = parse_level(entries, 0, resolver)?;

    let mut nodes = Vec::new();
    collect_flat(&roots, options.max_depth.as_usize(), &mut nodes);

    let flat = nodes
        .into_iter()
        .enumerate()
        .map(|(position, node)| FlatBookmark {
            title: node.title.clone(),
            safe_title: flat_title(&node.title, position, options.add_index),
            page: node.page,
            depth: node.depth,
        })
        .collect();

    Ok(OutlineTree { roots, flat })
}

fn parse_level<T, R>(
    entries: &[OutlineEntry<T>],
    depth: usize,
    resolver: &R,
) -> Result<Vec<BookmarkNode>, StructuralError>
where
    R: DestinationResolver<T> + ?Sized,
{
    let mut nodes = Vec::new();
    let mut cursor = 0;

    while cursor < entries.len() {
        let item = match &entries[cursor] {
            OutlineEntry::Item(item) => item,
            OutlineEntry::Children(_) => {
                return Err(StructuralError::OrphanChildList {
                    depth,
                    position: cursor,
                });
            }
        };

        let title = resolver.title(item);
        let page = resolver
            .resolve_page(item)
            .map_err(|reason| StructuralError::UnresolvedDestination {
                title: title.clone(),
                reason,
            })?;
        let mut node = BookmarkNode::new(title, page, depth);

        match entries.get(cursor + 1) {
            Some(OutlineEntry::Children(children)) => {
                node.children = parse_level(children, depth + 1, resolver)?;
                cursor += 2;
            }
            _ => cursor += 1,
        }

        nodes.push(node);
    }

    Ok(nodes)
}

fn collect_flat<'a>(nodes: &'a [BookmarkNode], max_depth: usize, out: &mut Vec<&'a BookmarkNode>) {
    for node in nodes {
        if node.depth >= max_depth {
            continue;
        }
        out.push(node);
        if node.depth + 1 < max_depth {
            collect_flat(&node.children, max_depth, out);
        }
    }
}
