use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many outline levels take part in splitting decisions.
///
/// `Depth(1)` splits on top-level bookmarks only, `Depth(2)` also splits on
/// their direct children, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Depth(u8);

impl Depth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth(2)
    }
}

impl TryFrom<u8> for Depth {
    type Error = InvalidDepth;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Depth(value))
        } else {
            Err(InvalidDepth(value))
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Depth must be between 1 and 5, got {0}")]
pub struct InvalidDepth(pub u8);

/// Parameters the caller hands to the splitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOptions {
    pub max_depth: Depth,
    /// Prefix every output name with a two-digit, 1-based sequence number.
    pub add_index: bool,
}

/// One bookmark of the full outline tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub title: String,
    /// 0-based page index.
    pub page: usize,
    /// 0 for top-level bookmarks.
    pub depth: usize,
    pub children: Vec<BookmarkNode>,
}

impl BookmarkNode {
    pub fn new(title: impl Into<String>, page: usize, depth: usize) -> Self {
        BookmarkNode {
            title: title.into(),
            page,
            depth,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + count_nodes(&self.children)
    }
}

/// Total number of nodes in a forest.
pub fn count_nodes(nodes: &[BookmarkNode]) -> usize {
    nodes.iter().map(BookmarkNode::node_count).sum()
}

/// An entry of the depth-limited list that drives range computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatBookmark {
    pub title: String,
    pub safe_title: String,
    pub page: usize,
    pub depth: usize,
}

/// Result of the tree builder.
///
/// `flat` lists bookmarks in outline order, which is assumed (and later
/// validated) to match page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineTree {
    pub roots: Vec<BookmarkNode>,
    pub flat: Vec<FlatBookmark>,
}

impl OutlineTree {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn bookmark_count(&self) -> usize {
        count_nodes(&self.roots)
    }
}

/// Half-open page interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    pub fn new(start: usize, end: usize) -> Self {
        PageRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, page: usize) -> bool {
        (self.start..self.end).contains(&page)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Everything needed to materialize one output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitUnit {
    pub safe_title: String,
    pub file_name: String,
    pub range: PageRange,
    /// Bookmarks inside `range`, pages relative to `range.start`.
    pub outline: Vec<BookmarkNode>,
}
