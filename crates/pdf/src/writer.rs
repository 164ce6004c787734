//! Building split documents.
//!
//! A split document is the source document with every page outside the
//! unit's range removed, the source outline dropped, and the unit's re-rooted
//! outline attached in its place.

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfsplit_core::{BookmarkNode, PageRange, SplitUnit};

use crate::backend::encode_text_string;
use crate::PdfError;

/// Copy the pages of `unit.range` out of `source` and attach `unit.outline`.
pub fn extract_unit(source: &Document, unit: &SplitUnit) -> Result<Document, PdfError> {
    let mut doc = extract_pages(source, unit.range)?;
    attach_outline(&mut doc, &unit.outline)?;
    Ok(doc)
}

/// A copy of `source` holding only the pages in `range`, in source order.
pub fn extract_pages(source: &Document, range: PageRange) -> Result<Document, PdfError> {
    let mut doc = source.clone();

    // The source outline points at pages that are about to disappear.
    catalog_mut(&mut doc)?.remove(b"Outlines");

    let total = doc.get_pages().len();
    if range.end > total {
        return Err(PdfError::Parse(format!(
            "page range {} exceeds the document's {} pages",
            range, total
        )));
    }

    // lopdf numbers pages from 1.
    let to_delete: Vec<u32> = (0..total)
        .filter(|index| !range.contains(*index))
        .map(|index| index as u32 + 1)
        .collect();
    doc.delete_pages(&to_delete);
    doc.prune_objects();

    Ok(doc)
}

/// Attach `roots` as the document outline, replacing any existing one.
///
/// Every bookmark points at its page with a `/Fit` destination. All items are
/// written open, so `/Count` holds the number of descendants.
pub fn attach_outline(doc: &mut Document, roots: &[BookmarkNode]) -> Result<(), PdfError> {
    if roots.is_empty() {
        catalog_mut(doc)?.remove(b"Outlines");
        return Ok(());
    }

    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let outlines_id = doc.new_object_id();
    let (first, last, count) = write_items(doc, roots, outlines_id, &pages)?;

    let outlines = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Outlines".to_vec())),
        ("First", Object::Reference(first)),
        ("Last", Object::Reference(last)),
        ("Count", Object::Integer(count)),
    ]);
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));
    catalog_mut(doc)?.set("Outlines", Object::Reference(outlines_id));

    Ok(())
}

/// Write one sibling list. Returns its first and last item ids and the
/// number of items in the whole list, descendants included.
fn write_items(
    doc: &mut Document,
    nodes: &[BookmarkNode],
    parent: ObjectId,
    pages: &[ObjectId],
) -> Result<(ObjectId, ObjectId, i64), PdfError> {
    let ids: Vec<ObjectId> = nodes.iter().map(|_| doc.new_object_id()).collect();
    let mut count = 0;

    for (i, node) in nodes.iter().enumerate() {
        let page = pages.get(node.page).ok_or_else(|| {
            PdfError::Parse(format!(
                "bookmark '{}' points at page {}, but the document has {} pages",
                node.title,
                node.page,
                pages.len()
            ))
        })?;

        let mut dict = Dictionary::new();
        dict.set("Title", encode_text_string(&node.title));
        dict.set("Parent", Object::Reference(parent));
        dict.set(
            "Dest",
            Object::Array(vec![Object::Reference(*page), Object::Name(b"Fit".to_vec())]),
        );
        if i > 0 {
            dict.set("Prev", Object::Reference(ids[i - 1]));
        }
        if let Some(next) = ids.get(i + 1) {
            dict.set("Next", Object::Reference(*next));
        }

        if !node.children.is_empty() {
            let (first, last, descendants) = write_items(doc, &node.children, ids[i], pages)?;
            dict.set("First", Object::Reference(first));
            dict.set("Last", Object::Reference(last));
            dict.set("Count", Object::Integer(descendants));
            count += descendants;
        }

        count += 1;
        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    Ok((ids[0], ids[ids.len() - 1], count))
}

fn catalog_mut(doc: &mut Document) -> Result<&mut Dictionary, PdfError> {
    let root = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| PdfError::Parse(format!("missing catalog reference: {}", e)))?;
    doc.get_object_mut(root)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfError::Parse(format!("unreadable catalog: {}", e)))
}

/// Compress and serialize a document.
pub fn to_bytes(doc: &mut Document) -> Result<Vec<u8>, lopdf::Error> {
    doc.compress();
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
