//! In-memory PDF fixtures for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdfsplit_core::BookmarkNode;

use crate::writer::attach_outline;

/// Marker drawn on source page `index`, used to check which pages ended up
/// in a split output.
pub fn page_marker(index: usize) -> String {
    format!("[p{}]", index)
}

/// Create a document with `num_pages` pages and no outline.
pub fn build_document(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();

    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new("Tj", vec![Object::string_literal(page_marker(i))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("content encodes"),
        ));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

/// Serialize a document to bytes.
pub fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("document saves");
    buffer
}

/// Create a PDF with `num_pages` pages and the given outline.
pub fn build_pdf(num_pages: usize, outline: &[BookmarkNode]) -> Vec<u8> {
    let mut doc = build_document(num_pages);
    attach_outline(&mut doc, outline).expect("outline attaches");
    to_bytes(&mut doc)
}

/// Bookmark helper: `mark("Title", page, depth, children)`.
pub fn mark(title: &str, page: usize, depth: usize, children: Vec<BookmarkNode>) -> BookmarkNode {
    BookmarkNode {
        title: title.to_string(),
        page,
        depth,
        children,
    }
}

/// Object id of the `index`-th (0-based) page.
pub fn page_id(doc: &Document, index: usize) -> ObjectId {
    doc.get_pages()[&(index as u32 + 1)]
}

/// Object id of the catalog.
pub fn catalog_id(doc: &Document) -> ObjectId {
    doc.trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .expect("catalog reference")
}

/// Object id of the first top-level outline item.
pub fn first_outline_item(doc: &Document) -> ObjectId {
    let catalog = doc.get_dictionary(catalog_id(doc)).expect("catalog");
    let outlines = catalog
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .expect("outline root");
    doc.get_dictionary(outlines)
        .and_then(|d| d.get(b"First"))
        .and_then(Object::as_reference)
        .expect("first outline item")
}

/// Whether the content of output page `index` carries `marker`.
pub fn page_has_marker(doc: &Document, index: usize, marker: &str) -> bool {
    let content = doc
        .get_page_content(page_id(doc, index))
        .expect("page content");
    content
        .windows(marker.len())
        .any(|window| window == marker.as_bytes())
}
