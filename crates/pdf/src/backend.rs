use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::PdfError;

/// Upper bound on reference chains followed by [`LopdfBackend::resolve`].
const MAX_REFERENCE_HOPS: usize = 16;

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Best-effort decoding of raw PDF string bytes into a Rust `String`.
///
/// Handles three cases in order:
/// 1. UTF-16BE with BOM (`\xFE\xFF` prefix) -- strips BOM and decodes.
/// 2. Valid UTF-8 -- returned as-is.
/// 3. Fallback to Latin-1 (ISO 8859-1) -- each byte mapped to its Unicode
///    code point.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let code_units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return String::from_utf16_lossy(&code_units);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1 (PDFDocEncoding for the printable range).
    bytes.iter().map(|&b| b as char).collect()
}

/// Decode a bookmark title: text decoding and NFC normalization.
///
/// Line breaks and tabs become a single space; other control characters
/// (trailing NULs and the like) are dropped. The result is trimmed.
pub fn decode_title(bytes: &[u8]) -> String {
    let mut title = String::new();
    let mut in_break = false;

    for c in decode_text_simple(bytes).nfc() {
        if c.is_control() && c.is_whitespace() {
            if !in_break {
                title.push(' ');
            }
            in_break = true;
        } else if !c.is_control() {
            title.push(c);
            in_break = false;
        }
    }

    title.trim().to_string()
}

/// Encode `text` as a PDF text string: literal for ASCII, UTF-16BE with BOM
/// otherwise.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), lopdf::StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, lopdf::StringFormat::Hexadecimal)
}

// ---------------------------------------------------------------------------
// LopdfBackend
// ---------------------------------------------------------------------------

/// A loaded source document plus the lookups the splitter needs.
pub struct LopdfBackend {
    doc: Document,
    /// Page object id -> 0-based page index.
    page_index: HashMap<ObjectId, usize>,
}

impl LopdfBackend {
    /// Parse a PDF from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: Document) -> Result<Self, PdfError> {
        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let page_index = doc
            .get_pages()
            .into_values()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        Ok(Self { doc, page_index })
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &Document {
        &self.doc
    }

    /// Total number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_index.len()
    }

    /// 0-based index of the page object `id`, if it is a page of this document.
    pub fn page_index_of(&self, id: ObjectId) -> Option<usize> {
        self.page_index.get(&id).copied()
    }

    /// Follow references until a direct object is reached.
    ///
    /// Returns `None` for dangling references and overly long chains.
    pub fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_HOPS {
            match current {
                Object::Reference(id) => current = self.doc.get_object(*id).ok()?,
                other => return Some(other),
            }
        }
        None
    }

    /// Look up `key` in `dict` and resolve it to a dictionary.
    pub fn dict_entry<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
        let obj = dict.get(key).ok()?;
        self.resolve(obj)?.as_dict().ok()
    }

    /// The document catalog, if the trailer points to one.
    pub fn catalog(&self) -> Option<&Dictionary> {
        let root = self.doc.trailer.get(b"Root").ok()?;
        self.resolve(root)?.as_dict().ok()
    }

    /// Extract metadata from the PDF trailer's Info dictionary.
    ///
    /// Returns a `BTreeMap` of keys such as `"Title"`, `"Author"`,
    /// `"Creator"`, `"Producer"` and `"Subject"`.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut meta = BTreeMap::new();

        let info_dict = match self.dict_entry(&self.doc.trailer, b"Info") {
            Some(dict) => dict,
            None => return meta,
        };

        let keys: &[&[u8]] = &[b"Title", b"Author", b"Creator", b"Producer", b"Subject"];

        for key in keys {
            let value = match info_dict.get(key).ok().and_then(|obj| self.resolve(obj)) {
                Some(Object::String(bytes, _)) => decode_title(bytes),
                Some(Object::Name(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
                _ => continue,
            };
            meta.insert(String::from_utf8_lossy(key).into_owned(), value);
        }

        meta
    }
}
