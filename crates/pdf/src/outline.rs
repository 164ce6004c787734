//! Reading the document outline out of a `lopdf` document.
//!
//! The `/Outlines` tree is linked through `/First` and `/Next` references. It
//! is flattened here into the positional [`OutlineEntry`] sequence expected by
//! the core: every item is followed by an `OutlineEntry::Children` entry when
//! it has children of its own.

use std::collections::HashSet;

use lopdf::{Dictionary, Object, ObjectId};
use pdfsplit_core::{DestinationResolver, OutlineEntry, StructuralError};

use crate::backend::{decode_title, LopdfBackend};
use crate::PdfError;

/// Nesting limit; real outlines are far shallower.
const MAX_OUTLINE_DEPTH: usize = 64;

impl LopdfBackend {
    /// The raw outline of the document.
    ///
    /// A missing or unreadable `/Outlines` dictionary yields an empty
    /// outline. Broken items inside an existing outline are errors.
    pub fn raw_outline(&self) -> Result<Vec<OutlineEntry<ObjectId>>, PdfError> {
        let Some(catalog) = self.catalog() else {
            log::warn!("Document has no readable catalog; treating outline as empty");
            return Ok(Vec::new());
        };

        if !catalog.has(b"Outlines") {
            log::debug!("Document has no outline");
            return Ok(Vec::new());
        }

        let Some(outlines) = self.dict_entry(catalog, b"Outlines") else {
            log::warn!("/Outlines is not a dictionary; treating outline as empty");
            return Ok(Vec::new());
        };

        let first = match outlines.get(b"First") {
            Ok(Object::Reference(id)) => *id,
            _ => return Ok(Vec::new()),
        };

        let mut visited = HashSet::new();
        Ok(self.read_siblings(first, 0, &mut visited)?)
    }

    fn read_siblings(
        &self,
        first: ObjectId,
        level: usize,
        visited: &mut HashSet<ObjectId>,
    ) -> Result<Vec<OutlineEntry<ObjectId>>, StructuralError> {
        if level >= MAX_OUTLINE_DEPTH {
            return Err(StructuralError::MalformedOutline(format!(
                "outline is nested deeper than {} levels",
                MAX_OUTLINE_DEPTH
            )));
        }

        let mut entries = Vec::new();
        let mut current = Some(first);

        while let Some(id) = current {
            if !visited.insert(id) {
                return Err(StructuralError::MalformedOutline(format!(
                    "outline item {} {} R is linked more than once",
                    id.0, id.1
                )));
            }

            let dict = self.item_dict(id).map_err(StructuralError::MalformedOutline)?;
            entries.push(OutlineEntry::Item(id));

            if let Ok(Object::Reference(child)) = dict.get(b"First") {
                let children = self.read_siblings(*child, level + 1, visited)?;
                if !children.is_empty() {
                    entries.push(OutlineEntry::Children(children));
                }
            }

            current = match dict.get(b"Next") {
                Ok(Object::Reference(next)) => Some(*next),
                _ => None,
            };
        }

        Ok(entries)
    }

    fn item_dict(&self, id: ObjectId) -> Result<&Dictionary, String> {
        self.raw_doc()
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|e| format!("outline item {} {} R is unreadable: {}", id.0, id.1, e))
    }

    /// Turn a destination (explicit array, named destination or `/D`
    /// dictionary) into a 0-based page index.
    fn destination_page(&self, dest: &Object, hops: usize) -> Result<usize, String> {
        if hops > 8 {
            return Err("destination chain is too long".to_string());
        }

        let dest = self
            .resolve(dest)
            .ok_or_else(|| "destination is a dangling reference".to_string())?;

        match dest {
            Object::Array(parts) => match parts.first() {
                Some(Object::Reference(page)) => self.page_index_of(*page).ok_or_else(|| {
                    format!("destination object {} {} R is not a page", page.0, page.1)
                }),
                Some(Object::Integer(index)) => usize::try_from(*index)
                    .ok()
                    .filter(|i| *i < self.page_count())
                    .ok_or_else(|| format!("destination page index {} is out of range", index)),
                _ => Err("destination array does not start with a page".to_string()),
            },
            Object::Dictionary(dict) => {
                let inner = dict
                    .get(b"D")
                    .map_err(|_| "destination dictionary has no /D".to_string())?;
                self.destination_page(inner, hops + 1)
            }
            Object::String(name, _) | Object::Name(name) => {
                let target = self.named_destination(name).ok_or_else(|| {
                    format!(
                        "named destination '{}' is not defined",
                        String::from_utf8_lossy(name)
                    )
                })?;
                self.destination_page(target, hops + 1)
            }
            _ => Err("unsupported destination type".to_string()),
        }
    }

    /// Look `name` up in the catalog's `/Names /Dests` name tree, then in the
    /// older `/Dests` dictionary.
    fn named_destination(&self, name: &[u8]) -> Option<&Object> {
        let catalog = self.catalog()?;

        if let Some(tree) = self
            .dict_entry(catalog, b"Names")
            .and_then(|names| self.dict_entry(names, b"Dests"))
        {
            if let Some(found) = self.lookup_name_tree(tree, name, 0) {
                return Some(found);
            }
        }

        self.dict_entry(catalog, b"Dests")?.get(name).ok()
    }

    fn lookup_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        name: &[u8],
        level: usize,
    ) -> Option<&'a Object> {
        if level > MAX_OUTLINE_DEPTH {
            return None;
        }

        if let Some(Object::Array(pairs)) = node.get(b"Names").ok().and_then(|o| self.resolve(o)) {
            for pair in pairs.chunks_exact(2) {
                if let Some(Object::String(key, _)) = self.resolve(&pair[0]) {
                    if key.as_slice() == name {
                        return Some(&pair[1]);
                    }
                }
            }
        }

        if let Some(Object::Array(kids)) = node.get(b"Kids").ok().and_then(|o| self.resolve(o)) {
            for kid in kids {
                if let Some(Object::Dictionary(kid)) = self.resolve(kid) {
                    if let Some(found) = self.lookup_name_tree(kid, name, level + 1) {
                        return Some(found);
                    }
                }
            }
        }

        None
    }
}

impl DestinationResolver<ObjectId> for LopdfBackend {
    fn title(&self, item: &ObjectId) -> String {
        match self
            .item_dict(*item)
            .ok()
            .and_then(|dict| dict.get(b"Title").ok())
            .and_then(|obj| self.resolve(obj))
        {
            Some(Object::String(bytes, _)) => decode_title(bytes),
            _ => String::new(),
        }
    }

    fn resolve_page(&self, item: &ObjectId) -> Result<usize, String> {
        let dict = self.item_dict(*item)?;

        if let Ok(dest) = dict.get(b"Dest") {
            return self.destination_page(dest, 0);
        }

        if let Ok(action) = dict.get(b"A") {
            let action = self
                .resolve(action)
                .and_then(|a| a.as_dict().ok())
                .ok_or_else(|| "/A is not an action dictionary".to_string())?;
            return match action.get(b"S") {
                Ok(Object::Name(kind)) if kind.as_slice() == b"GoTo" => {
                    let dest = action
                        .get(b"D")
                        .map_err(|_| "GoTo action has no /D".to_string())?;
                    self.destination_page(dest, 0)
                }
                Ok(Object::Name(kind)) => Err(format!(
                    "action /{} does not point into this document",
                    String::from_utf8_lossy(kind)
                )),
                _ => Err("action has no /S type".to_string()),
            };
        }

        Err("bookmark has neither /Dest nor /A".to_string())
    }
}
