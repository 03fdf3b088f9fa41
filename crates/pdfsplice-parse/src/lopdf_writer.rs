//! Output document assembly on top of lopdf.
//!
//! [`LopdfWriter`] owns a fresh [`lopdf::Document`] with a single flat page
//! tree. Pages are appended from any number of source documents; every
//! object a page reaches (content streams, fonts, images, ...) is copied
//! into the output under a new object id.

use std::collections::HashMap;
use std::io::Write;

use lopdf::{Dictionary, Object, ObjectId, dictionary};
use pdfsplice_core::WriteOptions;

use crate::error::BackendError;
use crate::lopdf_backend::{LopdfDocument, LopdfPage, resolve_inherited};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// An output PDF under construction.
pub struct LopdfWriter {
    inner: lopdf::Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    /// Objects already copied, keyed by (source document id, source object id).
    imported: HashMap<(u64, ObjectId), ObjectId>,
    compress: bool,
}

impl std::fmt::Debug for LopdfWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfWriter")
            .field("page_count", &self.kids.len())
            .field("objects", &self.inner.objects.len())
            .finish_non_exhaustive()
    }
}

impl LopdfWriter {
    /// Create an empty document with a catalog and an empty page tree.
    pub fn new(options: &WriteOptions) -> Self {
        let mut inner = lopdf::Document::with_version(options.version.as_str());
        let pages_id = inner.new_object_id();
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut writer = Self {
            inner,
            pages_id,
            kids: Vec::new(),
            imported: HashMap::new(),
            compress: options.compress,
        };
        writer.refresh_page_tree();
        writer
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append a copy of `page` from `source`.
    ///
    /// The page dictionary is always a new object, so the same source page
    /// can be appended more than once. Objects it references are copied once
    /// per source document and shared between pages.
    pub fn add_page(
        &mut self,
        source: &LopdfDocument,
        page: &LopdfPage,
    ) -> Result<(), BackendError> {
        let doc = source.inner();
        let page_dict = doc
            .get_object(page.object_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| {
                BackendError::Write(format!(
                    "page {} is not a dictionary: {e}",
                    page.index
                ))
            })?;

        // Resolved before anything is imported so a broken page tree leaves
        // the output untouched.
        let mut inherited = Vec::new();
        for key in INHERITABLE_KEYS {
            if page_dict.has(key) {
                continue;
            }
            if let Some(value) = resolve_inherited(doc, page.object_id, key)? {
                inherited.push((key, value));
            }
        }

        let mut copy = Dictionary::new();
        for (key, value) in page_dict.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            let value = self.import_value(source, value)?;
            copy.set(key.clone(), value);
        }
        for (key, value) in inherited {
            let value = self.import_value(source, value)?;
            copy.set(key, value);
        }
        copy.set("Parent", self.pages_id);

        let page_id = self.inner.add_object(copy);
        self.kids.push(page_id);
        if source.version() > self.inner.version.as_str() {
            self.inner.version = source.version().to_string();
        }
        tracing::trace!(
            source = source.id(),
            index = page.index,
            output_index = self.kids.len() - 1,
            "appended page"
        );
        Ok(())
    }

    /// Serialize the document to `out`.
    pub fn save_to<W: Write>(&mut self, out: &mut W) -> Result<(), BackendError> {
        self.refresh_page_tree();
        if self.compress {
            self.inner.compress();
        }
        self.inner
            .save_to(out)
            .map_err(|e| BackendError::Write(format!("failed to save PDF: {e}")))?;
        tracing::debug!(
            pages = self.kids.len(),
            objects = self.inner.objects.len(),
            "saved PDF"
        );
        Ok(())
    }

    fn refresh_page_tree(&mut self) {
        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.kids.len() as i64,
            }),
        );
    }

    /// Copy the source object `id` and everything it references.
    fn import_object(
        &mut self,
        source: &LopdfDocument,
        id: ObjectId,
    ) -> Result<ObjectId, BackendError> {
        let key = (source.id(), id);
        if let Some(&mapped) = self.imported.get(&key) {
            return Ok(mapped);
        }

        // Registered before recursing so reference cycles terminate.
        let new_id = self.inner.new_object_id();
        self.imported.insert(key, new_id);

        let object = match source.inner().get_object(id) {
            Ok(object) => self.import_value(source, object)?,
            Err(e) => {
                tracing::warn!(object = ?id, error = %e, "dangling reference replaced with null");
                Object::Null
            }
        };
        self.inner.objects.insert(new_id, object);
        Ok(new_id)
    }

    /// Deep-copy `value`, rewriting references into the output document.
    fn import_value(
        &mut self,
        source: &LopdfDocument,
        value: &Object,
    ) -> Result<Object, BackendError> {
        Ok(match value {
            Object::Reference(id) => {
                if is_page_tree_node(source.inner(), *id) {
                    Object::Null
                } else {
                    Object::Reference(self.import_object(source, *id)?)
                }
            }
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.import_value(source, item))
                    .collect::<Result<_, _>>()?,
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.import_dictionary(source, dict)?),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.import_dictionary(source, &stream.dict)?;
                Object::Stream(copy)
            }
            other => other.clone(),
        })
    }

    fn import_dictionary(
        &mut self,
        source: &LopdfDocument,
        dict: &Dictionary,
    ) -> Result<Dictionary, BackendError> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            let value = self.import_value(source, value)?;
            copy.set(key.clone(), value);
        }
        Ok(copy)
    }
}

/// Whether `id` names a `/Page` or `/Pages` node.
///
/// Such references (annotation back-links, link destinations) would drag
/// other pages of the source into the output, so they are not followed.
fn is_page_tree_node(doc: &lopdf::Document, id: ObjectId) -> bool {
    doc.get_object(id)
        .and_then(|o| o.type_name())
        .is_ok_and(|name| name == b"Page" || name == b"Pages")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PdfBackend;
    use crate::lopdf_backend::{LopdfBackend, create_test_pdf, create_test_pdf_cyclic_parent};

    fn write(writer: &mut LopdfWriter) -> LopdfDocument {
        let mut buf = Vec::new();
        writer.save_to(&mut buf).unwrap();
        LopdfBackend::open(&buf).unwrap()
    }

    fn texts(doc: &LopdfDocument) -> Vec<String> {
        (0..LopdfBackend::page_count(doc))
            .map(|i| {
                let page = LopdfBackend::get_page(doc, i).unwrap();
                LopdfBackend::page_text(doc, &page).unwrap()
            })
            .collect()
    }

    fn append(writer: &mut LopdfWriter, doc: &LopdfDocument, index: usize) {
        let page = LopdfBackend::get_page(doc, index).unwrap();
        writer.add_page(doc, &page).unwrap();
    }

    /// A PDF whose single page inherits MediaBox, Resources, and Rotate
    /// from its parent /Pages node.
    fn create_test_pdf_inherited() -> Vec<u8> {
        use lopdf::{Document, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            b"BT /F1 12 Tf 72 700 Td (inherited) Tj ET".to_vec(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1i64,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Rotate" => 90i64,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn new_writer_is_empty_document() {
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        assert_eq!(writer.page_count(), 0);
        let doc = write(&mut writer);
        assert_eq!(LopdfBackend::page_count(&doc), 0);
    }

    #[test]
    fn copies_pages_in_order() {
        let source = LopdfBackend::open(&create_test_pdf(&["a", "b", "c"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        append(&mut writer, &source, 2);
        append(&mut writer, &source, 0);
        assert_eq!(writer.page_count(), 2);
        assert_eq!(texts(&write(&mut writer)), vec!["c", "a"]);
    }

    #[test]
    fn copies_pages_from_two_documents() {
        let left = LopdfBackend::open(&create_test_pdf(&["l0", "l1"])).unwrap();
        let right = LopdfBackend::open(&create_test_pdf(&["r0", "r1"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::uncompressed());
        append(&mut writer, &right, 0);
        append(&mut writer, &left, 1);
        append(&mut writer, &right, 1);
        assert_eq!(texts(&write(&mut writer)), vec!["r0", "l1", "r1"]);
    }

    #[test]
    fn same_page_twice_gets_distinct_page_objects() {
        let source = LopdfBackend::open(&create_test_pdf(&["a"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        append(&mut writer, &source, 0);
        append(&mut writer, &source, 0);
        let out = write(&mut writer);
        let first = LopdfBackend::get_page(&out, 0).unwrap();
        let second = LopdfBackend::get_page(&out, 1).unwrap();
        assert_ne!(first.object_id, second.object_id);
        assert_eq!(texts(&out), vec!["a", "a"]);
    }

    #[test]
    fn shared_font_copied_once() {
        let source = LopdfBackend::open(&create_test_pdf(&["a", "b", "c"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::uncompressed());
        for i in 0..3 {
            append(&mut writer, &source, i);
        }
        let fonts = writer
            .inner()
            .objects
            .values()
            .filter(|o| o.type_name().is_ok_and(|name| name == b"Font"))
            .count();
        assert_eq!(fonts, 1);
    }

    #[test]
    fn flattens_inherited_attributes() {
        let source = LopdfBackend::open(&create_test_pdf_inherited()).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        append(&mut writer, &source, 0);
        let out = write(&mut writer);

        let page = LopdfBackend::get_page(&out, 0).unwrap();
        let dict = out
            .inner()
            .get_object(page.object_id)
            .and_then(|o| o.as_dict())
            .unwrap();
        assert!(dict.has(b"MediaBox"));
        assert!(dict.has(b"Resources"));
        assert_eq!(dict.get(b"Rotate").and_then(|o| o.as_i64()).unwrap(), 90);
        assert!(!dict.has(b"CropBox"));
        assert_eq!(texts(&out), vec!["inherited"]);
    }

    #[test]
    fn page_parent_points_at_output_tree() {
        let source = LopdfBackend::open(&create_test_pdf(&["a"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        append(&mut writer, &source, 0);
        let page_id = writer.kids[0];
        let parent = writer
            .inner()
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .and_then(|d| d.get(b"Parent"))
            .and_then(|p| p.as_reference())
            .unwrap();
        assert_eq!(parent, writer.pages_id);
    }

    #[test]
    fn output_version_follows_newest_source() {
        let source = LopdfBackend::open(&create_test_pdf(&["a"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions {
            compress: true,
            version: "1.4".to_string(),
        });
        append(&mut writer, &source, 0);
        assert_eq!(write(&mut writer).version(), "1.5");
    }

    #[test]
    fn page_tree_references_become_null() {
        let source = LopdfBackend::open(&create_test_pdf(&["a", "b"])).unwrap();
        let other_page = LopdfBackend::get_page(&source, 1).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        let copied = writer
            .import_value(&source, &Object::Reference(other_page.object_id))
            .unwrap();
        assert!(matches!(copied, Object::Null));
    }

    #[test]
    fn dangling_reference_becomes_null_object() {
        let source = LopdfBackend::open(&create_test_pdf(&["a"])).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());
        let copied = writer
            .import_value(&source, &Object::Reference((9999, 0)))
            .unwrap();
        let id = copied.as_reference().unwrap();
        assert!(matches!(writer.inner().get_object(id), Ok(Object::Null)));
    }

    #[test]
    fn cyclic_parent_chain_is_rejected() {
        let source = LopdfBackend::open(&create_test_pdf_cyclic_parent()).unwrap();
        let page = LopdfBackend::get_page(&source, 0).unwrap();
        let mut writer = LopdfWriter::new(&WriteOptions::default());

        let err = writer.add_page(&source, &page).unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)), "got {err:?}");
        assert_eq!(writer.page_count(), 0);
        assert_eq!(writer.inner().objects.len(), 2);
    }
}
