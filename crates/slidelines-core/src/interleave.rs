//! Page interleaving
//!
//! Builds a new document in which every original page is followed by a
//! ruled page.
//!
//! The algorithm:
//! 1. Collect the source page references in reading order
//! 2. Clone the source so the caller's document is untouched
//! 3. For each page:
//!    a. Copy inherited attributes onto the page and re-parent it under the root `/Pages`
//!    b. Append a ruled page whose content stream is shared per template
//! 4. Rewrite the root page tree as a flat `Kids` array and prune orphans

use crate::error::{Result, SlidelinesError};
use crate::geometry::{inherited_attribute, page_box, PageBox};
use crate::layout::LayoutParams;
use crate::synth::{synthesize_ruled_page, RuledPage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// How inserted ruled pages are sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateSizing {
    /// One template sized from the first page, reused after every page
    #[default]
    FirstPage,
    /// Each ruled page matches the page it follows
    PerPage,
}

/// Ruled page templates already written into the output document
struct TemplateCache<'a> {
    params: &'a LayoutParams,
    entries: Vec<(RuledPage, ObjectId)>,
}

impl<'a> TemplateCache<'a> {
    fn new(params: &'a LayoutParams) -> Self {
        Self {
            params,
            entries: Vec::new(),
        }
    }

    /// Return the template for this geometry, synthesizing and storing its
    /// content stream the first time it is seen
    fn get_or_insert(
        &mut self,
        doc: &mut Document,
        geometry: &PageBox,
    ) -> Result<(&RuledPage, ObjectId)> {
        let (width, height) = (geometry.width(), geometry.height());
        let index = match self
            .entries
            .iter()
            .position(|(page, _)| page.width() == width && page.height() == height)
        {
            Some(index) => index,
            None => {
                let page = synthesize_ruled_page(width, height, self.params)?;
                let content_id = doc.add_object(page.content_stream()?);
                debug!(width, height, lines = page.lines().len(), "new ruled template");
                self.entries.push((page, content_id));
                self.entries.len() - 1
            }
        };
        let (page, content_id) = &self.entries[index];
        Ok((page, *content_id))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Insert a ruled page after every page of `input`.
///
/// The result has twice as many pages as `input`, alternating original and
/// ruled pages and starting with an original. With
/// [`TemplateSizing::FirstPage`] every ruled page takes the first page's
/// MediaBox dimensions, even after pages of a different size.
#[instrument(skip(input, params))]
pub fn interleave_ruled_pages(
    input: &Document,
    params: &LayoutParams,
    sizing: TemplateSizing,
) -> Result<Document> {
    let source_pages: Vec<ObjectId> = input.get_pages().values().copied().collect();
    let first_page = *source_pages
        .first()
        .ok_or_else(|| SlidelinesError::InvalidDocument("document has no pages".into()))?;

    let first_box = page_box(input, first_page)?;

    let mut doc = input.clone();
    let pages_id = root_pages_id(&doc)?;
    let mut templates = TemplateCache::new(params);
    let mut page_refs = Vec::with_capacity(source_pages.len() * 2);

    for page_id in source_pages.iter().copied() {
        let geometry = match sizing {
            TemplateSizing::FirstPage => first_box,
            TemplateSizing::PerPage => page_box(&doc, page_id)?,
        };

        reparent_page(&mut doc, page_id, pages_id)?;
        page_refs.push(page_id);

        let (template, content_id) = templates.get_or_insert(&mut doc, &geometry)?;
        let ruled_page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", template.media_box()),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_refs.push(doc.add_object(ruled_page));
    }

    update_page_tree(&mut doc, pages_id, page_refs)?;
    doc.prune_objects();

    info!(
        source_pages = source_pages.len(),
        output_pages = source_pages.len() * 2,
        templates = templates.len(),
        "interleaved ruled pages"
    );

    Ok(doc)
}

/// Find the root `/Pages` node through the trailer and catalog
fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    let root_obj = doc
        .trailer
        .get(b"Root")
        .map_err(|_| SlidelinesError::InvalidDocument("No Root in trailer".into()))?;

    let catalog_id = root_obj
        .as_reference()
        .map_err(|_| SlidelinesError::InvalidDocument("Root is not a reference".into()))?;

    let catalog = doc
        .objects
        .get(&catalog_id)
        .ok_or_else(|| SlidelinesError::InvalidDocument("Catalog not found".into()))?
        .as_dict()
        .map_err(|_| SlidelinesError::InvalidDocument("Invalid catalog".into()))?;

    catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| SlidelinesError::InvalidDocument("Pages is not a reference".into()))
}

/// Make `page_id` a direct child of the root page node.
///
/// Attributes the page inherited from intermediate nodes are copied onto
/// it first so that it renders the same once those nodes are gone.
fn reparent_page(doc: &mut Document, page_id: ObjectId, pages_id: ObjectId) -> Result<()> {
    let inherited: Vec<(&[u8], Object)> = {
        let page = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|_| SlidelinesError::InvalidDocument("page is not a dictionary".into()))?;
        INHERITABLE_KEYS
            .into_iter()
            .filter(|key| !page.has(key))
            .filter_map(|key| inherited_attribute(doc, page_id, key).map(|value| (key, value)))
            .collect()
    };

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|_| SlidelinesError::InvalidDocument("page is not a dictionary".into()))?;
    for (key, value) in inherited {
        page.set(key, value);
    }
    page.set("Parent", Object::Reference(pages_id));

    Ok(())
}

/// Replace the root page node's children with `page_refs`.
///
/// Inheritable attributes are dropped from the root since every original
/// page now carries its own copy and ruled pages must not pick them up.
fn update_page_tree(doc: &mut Document, pages_id: ObjectId, page_refs: Vec<ObjectId>) -> Result<()> {
    if let Some(Object::Dictionary(ref mut pages_dict)) = doc.objects.get_mut(&pages_id) {
        let kids = page_refs
            .iter()
            .map(|&id| Object::Reference(id))
            .collect::<Vec<_>>();
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_refs.len() as i64));
        for key in INHERITABLE_KEYS {
            pages_dict.remove(key);
        }
    } else {
        return Err(SlidelinesError::InvalidDocument(
            "Invalid pages dictionary".into(),
        ));
    }

    Ok(())
}
