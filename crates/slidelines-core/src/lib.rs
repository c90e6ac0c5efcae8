//! Insert ruled note-taking pages into PDF documents
//!
//! Every page of the input is followed by a page of evenly spaced horizontal
//! rules, giving room for handwritten notes next to printed slides.
//!
//! - [`synthesize_ruled_page`]: compute the rules for a page size and render them
//! - [`interleave_ruled_pages`]: build the output document from a parsed input
//! - [`add_ruled_pages`]: bytes in, bytes out

pub mod document;
pub mod error;
pub mod geometry;
pub mod interleave;
pub mod layout;
pub mod synth;

pub use document::{load_document, parse_document, save_document, write_document};
pub use error::{Result, SlidelinesError};
pub use geometry::{page_box, PageBox};
pub use interleave::{interleave_ruled_pages, TemplateSizing};
pub use layout::LayoutParams;
pub use synth::{synthesize_ruled_page, RuleLine, RuledPage};

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32> {
    let doc = parse_document(bytes)?;
    Ok(doc.get_pages().len() as u32)
}

/// Parse `bytes`, insert a ruled page after every page and serialize the result
pub fn add_ruled_pages(
    bytes: &[u8],
    params: &LayoutParams,
    sizing: TemplateSizing,
) -> Result<Vec<u8>> {
    let doc = parse_document(bytes)?;
    let mut output = interleave_ruled_pages(&doc, params, sizing)?;
    write_document(&mut output)
}
