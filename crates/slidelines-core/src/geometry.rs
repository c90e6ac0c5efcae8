//! Page box geometry and inherited page attributes

use crate::error::{Result, SlidelinesError};
use lopdf::{Document, Object, ObjectId};

/// Maximum depth when walking a page's `/Parent` chain.
///
/// Malformed files can contain parent cycles.
const MAX_TREE_DEPTH: usize = 32;

/// Rectangle of a page, given by its lower-left and upper-right corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl PageBox {
    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }

    fn from_array(arr: &[Object]) -> Option<Self> {
        if arr.len() != 4 {
            return None;
        }
        Some(Self {
            llx: as_f64(&arr[0])?,
            lly: as_f64(&arr[1])?,
            urx: as_f64(&arr[2])?,
            ury: as_f64(&arr[3])?,
        })
    }
}

fn as_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Read the MediaBox of a page, following indirect references and the
/// `/Parent` chain for inherited values
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox").ok_or_else(|| {
        SlidelinesError::InvalidDocument(format!(
            "page {} {} has no MediaBox",
            page_id.0, page_id.1
        ))
    })?;

    let resolved = match media_box {
        Object::Reference(id) => doc.get_object(id).ok().cloned(),
        other => Some(other),
    };

    match resolved {
        Some(Object::Array(arr)) => PageBox::from_array(&arr).ok_or_else(|| {
            SlidelinesError::InvalidDocument(format!(
                "page {} {} has a malformed MediaBox",
                page_id.0, page_id.1
            ))
        }),
        _ => Err(SlidelinesError::InvalidDocument(format!(
            "page {} {} MediaBox is not an array",
            page_id.0, page_id.1
        ))),
    }
}

/// Look up `key` on a page dictionary, falling back to its ancestors in the
/// page tree. The raw value is returned; references are not resolved.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        match current.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                current = doc.get_object(*parent_id).ok()?.as_dict().ok()?;
            }
            _ => return None,
        }
    }

    None
}
