//! Class-to-category mapping
//!
//! A class name such as `G2NotFoundError` resolves to an ordered tag list,
//! innermost first: `[G2NotFound, G2BadInput]`. Category classes resolve to
//! themselves and the root class `G2Error` resolves to `[G2Base]`.

mod error;
mod tag;

pub use error::CategoryError;
pub use tag::{sort_identifiers, CategoryTag};

use crate::table::ErrorEntry;
use std::fmt;

/// Suffix carried by every class name in the table
pub const CLASS_SUFFIX: &str = "Error";

/// Ordered tag list for one class, innermost first.
///
/// Never empty; the last tag is the only category tag in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagList(Vec<CategoryTag>);

impl TagList {
    fn for_tag(tag: CategoryTag) -> Self {
        match tag.implied_category() {
            Some(category) => TagList(vec![tag, category]),
            None => TagList(vec![tag]),
        }
    }

    pub fn tags(&self) -> &[CategoryTag] {
        &self.0
    }

    /// Most specific tag
    pub fn innermost(&self) -> CategoryTag {
        self.0[0]
    }

    /// Top-level category tag
    pub fn category(&self) -> CategoryTag {
        self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = CategoryTag> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag.go_ident())?;
        }
        Ok(())
    }
}

/// Resolve a class name to its tag list
pub fn classify(class_name: &str) -> Result<TagList, CategoryError> {
    let stem = class_name
        .strip_suffix(CLASS_SUFFIX)
        .unwrap_or(class_name);

    // the root class is `G2Error`, so its stem is bare `G2`
    let tag = if stem == "G2" {
        Some(CategoryTag::Base)
    } else {
        CategoryTag::ALL
            .into_iter()
            .filter(|tag| *tag != CategoryTag::Base)
            .find(|tag| tag.go_ident() == stem)
    };

    tag.map(TagList::for_tag)
        .ok_or_else(|| CategoryError::UnmappedClass {
            code: None,
            class: class_name.to_string(),
        })
}

/// Resolve an entry's class; `Ok(None)` for entries without a class
pub fn classify_entry(entry: &ErrorEntry) -> Result<Option<TagList>, CategoryError> {
    match entry.class.as_deref() {
        Some(class) => classify(class)
            .map(Some)
            .map_err(|e| e.with_code(entry.code)),
        None => Ok(None),
    }
}
