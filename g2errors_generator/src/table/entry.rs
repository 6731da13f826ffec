use serde::Deserialize;

/// One row of the error table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Numeric error code (the table key)
    pub code: i64,
    /// Exception class name; `None` when absent or empty
    pub class: Option<String>,
    /// Short identifier
    pub name: Option<String>,
    /// Human-readable description
    pub comment: Option<String>,
}

impl ErrorEntry {
    pub fn new(code: i64, class: Option<&str>) -> Self {
        Self {
            code,
            class: class.filter(|c| !c.is_empty()).map(str::to_string),
            name: None,
            comment: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Whether this entry produces a line in the generated artifacts
    pub fn is_emittable(&self) -> bool {
        self.class.is_some()
    }

    /// Text for the trailing comment on the generated line, if any.
    ///
    /// `name - comment` when both are present, otherwise whichever one is.
    /// Control characters and invisible separators are folded into spaces so
    /// the comment stays on one line and parses as Go and Python source. A
    /// field that folds down to nothing counts as absent.
    pub fn trailing_comment(&self) -> Option<String> {
        let name = self.name.as_deref().and_then(fold_comment_text);
        let comment = self.comment.as_deref().and_then(fold_comment_text);

        match (name, comment) {
            (Some(name), Some(comment)) => Some(format!("{} - {}", name, comment)),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }
}

// NUL, BOM and line separators are rejected or misread by the Go and Python
// tokenizers
fn is_unsafe_in_comment(c: char) -> bool {
    c.is_control() || matches!(c, '\u{feff}' | '\u{2028}' | '\u{2029}')
}

fn fold_comment_text(text: &str) -> Option<String> {
    let folded = text
        .split(is_unsafe_in_comment)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if folded.is_empty() {
        None
    } else {
        Some(folded)
    }
}

/// Wire shape of a table value; unknown fields are ignored
#[derive(Debug, Deserialize)]
pub(crate) struct RawEntry {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// The loaded error table, in source key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTable {
    entries: Vec<ErrorEntry>,
}

impl ErrorTable {
    pub fn new(entries: Vec<ErrorEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Entries that carry a class, in source order
    pub fn emittable(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter().filter(|e| e.is_emittable())
    }

    /// Entries without a class; they produce no output line
    pub fn skipped(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter().filter(|e| !e.is_emittable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_comment_variants() {
        let both = ErrorEntry::new(1, Some("G2Error"))
            .with_name("Foo")
            .with_comment("Bar");
        assert_eq!(both.trailing_comment().as_deref(), Some("Foo - Bar"));

        let name_only = ErrorEntry::new(2, Some("G2Error")).with_name("Foo");
        assert_eq!(name_only.trailing_comment().as_deref(), Some("Foo"));

        let comment_only = ErrorEntry::new(3, Some("G2Error")).with_comment("Bar");
        assert_eq!(comment_only.trailing_comment().as_deref(), Some("Bar"));

        let neither = ErrorEntry::new(4, Some("G2Error"));
        assert_eq!(neither.trailing_comment(), None);
    }

    #[test]
    fn test_trailing_comment_folds_newlines() {
        let entry = ErrorEntry::new(5, Some("G2Error")).with_comment("line one\nline two\r\n");
        assert_eq!(
            entry.trailing_comment().as_deref(),
            Some("line one line two")
        );
    }

    #[test]
    fn test_trailing_comment_strips_unparseable_characters() {
        let nul = ErrorEntry::new(7, Some("G2ConfigurationError")).with_comment("x\u{0}y");
        assert_eq!(nul.trailing_comment().as_deref(), Some("x y"));

        let bom = ErrorEntry::new(8, Some("G2Error"))
            .with_name("\u{feff}Foo")
            .with_comment("tab\there\u{2028}next");
        assert_eq!(bom.trailing_comment().as_deref(), Some("Foo - tab here next"));

        let comment = bom.trailing_comment().unwrap();
        assert!(!comment.chars().any(is_unsafe_in_comment));
    }

    #[test]
    fn test_trailing_comment_blank_after_folding_is_absent() {
        let blank_name = ErrorEntry::new(5, Some("G2NotFoundError")).with_name("\n");
        assert_eq!(blank_name.trailing_comment(), None);

        let blank_comment = ErrorEntry::new(6, Some("G2NotFoundError"))
            .with_name("Foo")
            .with_comment(" \r\n\u{0} ");
        assert_eq!(blank_comment.trailing_comment().as_deref(), Some("Foo"));
    }

    #[test]
    fn test_empty_class_is_not_emittable() {
        assert!(!ErrorEntry::new(6, Some("")).is_emittable());
        assert!(!ErrorEntry::new(7, None).is_emittable());
        assert!(ErrorEntry::new(8, Some("G2Error")).is_emittable());
    }

    #[test]
    fn test_table_partitions_entries() {
        let table = ErrorTable::new(vec![
            ErrorEntry::new(1, Some("G2Error")),
            ErrorEntry::new(2, None),
            ErrorEntry::new(3, Some("G2NotFoundError")),
        ]);

        let emitted: Vec<i64> = table.emittable().map(|e| e.code).collect();
        let skipped: Vec<i64> = table.skipped().map(|e| e.code).collect();
        assert_eq!(emitted, vec![1, 3]);
        assert_eq!(skipped, vec![2]);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }
}
