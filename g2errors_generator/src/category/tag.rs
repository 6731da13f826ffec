use std::fmt;

/// Closed set of G2 error category tags.
///
/// Declaration order is the order of the Go `iota` constants; footers use
/// [`CategoryTag::FOOTER_ORDER`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryTag {
    Base,
    BadInput,
    Configuration,
    Database,
    DatabaseConnectionLost,
    License,
    NotFound,
    NotInitialized,
    Retryable,
    RetryTimeoutExceeded,
    Unhandled,
    UnknownDatasource,
    Unrecoverable,
}

impl CategoryTag {
    /// Every tag in declaration (`iota`) order
    pub const ALL: [CategoryTag; 13] = [
        CategoryTag::Base,
        CategoryTag::BadInput,
        CategoryTag::Configuration,
        CategoryTag::Database,
        CategoryTag::DatabaseConnectionLost,
        CategoryTag::License,
        CategoryTag::NotFound,
        CategoryTag::NotInitialized,
        CategoryTag::Retryable,
        CategoryTag::RetryTimeoutExceeded,
        CategoryTag::Unhandled,
        CategoryTag::UnknownDatasource,
        CategoryTag::Unrecoverable,
    ];

    /// Every tag, alphabetical by identifier ignoring case
    pub const FOOTER_ORDER: [CategoryTag; 13] = [
        CategoryTag::BadInput,
        CategoryTag::Base,
        CategoryTag::Configuration,
        CategoryTag::Database,
        CategoryTag::DatabaseConnectionLost,
        CategoryTag::License,
        CategoryTag::NotFound,
        CategoryTag::NotInitialized,
        CategoryTag::Retryable,
        CategoryTag::RetryTimeoutExceeded,
        CategoryTag::Unhandled,
        CategoryTag::UnknownDatasource,
        CategoryTag::Unrecoverable,
    ];

    /// Go constant identifier, e.g. `G2NotFound`
    pub fn go_ident(self) -> &'static str {
        match self {
            CategoryTag::Base => "G2Base",
            CategoryTag::BadInput => "G2BadInput",
            CategoryTag::Configuration => "G2Configuration",
            CategoryTag::Database => "G2Database",
            CategoryTag::DatabaseConnectionLost => "G2DatabaseConnectionLost",
            CategoryTag::License => "G2License",
            CategoryTag::NotFound => "G2NotFound",
            CategoryTag::NotInitialized => "G2NotInitialized",
            CategoryTag::Retryable => "G2Retryable",
            CategoryTag::RetryTimeoutExceeded => "G2RetryTimeoutExceeded",
            CategoryTag::Unhandled => "G2Unhandled",
            CategoryTag::UnknownDatasource => "G2UnknownDatasource",
            CategoryTag::Unrecoverable => "G2Unrecoverable",
        }
    }

    /// Go wrapper struct name, e.g. `G2NotFoundError`
    pub fn go_struct(self) -> String {
        format!("{}Error", self.go_ident())
    }

    /// Error class name as used in the table and the Python module.
    ///
    /// The root class is `G2Error`; every other class is the Go identifier
    /// with an `Error` suffix.
    pub fn python_class(self) -> String {
        match self {
            CategoryTag::Base => "G2Error".to_string(),
            other => other.go_struct(),
        }
    }

    /// Category this detail tag rolls up into; `None` for category tags
    pub fn implied_category(self) -> Option<CategoryTag> {
        match self {
            CategoryTag::NotFound | CategoryTag::UnknownDatasource => Some(CategoryTag::BadInput),
            CategoryTag::DatabaseConnectionLost | CategoryTag::RetryTimeoutExceeded => {
                Some(CategoryTag::Retryable)
            }
            CategoryTag::Database
            | CategoryTag::License
            | CategoryTag::NotInitialized
            | CategoryTag::Unhandled => Some(CategoryTag::Unrecoverable),
            CategoryTag::Base
            | CategoryTag::BadInput
            | CategoryTag::Configuration
            | CategoryTag::Retryable
            | CategoryTag::Unrecoverable => None,
        }
    }

    /// Whether this tag may terminate a tag list
    pub fn is_category(self) -> bool {
        self.implied_category().is_none()
    }

    /// One-line description used as the generated docstring
    pub fn docstring(self) -> &'static str {
        match self {
            CategoryTag::Base => "Base exception for G2 related python code.",
            CategoryTag::BadInput => "The user-supplied input contained an error.",
            CategoryTag::Configuration => "The program can provide a remedy and continue.",
            CategoryTag::Database => "Database exception",
            CategoryTag::DatabaseConnectionLost => "Database connection lost",
            CategoryTag::License => "Licence exception",
            CategoryTag::NotFound => "Not found",
            CategoryTag::NotInitialized => "Not initialized",
            CategoryTag::Retryable => "The program can provide a remedy and continue.",
            CategoryTag::RetryTimeoutExceeded => "Retry timeout exceeded time limit",
            CategoryTag::Unhandled => "Could not handle exception",
            CategoryTag::UnknownDatasource => "Unknown Datasource",
            CategoryTag::Unrecoverable => "System failure, can't continue.",
        }
    }

    /// Category tags (including the base), in footer order
    pub fn categories() -> impl Iterator<Item = CategoryTag> {
        Self::FOOTER_ORDER.into_iter().filter(|t| t.is_category())
    }

    /// Detail tags, in footer order
    pub fn details() -> impl Iterator<Item = CategoryTag> {
        Self::FOOTER_ORDER.into_iter().filter(|t| !t.is_category())
    }

    /// Detail tags that roll up into `category`, in footer order
    pub fn details_of(category: CategoryTag) -> impl Iterator<Item = CategoryTag> {
        Self::details().filter(move |t| t.implied_category() == Some(category))
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.go_ident())
    }
}

/// Sort identifiers the way the generated files list them
pub fn sort_identifiers(names: &mut [String]) {
    names.sort_by_key(|name| name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_footer_order_is_a_permutation_of_all() {
        let all: HashSet<_> = CategoryTag::ALL.iter().collect();
        let footer: HashSet<_> = CategoryTag::FOOTER_ORDER.iter().collect();
        assert_eq!(all, footer);
        assert_eq!(all.len(), 13);
    }

    #[test]
    fn test_footer_order_is_case_insensitive_alphabetical() {
        let names: Vec<String> = CategoryTag::FOOTER_ORDER
            .iter()
            .map(|t| t.go_ident().to_string())
            .collect();
        let mut sorted = names.clone();
        sort_identifiers(&mut sorted);
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_every_detail_implies_a_category() {
        for tag in CategoryTag::ALL {
            if let Some(category) = tag.implied_category() {
                assert!(category.is_category(), "{} implies non-category {}", tag, category);
            }
        }
    }

    #[test]
    fn test_category_partition() {
        let categories: Vec<_> = CategoryTag::categories().collect();
        assert_eq!(
            categories,
            vec![
                CategoryTag::BadInput,
                CategoryTag::Base,
                CategoryTag::Configuration,
                CategoryTag::Retryable,
                CategoryTag::Unrecoverable,
            ]
        );
        assert_eq!(CategoryTag::details().count(), 8);
        assert_eq!(
            CategoryTag::details_of(CategoryTag::Retryable).collect::<Vec<_>>(),
            vec![
                CategoryTag::DatabaseConnectionLost,
                CategoryTag::RetryTimeoutExceeded
            ]
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(CategoryTag::Base.python_class(), "G2Error");
        assert_eq!(CategoryTag::Base.go_struct(), "G2BaseError");
        assert_eq!(CategoryTag::NotFound.python_class(), "G2NotFoundError");
        assert_eq!(CategoryTag::NotFound.to_string(), "G2NotFound");
    }
}
