//! Outcome of extracting one field group from a page.

/// Result of a single extraction group.
///
/// Distinguishes a value that is legitimately missing from the page
/// (`Absent`) from one that could not be extracted (`Failed`).
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Found(T),
    Absent,
    Failed(String),
}

impl<T> Field<T> {
    /// Borrow the extracted value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Field::Failed(_))
    }
}

impl<T, E: std::fmt::Display> From<std::result::Result<T, E>> for Field<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(v) => Field::Found(v),
            Err(e) => Field::Failed(e.to_string()),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(option: Option<T>) -> Self {
        option.map_or(Field::Absent, Field::Found)
    }
}
