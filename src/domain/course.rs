//! Course entity: the record stored in the catalog

use std::fmt;

/// A single course record.
///
/// Courses are identified purely by their course number; the store compares
/// numbers and nothing else. Fields are read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    number: String,
    title: String,
    prerequisites: Vec<String>,
}

impl Course {
    pub fn new(
        number: impl Into<String>,
        title: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            prerequisites,
        }
    }

    /// Course number, the store key (e.g. `CSCI200`).
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prerequisite course numbers in the order they were listed.
    /// Duplicates are kept as given.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// True for the empty "not found" record (no course number).
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.number, self.title)
    }
}
