// Section domain model and identifier allocation
use serde::Serialize;
use std::collections::HashSet;

use super::manifest::SectionContent;

/// Render path a built section ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Chart,
    Markup,
    Placeholder,
}

impl From<SectionContent<'_>> for ContentKind {
    fn from(content: SectionContent<'_>) -> Self {
        match content {
            SectionContent::Chart(_) => ContentKind::Chart,
            SectionContent::Markup(_) => ContentKind::Markup,
            SectionContent::Placeholder => ContentKind::Placeholder,
        }
    }
}

/// A navigable dashboard section. Its DOM nodes live in the document host
/// and are addressed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    pub content: ContentKind,
}

impl Section {
    pub fn new(id: String, label: String, content: ContentKind) -> Self {
        Self { id, label, content }
    }
}

/// Registry of ids handed out during one build pass.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
    first: Option<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base` if unused, otherwise the first free `base-k` for k >= 2.
    /// The result is registered before returning.
    pub fn allocate(&mut self, base: &str) -> String {
        let mut id = base.to_string();
        let mut suffix = 2;
        while self.used.contains(&id) {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(id.clone());
        if self.first.is_none() {
            self.first = Some(id.clone());
        }
        id
    }

    /// First id allocated in this pass.
    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_get_numeric_suffixes() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("a"), "a");
        assert_eq!(ids.allocate("a"), "a-2");
        assert_eq!(ids.allocate("a"), "a-3");
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_skips_suffixes_already_taken() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("a-2"), "a-2");
        assert_eq!(ids.allocate("a"), "a");
        assert_eq!(ids.allocate("a"), "a-3");
    }

    #[test]
    fn test_first_tracks_allocation_order() {
        let mut ids = IdAllocator::new();
        assert!(ids.is_empty());
        assert_eq!(ids.first(), None);
        ids.allocate("zeta");
        ids.allocate("alpha");
        assert_eq!(ids.first(), Some("zeta"));
    }

    #[test]
    fn test_fresh_pass_reuses_base_slugs() {
        let mut first_pass = IdAllocator::new();
        first_pass.allocate("empleo");
        let mut second_pass = IdAllocator::new();
        assert_eq!(second_pass.allocate("empleo"), "empleo");
    }
}
