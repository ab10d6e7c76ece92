use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the project that always exists and is active on first run.
pub const DEFAULT_PROJECT: &str = "default";

/// A titled block of freeform text contributing one block to the combined document.
///
/// The serialized shape (`{id, title, content, tags}`) is the persisted contract;
/// unknown or missing fields make a stored sequence unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl Section {
    /// A new, empty section with a freshly generated id.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            content: String::new(),
            tags: Vec::new(),
        }
    }

    /// Case-insensitive substring match against title, content, or any tag.
    ///
    /// `term_lower` must already be lowercased.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.title.to_lowercase().contains(term_lower)
            || self.content.to_lowercase().contains(term_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term_lower))
    }

    pub fn apply(&mut self, field: SectionField) {
        match field {
            SectionField::Title(title) => self.title = title,
            SectionField::Content(content) => self.content = content,
            SectionField::Tags(tags) => self.tags = tags,
        }
    }
}

/// A single field replacement for a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionField {
    Title(String),
    Content(String),
    Tags(Vec<String>),
}

impl SectionField {
    pub fn name(&self) -> &'static str {
        match self {
            SectionField::Title(_) => "title",
            SectionField::Content(_) => "content",
            SectionField::Tags(_) => "tags",
        }
    }
}

/// Splits a comma-separated tag list, dropping blanks and surrounding whitespace.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
