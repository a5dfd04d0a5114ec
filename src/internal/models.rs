use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// A success story as stored by the backend.
///
/// `id` and `timestamp` are only ever assigned by the server; the client never
/// fills them in.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct StoryRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl StoryRecord {
    /// Location with blank values folded into `None`.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// The four editable fields of the story form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum DraftField {
    Title,
    Content,
    Author,
    Location,
}

impl DraftField {
    pub fn next(self) -> Self {
        let fields: Vec<DraftField> = DraftField::iter().collect();
        let idx = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }

    pub fn prev(self) -> Self {
        let fields: Vec<DraftField> = DraftField::iter().collect();
        let idx = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(idx + fields.len() - 1) % fields.len()]
    }

    /// Placeholder label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Story Title",
            Self::Content => "Your detailed success story...",
            Self::Author => "Your Name",
            Self::Location => "Location (Optional)",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Self::Location)
    }
}

/// Uncommitted form input. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftForm {
    pub title: String,
    pub content: String,
    pub author: String,
    pub location: String,
}

impl DraftForm {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Content => &self.content,
            DraftField::Author => &self.author,
            DraftField::Location => &self.location,
        }
    }

    /// Replace a single field, leaving the others untouched.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Title => &mut self.title,
            DraftField::Content => &mut self.content,
            DraftField::Author => &mut self.author,
            DraftField::Location => &mut self.location,
        };
        *slot = value.into();
    }

    /// Title, content and author must all be non-empty. Location is free.
    pub fn is_submittable(&self) -> bool {
        DraftField::iter()
            .filter(|f| f.is_required())
            .all(|f| !self.get(f).is_empty())
    }

    pub fn is_empty(&self) -> bool {
        DraftField::iter().all(|f| self.get(f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Wire body for `POST /stories`.
    pub fn to_body(&self) -> NewStory<'_> {
        NewStory {
            title: &self.title,
            content: &self.content,
            author: &self.author,
            location: &self.location,
        }
    }
}

/// JSON body sent when creating a story.
#[derive(Debug, Serialize, PartialEq)]
pub struct NewStory<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
    pub location: &'a str,
}
