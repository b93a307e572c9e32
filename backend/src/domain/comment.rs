//! Comments embedded in a fruit document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{OwnedBy, OwnershipKind, UserId};

/// Maximum accepted length of a comment note, in characters.
pub const NOTE_MAX: usize = 2000;

/// Validation errors for comment input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("note must not be empty")]
    EmptyNote,
    #[error("note must be at most {max} characters")]
    NoteTooLong { max: usize },
    #[error("comment id must be a valid UUID")]
    InvalidId,
}

/// Identifier of a comment, unique within its parent fruit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for CommentId {
    type Err = CommentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CommentValidationError::InvalidId)
    }
}

/// Validated note text for a new comment.
///
/// # Examples
/// ```
/// use orchard::domain::CommentDraft;
///
/// let draft = CommentDraft::new("  ripe  ").unwrap();
/// assert_eq!(draft.note(), "ripe");
/// assert!(CommentDraft::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    note: String,
}

impl CommentDraft {
    /// Validate the note text.
    pub fn new(note: impl Into<String>) -> Result<Self, CommentValidationError> {
        let note = note.into();
        let trimmed = note.trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyNote);
        }
        if trimmed.chars().count() > NOTE_MAX {
            return Err(CommentValidationError::NoteTooLong { max: NOTE_MAX });
        }
        Ok(Self {
            note: trimmed.to_owned(),
        })
    }

    /// The validated note text.
    pub fn note(&self) -> &str {
        &self.note
    }
}

/// A note left on a fruit by a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[schema(example = "ripe")]
    pub note: String,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment authored by `author` at `now`.
    pub fn new(draft: CommentDraft, author: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::random(),
            note: draft.note,
            author,
            created_at: now,
            updated_at: now,
        }
    }
}

impl OwnedBy for Comment {
    const KIND: OwnershipKind = OwnershipKind::Author;

    fn owned_by(&self) -> Option<UserId> {
        Some(self.author)
    }
}
