//! Fruit records: owner-scoped documents carrying embedded comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Comment, CommentId, OwnedBy, OwnershipKind, UserId};

/// Maximum accepted length of a fruit name or colour, in characters.
pub const FIELD_MAX: usize = 64;

/// Validation errors for fruit input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FruitValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl FruitValidationError {
    /// Name of the offending field in its JSON spelling.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<String, FruitValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FruitValidationError::Empty { field });
    }
    if trimmed.chars().count() > FIELD_MAX {
        return Err(FruitValidationError::TooLong {
            field,
            max: FIELD_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// Title-case a fruit name: first character upper case, the rest lower case.
///
/// Surrounding whitespace is dropped first.
///
/// # Examples
/// ```
/// use orchard::domain::normalize_fruit_name;
///
/// assert_eq!(normalize_fruit_name("bANANA"), "Banana");
/// assert_eq!(normalize_fruit_name(" kiwi "), "Kiwi");
/// ```
pub fn normalize_fruit_name(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Server-issued fruit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct FruitId(Uuid);

impl FruitId {
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

impl std::fmt::Display for FruitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for FruitId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Validated input for creating a fruit.
///
/// Carries no owner; the service stamps the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruitDraft {
    name: String,
    color: String,
    ready_to_eat: bool,
}

impl FruitDraft {
    /// Validate raw creation input.
    pub fn new(name: &str, color: &str, ready_to_eat: bool) -> Result<Self, FruitValidationError> {
        Ok(Self {
            name: validate_field("name", name)?,
            color: validate_field("color", color)?,
            ready_to_eat,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn ready_to_eat(&self) -> bool {
        self.ready_to_eat
    }
}

/// Partial update to a fruit. Absent fields are left unchanged.
///
/// Owner and comments are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FruitPatch {
    name: Option<String>,
    color: Option<String>,
    ready_to_eat: Option<bool>,
}

impl FruitPatch {
    /// Validate raw patch input; present strings must be non-blank.
    pub fn new(
        name: Option<&str>,
        color: Option<&str>,
        ready_to_eat: Option<bool>,
    ) -> Result<Self, FruitValidationError> {
        Ok(Self {
            name: name.map(|n| validate_field("name", n)).transpose()?,
            color: color.map(|c| validate_field("color", c)).transpose()?,
            ready_to_eat,
        })
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.ready_to_eat.is_none()
    }
}

/// A fruit document.
///
/// ## Invariants
/// - Once `owner` is set only that user may update or delete the fruit.
/// - `comments` preserve insertion order.
/// - `revision` increases by one on every persisted change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    pub id: FruitId,
    #[schema(example = "Banana")]
    pub name: String,
    #[schema(example = "yellow")]
    pub color: String,
    pub ready_to_eat: bool,
    #[schema(nullable = true)]
    pub owner: Option<UserId>,
    pub comments: Vec<Comment>,
    pub revision: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fruit {
    /// Build a new fruit at revision 1.
    pub fn new(draft: FruitDraft, owner: Option<UserId>, now: DateTime<Utc>) -> Self {
        Self {
            id: FruitId::random(),
            name: draft.name,
            color: draft.color,
            ready_to_eat: draft.ready_to_eat,
            owner,
            comments: Vec::new(),
            revision: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply `patch` and advance the revision.
    pub fn apply(&mut self, patch: FruitPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(ready) = patch.ready_to_eat {
            self.ready_to_eat = ready;
        }
        self.touch(now);
    }

    /// Append a comment and advance the revision.
    pub fn push_comment(&mut self, comment: Comment, now: DateTime<Utc>) {
        self.comments.push(comment);
        self.touch(now);
    }

    /// Look up an embedded comment.
    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    /// Remove an embedded comment, advancing the revision when one was removed.
    pub fn remove_comment(&mut self, id: &CommentId, now: DateTime<Utc>) -> Option<Comment> {
        let index = self.comments.iter().position(|c| &c.id == id)?;
        let removed = self.comments.remove(index);
        self.touch(now);
        Some(removed)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.revision = self.revision.saturating_add(1);
        self.updated_at = now;
    }
}

impl OwnedBy for Fruit {
    const KIND: OwnershipKind = OwnershipKind::Owner;

    fn owned_by(&self) -> Option<UserId> {
        self.owner
    }
}
