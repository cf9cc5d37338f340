//! Bird resource model.
//!
//! A bird is the only resource exposed by the service. Validated building
//! blocks ([`BirdName`], [`NewBird`], [`BirdChanges`]) are produced from raw
//! [`BirdDraft`] input so that persistence adapters only ever see data that
//! already satisfies the record invariants.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters allowed in a bird name.
pub const BIRD_NAME_MAX: usize = 255;

/// Validation errors raised while building bird inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BirdValidationError {
    #[error("name is required")]
    MissingName,
    #[error("description is required")]
    MissingDescription,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("name must not contain NUL characters")]
    NameContainsNul,
    #[error("description must not contain NUL characters")]
    DescriptionContainsNul,
}

impl BirdValidationError {
    /// Payload field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingDescription | Self::DescriptionContainsNul => "description",
            Self::MissingName
            | Self::EmptyName
            | Self::NameTooLong { .. }
            | Self::NameContainsNul => "name",
        }
    }

    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingName | Self::MissingDescription => "missing_field",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::NameContainsNul | Self::DescriptionContainsNul => "contains_nul",
        }
    }
}

/// Opaque, system-assigned bird identifier.
///
/// Identifiers are compared by exact string match; the in-memory store hands
/// out decimal counters and the database renders its `BIGSERIAL` keys the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirdId(String);

impl BirdId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<u64> for BirdId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for BirdId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BirdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated bird name: non-empty, at most [`BIRD_NAME_MAX`] characters and
/// free of NUL characters.
///
/// # Examples
/// ```
/// use birds_api::domain::{BirdName, BirdValidationError};
///
/// assert!(BirdName::new("Robin").is_ok());
/// assert_eq!(BirdName::new(""), Err(BirdValidationError::EmptyName));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirdName(String);

impl BirdName {
    /// Validate and construct a [`BirdName`].
    pub fn new(name: impl Into<String>) -> Result<Self, BirdValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BirdValidationError::EmptyName);
        }
        if name.chars().count() > BIRD_NAME_MAX {
            return Err(BirdValidationError::NameTooLong { max: BIRD_NAME_MAX });
        }
        if name.contains('\0') {
            return Err(BirdValidationError::NameContainsNul);
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BirdName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BirdName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BirdName> for String {
    fn from(value: BirdName) -> Self {
        value.0
    }
}

impl TryFrom<String> for BirdName {
    type Error = BirdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Descriptions may be empty but must not contain NUL characters.
fn check_description(description: String) -> Result<String, BirdValidationError> {
    if description.contains('\0') {
        return Err(BirdValidationError::DescriptionContainsNul);
    }
    Ok(description)
}

/// Raw bird fields as supplied by a caller; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirdDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated input for creating a bird.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBird {
    name: BirdName,
    description: String,
}

impl NewBird {
    /// Build a new bird from already validated parts.
    pub fn new(name: BirdName, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
        }
    }

    pub fn name(&self) -> &BirdName {
        &self.name
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

impl TryFrom<BirdDraft> for NewBird {
    type Error = BirdValidationError;

    fn try_from(value: BirdDraft) -> Result<Self, Self::Error> {
        let BirdDraft { name, description } = value;
        let name = BirdName::new(name.ok_or(BirdValidationError::MissingName)?)?;
        let description =
            check_description(description.ok_or(BirdValidationError::MissingDescription)?)?;
        Ok(Self { name, description })
    }
}

/// Contract applied to update requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Only supplied fields change; absent fields are left untouched.
    #[default]
    Merge,
    /// Both fields are required and replace the stored values.
    Replace,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => f.write_str("merge"),
            Self::Replace => f.write_str("replace"),
        }
    }
}

/// Error returned when parsing an unknown [`UpdateMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown update mode '{0}'; expected merge or replace")]
pub struct ParseUpdateModeError(String);

impl FromStr for UpdateMode {
    type Err = ParseUpdateModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            _ => Err(ParseUpdateModeError(s.to_owned())),
        }
    }
}

/// Validated field changes for an existing bird.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirdChanges {
    name: Option<BirdName>,
    description: Option<String>,
}

impl BirdChanges {
    /// Validate a draft against the given update contract.
    ///
    /// # Examples
    /// ```
    /// use birds_api::domain::{BirdChanges, BirdDraft, BirdValidationError, UpdateMode};
    ///
    /// let draft = BirdDraft { name: Some("Wren".into()), description: None };
    /// assert!(BirdChanges::from_draft(draft.clone(), UpdateMode::Merge).is_ok());
    /// assert_eq!(
    ///     BirdChanges::from_draft(draft, UpdateMode::Replace),
    ///     Err(BirdValidationError::MissingDescription)
    /// );
    /// ```
    pub fn from_draft(draft: BirdDraft, mode: UpdateMode) -> Result<Self, BirdValidationError> {
        match mode {
            UpdateMode::Merge => {
                let BirdDraft { name, description } = draft;
                let name = name.map(BirdName::new).transpose()?;
                let description = description.map(check_description).transpose()?;
                Ok(Self { name, description })
            }
            UpdateMode::Replace => {
                let bird = NewBird::try_from(draft)?;
                Ok(Self {
                    name: Some(bird.name),
                    description: Some(bird.description),
                })
            }
        }
    }

    pub fn name(&self) -> Option<&BirdName> {
        self.name.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// True when neither field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Persisted bird record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bird {
    id: BirdId,
    name: BirdName,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Bird {
    /// Materialise a freshly inserted bird; both timestamps equal `now`.
    pub fn create(id: BirdId, bird: NewBird, now: DateTime<Utc>) -> Self {
        let NewBird { name, description } = bird;
        Self {
            id,
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a bird from stored columns.
    pub fn restore(
        id: BirdId,
        bird: NewBird,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let NewBird { name, description } = bird;
        Self {
            id,
            name,
            description,
            created_at,
            updated_at,
        }
    }

    /// Stamp for the next update of this record.
    ///
    /// Returns `now` unless the clock has not moved at least a millisecond
    /// past the current `updated_at`, in which case the stamp is bumped so
    /// that every update is visibly later at millisecond precision.
    pub fn next_update_stamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.updated_at + TimeDelta::milliseconds(1))
    }

    /// Apply supplied changes and stamp the update time.
    pub fn apply(&mut self, changes: &BirdChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name() {
            self.name = name.clone();
        }
        if let Some(description) = changes.description() {
            self.description = description.to_owned();
        }
        self.updated_at = now;
    }

    pub fn id(&self) -> &BirdId {
        &self.id
    }

    pub fn name(&self) -> &BirdName {
        &self.name
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
