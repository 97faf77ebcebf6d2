//! Project aggregate and the draft submitted to create one.
//!
//! A project is identified internally by a [`ProjectId`] and externally by a
//! unique [`ProjectKey`] and a unique [`ProjectName`]. The owner's identity
//! and role travel with the project so visibility can be decided without a
//! second lookup.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Login, Role, UserId};

/// Maximum length of a project key.
pub const PROJECT_KEY_MAX: usize = 64;
/// Maximum length of a project name.
pub const PROJECT_NAME_MAX: usize = 128;
/// Maximum length of a project description.
pub const PROJECT_DESCRIPTION_MAX: usize = 1024;

/// Validation errors raised while building project values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("project key must not be empty")]
    EmptyKey,
    #[error("project key must be at most {max} characters")]
    KeyTooLong { max: usize },
    #[error("project key may only contain ASCII letters, digits, '_' or '-'")]
    KeyInvalidCharacters,
    #[error("project name must not be empty")]
    EmptyName,
    #[error("project name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("project description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
}

impl ProjectValidationError {
    /// Name of the draft field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyKey | Self::KeyTooLong { .. } | Self::KeyInvalidCharacters => "key",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::DescriptionTooLong { .. } => "description",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyKey => "empty_key",
            Self::KeyTooLong { .. } => "key_too_long",
            Self::KeyInvalidCharacters => "key_invalid_characters",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::DescriptionTooLong { .. } => "description_too_long",
        }
    }
}

/// Storage identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique human-readable identifier of a project.
///
/// # Examples
/// ```
/// use project_registry::domain::ProjectKey;
///
/// assert!(ProjectKey::new("keyProject").is_ok());
/// assert!(ProjectKey::new("key project").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Validate and construct a key. Keys are case-sensitive and not trimmed.
    pub fn new(key: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ProjectValidationError::EmptyKey);
        }
        if key.chars().count() > PROJECT_KEY_MAX {
            return Err(ProjectValidationError::KeyTooLong {
                max: PROJECT_KEY_MAX,
            });
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        {
            return Err(ProjectValidationError::KeyInvalidCharacters);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ProjectKey> for String {
    fn from(value: ProjectKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectKey {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique display name of a project, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if trimmed.chars().count() > PROJECT_NAME_MAX {
            return Err(ProjectValidationError::NameTooLong {
                max: PROJECT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identity and role of the user owning a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOwner {
    pub id: UserId,
    pub login: Login,
    pub role: Role,
}

/// Stored project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub key: ProjectKey,
    pub name: ProjectName,
    pub description: Option<String>,
    pub owner: ProjectOwner,
    pub created_at: DateTime<Utc>,
}

/// Validated request to create a project.
///
/// ## Invariants
/// - `name` and `key` satisfy [`ProjectName`] and [`ProjectKey`] validation.
/// - `description`, when present, is non-blank and within
///   [`PROJECT_DESCRIPTION_MAX`] characters. Blank descriptions become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    name: ProjectName,
    key: ProjectKey,
    description: Option<String>,
}

impl ProjectDraft {
    /// Validate raw draft fields. Name is checked before key.
    ///
    /// # Examples
    /// ```
    /// use project_registry::domain::ProjectDraft;
    ///
    /// let draft = ProjectDraft::try_from_parts("createdProject", "keyProject", None).unwrap();
    /// assert_eq!(draft.name().as_ref(), "createdProject");
    /// ```
    pub fn try_from_parts(
        name: &str,
        key: &str,
        description: Option<&str>,
    ) -> Result<Self, ProjectValidationError> {
        let name = ProjectName::new(name)?;
        let key = ProjectKey::new(key)?;
        let description = match description.map(str::trim) {
            Some(text) if text.chars().count() > PROJECT_DESCRIPTION_MAX => {
                return Err(ProjectValidationError::DescriptionTooLong {
                    max: PROJECT_DESCRIPTION_MAX,
                });
            }
            Some(text) if !text.is_empty() => Some(text.to_owned()),
            _ => None,
        };
        Ok(Self {
            name,
            key,
            description,
        })
    }

    /// Requested project name.
    #[must_use]
    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Requested project key.
    #[must_use]
    pub fn key(&self) -> &ProjectKey {
        &self.key
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Turn the draft into a project owned by `owner`.
    #[must_use]
    pub fn into_project(self, id: ProjectId, owner: ProjectOwner, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            key: self.key,
            name: self.name,
            description: self.description,
            owner,
            created_at,
        }
    }
}
