//! Canonical user identity model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`DirectoryUser::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty after trimming.
    EmptyId,
    /// The display label was empty after trimming.
    EmptyName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::EmptyName => write!(f, "user name must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// A directory identity normalized from a raw search hit.
///
/// Identifiers are opaque strings assigned by the external directory;
/// the only invariant is that `id` and `name` are non-empty. `email`
/// and `username` are carried through when the directory supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    id: String,
    name: String,
    email: Option<String>,
    username: Option<String>,
}

impl DirectoryUser {
    /// Validate and construct a [`DirectoryUser`].
    ///
    /// # Errors
    ///
    /// Returns an error when `id` or `name` is empty after trimming.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: Option<String>,
        username: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let id = id.into();
        let name = name.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            email,
            username,
        })
    }

    /// Opaque directory identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address, when the directory supplied one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Login name, when the directory supplied one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for identity validation.

    use super::*;

    #[test]
    fn accepts_minimal_identity() {
        let user = DirectoryUser::new("u1", "Jane Doe", None, None).expect("valid identity");
        assert_eq!(user.id(), "u1");
        assert_eq!(user.name(), "Jane Doe");
        assert_eq!(user.email(), None);
        assert_eq!(user.username(), None);
    }

    #[test]
    fn rejects_blank_id() {
        let error = DirectoryUser::new("  ", "Jane Doe", None, None).expect_err("blank id");
        assert_eq!(error, UserValidationError::EmptyId);
    }

    #[test]
    fn rejects_blank_name() {
        let error = DirectoryUser::new("u1", "", None, None).expect_err("blank name");
        assert_eq!(error, UserValidationError::EmptyName);
    }

    #[test]
    fn carries_optional_fields_verbatim() {
        let user = DirectoryUser::new(
            "u1",
            "Jane Doe",
            Some("jane@example.com".to_owned()),
            Some("jdoe".to_owned()),
        )
        .expect("valid identity");
        assert_eq!(user.email(), Some("jane@example.com"));
        assert_eq!(user.username(), Some("jdoe"));
    }
}
