use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user id cannot be empty")]
    EmptyId,

    #[error("user email cannot be empty")]
    EmptyEmail,
}

/// A signed-in learner.
///
/// Replaces the loosely typed user object from the auth collaborator with an
/// explicit record: the identifier is required, the display name falls back
/// to the local part of the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    display_name: String,
}

impl User {
    /// Creates a user record, deriving the display name from the email when
    /// none is given.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the id or email is empty.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
    ) -> Result<Self, UserError> {
        if id.as_str().trim().is_empty() {
            return Err(UserError::EmptyId);
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        let display_name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                email
                    .split('@')
                    .next()
                    .unwrap_or(email.as_str())
                    .to_string()
            });

        Ok(Self {
            id,
            email,
            display_name,
        })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Single-char avatar fallback, uppercased first letter of the email.
    #[must_use]
    pub fn avatar_initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |ch| ch.to_uppercase().to_string())
    }
}
