//! Session value object for the active dashboard user.
//!
//! The dashboard switches between counselor and stakeholder views without
//! authentication. Instead of a global "current user" singleton, the active
//! identity is carried as an explicit value passed to whatever needs it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Role of the active dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// School counselor managing the case.
    Counselor,
    /// A party to the case (student, parent, teacher, staff).
    Stakeholder,
}

/// The active user of one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name of the active user.
    name: String,
    /// View role the session runs under.
    role: Role,
}

impl Session {
    /// Creates a session for the given user and role.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is empty
    pub fn new(name: impl Into<String>, role: Role) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Session name cannot be empty"));
        }
        Ok(Self { name, role })
    }

    /// Creates a counselor session.
    pub fn counselor(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, Role::Counselor)
    }

    /// Creates a stakeholder session.
    pub fn stakeholder(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, Role::Stakeholder)
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the session role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns true for counselor sessions.
    pub fn is_counselor(&self) -> bool {
        self.role == Role::Counselor
    }
}
