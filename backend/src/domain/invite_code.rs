//! Invite codes referenced by directory records.
//!
//! A user record points at the invite code it signed up with by code string
//! only. Resolution never joins the two; this type exists so adapters and
//! seeding share one definition of what an invite code carries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRecord;

/// Validation errors returned by [`InviteCode::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteCodeValidationError {
    /// Code was blank once trimmed.
    EmptyCode,
    /// Code contained whitespace.
    WhitespaceInCode,
}

impl fmt::Display for InviteCodeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "invite code must not be empty"),
            Self::WhitespaceInCode => write!(f, "invite code must not contain whitespace"),
        }
    }
}

impl std::error::Error for InviteCodeValidationError {}

/// Signup token granting role tags to the accounts created with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCode {
    pub id: Uuid,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InviteCode {
    /// Build an active invite code granting `roles`.
    pub fn new(
        code: impl Into<String>,
        roles: Vec<String>,
    ) -> Result<Self, InviteCodeValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(InviteCodeValidationError::EmptyCode);
        }
        if code.chars().any(char::is_whitespace) {
            return Err(InviteCodeValidationError::WhitespaceInCode);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            code,
            description: None,
            roles,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attach a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether `user` signed up with this code.
    pub fn was_used_by(&self, user: &UserRecord) -> bool {
        user.invite_code.as_deref() == Some(self.code.as_str())
    }
}
