use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::ProfileId;

/// Code of the built-in administrator profile. It can be edited but never deleted.
pub const PROTECTED_PROFILE_CODE: &str = "ADMIN";

/// Profile: a role-like bundle of scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub code: String,
    pub description: String,
    /// Scope names, insertion-ordered, without duplicates.
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified_by: String,
}

impl Profile {
    /// Whether this profile is the protected administrator profile.
    ///
    /// The comparison ignores case: `"admin"` is protected as well.
    pub fn is_protected(&self) -> bool {
        self.code.trim().eq_ignore_ascii_case(PROTECTED_PROFILE_CODE)
    }
}

impl Entity for Profile {
    type Id = ProfileId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Payload: create a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub code: String,
    pub description: String,
    pub scopes: Vec<String>,
}

/// Payload: update an existing profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub id: ProfileId,
    pub code: String,
    pub description: String,
    pub scopes: Vec<String>,
}
