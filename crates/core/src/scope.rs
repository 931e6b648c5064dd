use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::ScopeId;

/// Scope: a single permission atom, referenced by name from profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub id: ScopeId,
    pub name: String,
}

impl Entity for Scope {
    type Id = ScopeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Payload: create a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScopeRequest {
    pub name: String,
}

/// Payload: rename an existing scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScopeRequest {
    pub id: ScopeId,
    pub name: String,
}
