use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::DomainError;
use crate::id::PartnerId;

/// Partner status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartnerStatus {
    Active,
    Inactive,
}

impl PartnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Active => "ACTIVE",
            PartnerStatus::Inactive => "INACTIVE",
        }
    }
}

impl core::fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PartnerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(PartnerStatus::Active),
            "INACTIVE" => Ok(PartnerStatus::Inactive),
            other => Err(DomainError::validation(format!(
                "unknown partner status: {other}"
            ))),
        }
    }
}

/// Partner: an integration endpoint exchanging messages through a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: PartnerId,
    pub status: PartnerStatus,
    pub hosting_type: String,
    pub alias: String,
    /// Queue name; unique among partners, compared case-insensitively.
    pub queue_name: String,
    pub application: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Partner {
    type Id = PartnerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Payload: register a partner.
///
/// `status` is optional: the console fills it in for elevated users, the
/// backend applies its own default otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub status: Option<PartnerStatus>,
    pub hosting_type: String,
    pub alias: String,
    pub queue_name: String,
    pub application: String,
    pub description: String,
}

/// Payload: update a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerRequest {
    pub id: PartnerId,
    pub status: PartnerStatus,
    pub hosting_type: String,
    pub alias: String,
    pub queue_name: String,
    pub application: String,
    pub description: String,
}
