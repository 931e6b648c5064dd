//! `adminconsole-core` — domain records of the administration console.
//!
//! This crate contains **pure data** (no IO, no async): identifiers, the three
//! managed entity types and the request payloads sent to the API layer.

pub mod entity;
pub mod error;
pub mod id;
pub mod partner;
pub mod profile;
pub mod scope;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{PartnerId, ProfileId, ScopeId};
pub use partner::{CreatePartnerRequest, Partner, PartnerStatus, UpdatePartnerRequest};
pub use profile::{CreateProfileRequest, Profile, UpdateProfileRequest, PROTECTED_PROFILE_CODE};
pub use scope::{CreateScopeRequest, Scope, UpdateScopeRequest};
