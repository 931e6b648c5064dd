//! `adminconsole-api` — the API boundary of the console.
//!
//! The backend does not exist yet. Everything behind [`EntityApi`] is served by
//! [`SimulatedService`]: artificial latency, injectable random failures and an
//! in-memory store seeded with fixtures. A real HTTP client must implement the
//! same trait and return the same [`ApiResponse`] envelope.

pub mod config;
pub mod envelope;
pub mod error;
pub mod fixtures;
pub mod reference;
pub mod service;
pub mod simulator;

mod entities;

pub use config::SimulatorConfig;
pub use envelope::ApiResponse;
pub use error::{ApiError, ApiResult};
pub use reference::{ReferenceSource, ScopeNames};
pub use service::{EntityApi, Operation, SimulatedEntity, SimulatedService};
pub use simulator::{FailurePolicy, Simulator};

use adminconsole_core::{Partner, Profile, Scope};

/// Simulated profile API.
pub type ProfileService = SimulatedService<Profile>;
/// Simulated scope API.
pub type ScopeService = SimulatedService<Scope>;
/// Simulated partner API.
pub type PartnerService = SimulatedService<Partner>;
