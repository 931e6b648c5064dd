//! `adminconsole-auth` — user context consumed by the console.
//!
//! Authentication and authorization are enforced elsewhere; the console only
//! reads who the user is and whether they hold the elevated (rank-3) scope.

pub mod context;

pub use context::{UserContext, UserContextService};
