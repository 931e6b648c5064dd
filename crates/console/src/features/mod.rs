//! The three list screens, as [`Feature`](crate::controller::Feature)
//! instances of the generic controller.

pub mod partners;
pub mod profiles;
pub mod scopes;

pub use partners::{Partners, PartnersController};
pub use profiles::{Profiles, ProfilesController};
pub use scopes::{Scopes, ScopesController};
