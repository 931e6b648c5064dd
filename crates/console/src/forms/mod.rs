//! Form models behind the create/edit dialogs.
//!
//! A form is opened in [`FormMode::Create`] or [`FormMode::Edit`] (from a copy
//! of the record, so edits never touch the caller's collection), collects
//! field input, and refuses to submit while any field is invalid. Validation
//! errors stay inside the form.

pub mod partner;
pub mod profile;
pub mod rank;
pub mod scope;

pub use partner::{PartnerForm, PartnerFormContext};
pub use profile::{ProfileForm, ProfileFormContext};
pub use rank::{is_rank_key_allowed, normalize_rank_input, RankInput};
pub use scope::{ScopeForm, ScopeFormContext};

use crate::validators::FormErrors;

/// Whether a form creates a record or edits the record with the given id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

impl<Id> FormMode<Id> {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Payload of a confirmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<C, U> {
    Create(C),
    Update(U),
}

/// A form model over one entity type.
pub trait EntityForm: Sized + Send + 'static {
    type Entity: Clone + Send + Sync + 'static;
    /// Snapshot the form needs (reference names, existing values, user flags).
    type Context: Clone + Send + Sync + 'static;
    type Create: Send + 'static;
    type Update: Send + 'static;

    fn for_create(context: &Self::Context) -> Self;

    fn for_edit(entity: &Self::Entity, context: &Self::Context) -> Self;

    fn validate(&self) -> FormErrors;

    /// Payload matching the form mode, or the validation errors.
    fn submit(&self) -> Result<Submission<Self::Create, Self::Update>, FormErrors>;
}
