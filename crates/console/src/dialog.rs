//! Modal dialog contracts and their headless, scripted implementations.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;

use crate::forms::{EntityForm, Submission};
use crate::i18n::MessageParams;
use crate::validators::FormErrors;

/// Create/edit dialog over the form model `F`.
///
/// Both calls resolve to `None` when the user dismisses the dialog.
#[async_trait]
pub trait FormDialog<F: EntityForm>: Send + Sync {
    async fn open_create(&self, context: F::Context) -> Option<F::Create>;

    /// `entity` is a copy; the dialog never sees the controller's collection.
    async fn open_edit(&self, entity: F::Entity, context: F::Context) -> Option<F::Update>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationTone {
    Neutral,
    Danger,
}

/// What a confirmation dialog shows. All texts are message keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title_key: String,
    pub message_key: String,
    pub params: MessageParams,
    pub confirm_key: String,
    pub cancel_key: String,
    pub tone: ConfirmationTone,
}

impl ConfirmationRequest {
    /// Confirmation of a destructive delete.
    pub fn delete(message_key: impl Into<String>, params: MessageParams) -> Self {
        Self {
            title_key: "common.confirm_delete_title".to_string(),
            message_key: message_key.into(),
            params,
            confirm_key: "common.delete".to_string(),
            cancel_key: "common.cancel".to_string(),
            tone: ConfirmationTone::Danger,
        }
    }
}

/// Yes/no gate. `Some(true)` confirms; `Some(false)` and `None` (dismissed)
/// both decline.
#[async_trait]
pub trait ConfirmationDialog: Send + Sync {
    async fn confirm(&self, request: ConfirmationRequest) -> Option<bool>;
}

/// One scripted user interaction with a form dialog.
pub enum FormScript<F> {
    /// Dismiss without confirming.
    Cancel,
    /// Fill the form, then press confirm.
    Submit(Box<dyn FnOnce(&mut F) + Send>),
}

impl<F> FormScript<F> {
    pub fn submit(fill: impl FnOnce(&mut F) + Send + 'static) -> Self {
        FormScript::Submit(Box::new(fill))
    }
}

impl<F> core::fmt::Debug for FormScript<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormScript::Cancel => f.write_str("Cancel"),
            FormScript::Submit(_) => f.write_str("Submit(..)"),
        }
    }
}

/// Drives the real form models from a queue of scripts.
///
/// An exhausted queue cancels. A filled form that fails validation cannot be
/// confirmed, so the dialog resolves to `None` and keeps the errors.
pub struct ScriptedFormDialog<F> {
    scripts: Mutex<VecDeque<FormScript<F>>>,
    rejected: Mutex<Vec<FormErrors>>,
    opened: Mutex<usize>,
}

impl<F> Default for ScriptedFormDialog<F> {
    fn default() -> Self {
        Self {
            scripts: Mutex::new(VecDeque::new()),
            rejected: Mutex::new(Vec::new()),
            opened: Mutex::new(0),
        }
    }
}

impl<F> core::fmt::Debug for ScriptedFormDialog<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScriptedFormDialog")
            .field("opened", &self.opened())
            .finish_non_exhaustive()
    }
}

impl<F> ScriptedFormDialog<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, script: FormScript<F>) -> &Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(script);
        self
    }

    pub fn push_cancel(&self) -> &Self {
        self.push(FormScript::Cancel)
    }

    pub fn push_submit(&self, fill: impl FnOnce(&mut F) + Send + 'static) -> &Self {
        self.push(FormScript::submit(fill))
    }

    pub fn opened(&self) -> usize {
        *self.opened.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validation errors of every submission the form refused.
    pub fn rejected(&self) -> Vec<FormErrors> {
        self.rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn next_script(&self) -> FormScript<F> {
        *self.opened.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(FormScript::Cancel)
    }
}

impl<F: EntityForm> ScriptedFormDialog<F> {
    fn run(&self, mut form: F) -> Option<Submission<F::Create, F::Update>> {
        let FormScript::Submit(fill) = self.next_script() else {
            return None;
        };
        fill(&mut form);
        match form.submit() {
            Ok(submission) => Some(submission),
            Err(errors) => {
                tracing::debug!(%errors, "form refused to confirm");
                self.rejected
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(errors);
                None
            }
        }
    }
}

#[async_trait]
impl<F: EntityForm> FormDialog<F> for ScriptedFormDialog<F> {
    async fn open_create(&self, context: F::Context) -> Option<F::Create> {
        match self.run(F::for_create(&context))? {
            Submission::Create(payload) => Some(payload),
            Submission::Update(_) => None,
        }
    }

    async fn open_edit(&self, entity: F::Entity, context: F::Context) -> Option<F::Update> {
        match self.run(F::for_edit(&entity, &context))? {
            Submission::Update(payload) => Some(payload),
            Submission::Create(_) => None,
        }
    }
}

/// Answers confirmations from a queue, then with a fixed default.
#[derive(Debug)]
pub struct ScriptedConfirmation {
    answers: Mutex<VecDeque<Option<bool>>>,
    default: Option<bool>,
    requests: Mutex<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirmation {
    pub fn new(default: Option<bool>) -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            default,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(Some(true))
    }

    pub fn declining() -> Self {
        Self::new(Some(false))
    }

    pub fn push(&self, answer: Option<bool>) -> &Self {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(answer);
        self
    }

    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ConfirmationDialog for ScriptedConfirmation {
    async fn confirm(&self, request: ConfirmationRequest) -> Option<bool> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{ScopeForm, ScopeFormContext};
    use crate::validators::SCOPE_NAME_UNIQUE;
    use adminconsole_core::{Scope, ScopeId};

    fn context() -> ScopeFormContext {
        ScopeFormContext::from_scopes(&[Scope { id: ScopeId::new("s1"), name: "read".into() }])
    }

    #[tokio::test]
    async fn exhausted_script_cancels() {
        let dialog = ScriptedFormDialog::<ScopeForm>::new();
        assert_eq!(dialog.open_create(context()).await, None);
        assert_eq!(dialog.opened(), 1);
    }

    #[tokio::test]
    async fn invalid_fill_never_confirms() {
        let dialog = ScriptedFormDialog::<ScopeForm>::new();
        dialog.push_submit(|form| {
            form.set_name("READ");
        });

        assert_eq!(dialog.open_create(context()).await, None);
        let rejected = dialog.rejected();
        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].has("name", SCOPE_NAME_UNIQUE));
    }

    #[tokio::test]
    async fn edit_resolves_to_an_update_payload() {
        let dialog = ScriptedFormDialog::<ScopeForm>::new();
        dialog.push_submit(|form| {
            form.set_name("read.all");
        });
        let scope = Scope { id: ScopeId::new("s1"), name: "read".into() };

        let update = dialog.open_edit(scope, context()).await.unwrap();
        assert_eq!(update.id, ScopeId::new("s1"));
        assert_eq!(update.name, "read.all");
    }

    #[tokio::test]
    async fn confirmation_answers_in_order_then_default() {
        let confirmation = ScriptedConfirmation::declining();
        confirmation.push(None).push(Some(true));
        let request = ConfirmationRequest::delete("scopes.delete_confirm", MessageParams::new());

        assert_eq!(confirmation.confirm(request.clone()).await, None);
        assert_eq!(confirmation.confirm(request.clone()).await, Some(true));
        assert_eq!(confirmation.confirm(request).await, Some(false));
        assert_eq!(confirmation.requests().len(), 3);
        assert_eq!(confirmation.requests()[0].tone, ConfirmationTone::Danger);
    }
}
