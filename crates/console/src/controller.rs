//! Generic list controller: one authoritative collection, its filtered view,
//! and the load/create/update/delete orchestration around an [`EntityApi`].
//!
//! A controller is `Idle` between API calls and `Loading` during one. A call
//! issued while another is in flight is dropped. After [`ListController::teardown`]
//! the controller is `Detached`: in-flight completions are discarded and every
//! later call does nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use adminconsole_api::{ApiResponse, ApiResult, EntityApi, ReferenceSource};
use adminconsole_auth::UserContext;
use adminconsole_core::Entity;

use crate::dialog::{ConfirmationDialog, ConfirmationRequest, FormDialog};
use crate::filter::{apply_filter, Searchable};
use crate::forms::EntityForm;
use crate::i18n::MessageParams;
use crate::notification::Notifier;
use crate::table::{ActionKind, ColumnSpec, DataTable, RowAction, TableEvent, TableRow, TableView};

/// Fallback message keys shared by every feature.
pub const LOAD_ERROR: &str = "common.load_error";
pub const CREATE_ERROR: &str = "common.create_error";
pub const UPDATE_ERROR: &str = "common.update_error";
pub const DELETE_ERROR: &str = "common.delete_error";

/// Success and confirmation message keys of one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureMessages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub delete_confirm: &'static str,
}

pub type CreateOf<F> = <<F as Feature>::Form as EntityForm>::Create;
pub type UpdateOf<F> = <<F as Feature>::Form as EntityForm>::Update;
pub type ContextOf<F> = <<F as Feature>::Form as EntityForm>::Context;
pub type FeatureApi<F> = dyn EntityApi<<F as Feature>::Entity, CreateOf<F>, UpdateOf<F>>;

/// What distinguishes one list screen from another.
pub trait Feature: Send + Sync + 'static {
    type Entity: Entity + TableRow + Searchable + Clone + core::fmt::Debug + Send + Sync + 'static;
    type Form: EntityForm<Entity = Self::Entity>;

    /// Short name used in logs.
    const KEY: &'static str;

    fn messages() -> FeatureMessages;

    fn columns() -> Vec<ColumnSpec>;

    fn actions() -> Vec<RowAction<Self::Entity>> {
        vec![
            RowAction::edit(),
            RowAction::delete().visible_when(Self::deletable),
        ]
    }

    fn deletable(_entity: &Self::Entity) -> bool {
        true
    }

    /// Placeholders of the delete confirmation message.
    fn confirmation_params(entity: &Self::Entity) -> MessageParams;

    fn form_context(items: &[Self::Entity], reference: &[String], user: &UserContext) -> ContextOf<Self>;

    /// Last touch on a confirmed create payload before it is sent.
    fn prepare_create(_request: &mut CreateOf<Self>, _user: &UserContext) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Detached,
}

#[derive(Debug)]
struct ListState<E> {
    items: Vec<E>,
    displayed: Vec<E>,
    reference: Vec<String>,
    table: DataTable<E>,
    phase: Phase,
    generation: u64,
}

impl<E: Searchable + TableRow + Clone> ListState<E> {
    fn refilter(&mut self) {
        self.displayed = apply_filter(&self.items, self.table.search_term());
    }

    fn clear(&mut self) {
        self.items.clear();
        self.displayed.clear();
    }
}

/// Holds the controller busy; returns it to `Idle` when dropped, including
/// when the owning future is cancelled.
struct BusyGuard<'a, E> {
    state: &'a Mutex<ListState<E>>,
    generation: u64,
}

impl<E> Drop for BusyGuard<'_, E> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.phase == Phase::Loading {
            state.phase = Phase::Idle;
        }
    }
}

/// List screen controller of the feature `F`.
pub struct ListController<F: Feature> {
    api: Arc<FeatureApi<F>>,
    notifier: Notifier,
    forms: Arc<dyn FormDialog<F::Form>>,
    confirmation: Arc<dyn ConfirmationDialog>,
    user: watch::Receiver<UserContext>,
    reference: Option<Arc<dyn ReferenceSource>>,
    state: Mutex<ListState<F::Entity>>,
}

impl<F: Feature> core::fmt::Debug for ListController<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListController")
            .field("feature", &F::KEY)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl<F: Feature> ListController<F> {
    pub fn new(
        api: Arc<FeatureApi<F>>,
        notifier: Notifier,
        forms: Arc<dyn FormDialog<F::Form>>,
        confirmation: Arc<dyn ConfirmationDialog>,
        user: watch::Receiver<UserContext>,
    ) -> Self {
        Self {
            api,
            notifier,
            forms,
            confirmation,
            user,
            reference: None,
            state: Mutex::new(ListState {
                items: Vec::new(),
                displayed: Vec::new(),
                reference: Vec::new(),
                table: DataTable::new(F::columns(), F::actions()),
                phase: Phase::Idle,
                generation: 0,
            }),
        }
    }

    /// Auxiliary names loaded on mount and handed to the form context.
    pub fn with_reference(mut self, source: Arc<dyn ReferenceSource>) -> Self {
        self.reference = Some(source);
        self
    }

    fn lock(&self) -> MutexGuard<'_, ListState<F::Entity>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enter `Loading`, or `None` when busy or detached.
    fn begin(&self, operation: &'static str) -> Option<BusyGuard<'_, F::Entity>> {
        let mut state = self.lock();
        if state.phase != Phase::Idle {
            debug!(feature = F::KEY, operation, phase = ?state.phase, "call skipped");
            return None;
        }
        state.phase = Phase::Loading;
        Some(BusyGuard {
            state: &self.state,
            generation: state.generation,
        })
    }

    fn is_current(&self, generation: u64) -> bool {
        let state = self.lock();
        state.generation == generation && state.phase != Phase::Detached
    }

    fn user(&self) -> UserContext {
        self.user.borrow().clone()
    }

    // ----- lifecycle -----

    /// Initial load, alongside the reference load when one is configured.
    pub async fn mount(&self) {
        match self.reference.clone() {
            Some(source) => {
                tokio::join!(self.load(), self.load_reference(source));
            }
            None => self.load().await,
        }
    }

    async fn load_reference(&self, source: Arc<dyn ReferenceSource>) {
        let generation = self.lock().generation;
        match source.names().await {
            Ok(names) => {
                let mut state = self.lock();
                if state.generation == generation {
                    state.reference = names;
                }
            }
            Err(err) => debug!(feature = F::KEY, error = %err, "reference load failed"),
        }
    }

    /// Stop reacting: pending completions are discarded, later calls ignored.
    pub fn teardown(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.phase = Phase::Detached;
        debug!(feature = F::KEY, "controller detached");
    }

    // ----- operations -----

    pub async fn load(&self) {
        let Some(guard) = self.begin("load") else {
            return;
        };
        let outcome = self.api.get_all().await;

        let failure = {
            let mut state = self.lock();
            if state.generation != guard.generation {
                return;
            }
            match outcome {
                Ok(ApiResponse { success: true, data: Some(items), .. }) => {
                    state.items = items;
                    state.refilter();
                    debug!(feature = F::KEY, count = state.items.len(), "collection loaded");
                    None
                }
                Ok(response) if response.success => {
                    state.clear();
                    warn!(feature = F::KEY, "load succeeded without data");
                    Some(None)
                }
                Ok(response) => {
                    state.clear();
                    warn!(feature = F::KEY, message = %response.message, "load unsuccessful");
                    Some(response.message().map(str::to_string))
                }
                Err(err) => {
                    state.clear();
                    warn!(feature = F::KEY, error = %err, "load failed");
                    Some(None)
                }
            }
        };

        if let Some(message) = failure {
            let key = message.as_deref().unwrap_or(LOAD_ERROR);
            self.notifier.show_error(key, &MessageParams::new());
        }
    }

    pub async fn create(&self, request: CreateOf<F>) {
        let Some(guard) = self.begin("create") else {
            return;
        };
        let outcome = self.api.create(request).await;
        if self.settle(&guard, "create", outcome, F::messages().created, CREATE_ERROR) {
            drop(guard);
            self.load().await;
        }
    }

    pub async fn update(&self, request: UpdateOf<F>) {
        let Some(guard) = self.begin("update") else {
            return;
        };
        let outcome = self.api.update(request).await;
        if self.settle(&guard, "update", outcome, F::messages().updated, UPDATE_ERROR) {
            drop(guard);
            self.load().await;
        }
    }

    /// Delete after confirmation. Protected records are refused outright.
    pub async fn delete(&self, entity: &F::Entity) {
        if !F::deletable(entity) {
            warn!(feature = F::KEY, id = %entity.id(), "protected record, delete refused");
            return;
        }
        if self.phase() == Phase::Detached {
            return;
        }

        let request = ConfirmationRequest::delete(
            F::messages().delete_confirm,
            F::confirmation_params(entity),
        );
        if self.confirmation.confirm(request).await != Some(true) {
            debug!(feature = F::KEY, id = %entity.id(), "delete not confirmed");
            return;
        }

        let Some(guard) = self.begin("delete") else {
            return;
        };
        let outcome = self.api.delete(entity.id()).await;
        if self.settle(&guard, "delete", outcome, F::messages().deleted, DELETE_ERROR) {
            drop(guard);
            self.load().await;
        }
    }

    /// Notify the outcome of a mutation; `true` when a reload should follow.
    fn settle<T>(
        &self,
        guard: &BusyGuard<'_, F::Entity>,
        operation: &'static str,
        outcome: ApiResult<T>,
        success_key: &str,
        fallback_key: &str,
    ) -> bool {
        if !self.is_current(guard.generation) {
            debug!(feature = F::KEY, operation, "late completion discarded");
            return false;
        }
        match outcome {
            Ok(response) if response.success => {
                info!(feature = F::KEY, operation, "completed");
                self.notifier.show_success(success_key, &MessageParams::new());
                true
            }
            Ok(response) => {
                warn!(feature = F::KEY, operation, message = %response.message, "unsuccessful");
                let key = response.message().unwrap_or(fallback_key);
                self.notifier.show_error(key, &MessageParams::new());
                false
            }
            Err(err) => {
                warn!(feature = F::KEY, operation, error = %err, "failed");
                self.notifier.show_error(fallback_key, &MessageParams::new());
                false
            }
        }
    }

    // ----- dialogs -----

    /// Open the create dialog and create the confirmed payload.
    pub async fn open_create(&self) {
        let Some((generation, context)) = self.form_context() else {
            return;
        };
        let Some(mut request) = self.forms.open_create(context).await else {
            debug!(feature = F::KEY, "create dialog dismissed");
            return;
        };
        if !self.is_current(generation) {
            return;
        }
        F::prepare_create(&mut request, &self.user());
        self.create(request).await;
    }

    /// Open the edit dialog on a copy of `entity` and update on confirm.
    pub async fn open_edit(&self, entity: &F::Entity) {
        let Some((generation, context)) = self.form_context() else {
            return;
        };
        let Some(request) = self.forms.open_edit(entity.clone(), context).await else {
            debug!(feature = F::KEY, id = %entity.id(), "edit dialog dismissed");
            return;
        };
        if !self.is_current(generation) {
            return;
        }
        self.update(request).await;
    }

    fn form_context(&self) -> Option<(u64, ContextOf<F>)> {
        let user = self.user();
        let state = self.lock();
        if state.phase == Phase::Detached {
            return None;
        }
        let context = F::form_context(&state.items, &state.reference, &user);
        Some((state.generation, context))
    }

    // ----- search and table -----

    /// Apply a new search term (trimmed). Returns whether the view changed;
    /// repeating the current term does nothing.
    pub fn search(&self, term: &str) -> bool {
        let mut state = self.lock();
        if state.phase == Phase::Detached {
            return false;
        }
        let changed = state.table.input_search(term).is_some();
        if changed {
            state.refilter();
        }
        changed
    }

    /// Dispatch an intent emitted by the table.
    pub async fn handle_event(&self, event: TableEvent) {
        match event {
            TableEvent::CreateRequested => self.open_create().await,
            TableEvent::RefreshRequested => self.load().await,
            TableEvent::SearchChanged(term) => {
                self.search(&term);
            }
            TableEvent::ActionInvoked { action, row_id } => {
                let Some(entity) = self.find(&row_id) else {
                    debug!(feature = F::KEY, row_id = %row_id, "action on unknown row");
                    return;
                };
                match action {
                    ActionKind::Edit => self.open_edit(&entity).await,
                    ActionKind::Delete => self.delete(&entity).await,
                }
            }
        }
    }

    /// Project the displayed collection through the table.
    pub fn view(&self) -> TableView {
        let state = self.lock();
        state.table.render(&state.displayed, state.phase == Phase::Loading)
    }

    /// The table event for `action` on the row `row_id`, when that action is
    /// exposed for it.
    pub fn invoke(&self, action: ActionKind, row_id: &str) -> Option<TableEvent> {
        let state = self.lock();
        let row = state.items.iter().find(|item| item.row_id() == row_id)?;
        state.table.invoke(action, row)
    }

    // ----- snapshots -----

    pub fn items(&self) -> Vec<F::Entity> {
        self.lock().items.clone()
    }

    pub fn displayed(&self) -> Vec<F::Entity> {
        self.lock().displayed.clone()
    }

    pub fn find(&self, row_id: &str) -> Option<F::Entity> {
        self.lock()
            .items
            .iter()
            .find(|item| item.row_id() == row_id)
            .cloned()
    }

    pub fn reference(&self) -> Vec<String> {
        self.lock().reference.clone()
    }

    pub fn search_term(&self) -> String {
        self.lock().table.search_term().to_string()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }
}
