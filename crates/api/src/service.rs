//! Entity API capability and its simulated, in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use adminconsole_core::Entity;

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::simulator::Simulator;

/// CRUD capability over one entity type.
///
/// `T` is the record, `CreateT` / `UpdateT` the request payloads.
#[async_trait]
pub trait EntityApi<T, CreateT, UpdateT>: Send + Sync
where
    T: Entity + Send + Sync + 'static,
    CreateT: Send + 'static,
    UpdateT: Send + 'static,
{
    async fn get_all(&self) -> ApiResult<Vec<T>>;

    async fn create(&self, entity: CreateT) -> ApiResult<T>;

    async fn update(&self, entity: UpdateT) -> ApiResult<T>;

    async fn delete(&self, id: &T::Id) -> ApiResult<bool>;
}

/// API operation, used to force failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetAll => "get_all",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the simulated backend materializes records from request payloads.
pub trait SimulatedEntity: Entity + Clone + Send + Sync + 'static {
    type Create: Send + 'static;
    type Update: Send + 'static;

    /// Entity name used in envelope messages and logs.
    const NAME: &'static str;

    /// Build a new record (fresh id, creation timestamp).
    fn create(request: Self::Create, actor: &str, now: DateTime<Utc>) -> Self;

    /// Id of the record an update targets.
    fn target(request: &Self::Update) -> &Self::Id;

    /// Apply an update; id and creation timestamp are preserved.
    fn updated(&self, request: Self::Update, actor: &str) -> Self;
}

/// In-memory backend stand-in for one entity type.
///
/// Every call goes through the shared [`Simulator`] (latency, random
/// failures). Mutations reach the store only when the envelope succeeds.
#[derive(Debug)]
pub struct SimulatedService<E: SimulatedEntity> {
    simulator: Arc<Simulator>,
    store: Mutex<Vec<E>>,
    forced: Mutex<HashSet<Operation>>,
    calls: Mutex<HashMap<Operation, usize>>,
    actor: String,
}

impl<E: SimulatedEntity> SimulatedService<E> {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self::with_records(simulator, Vec::new())
    }

    pub fn with_records(simulator: Arc<Simulator>, records: Vec<E>) -> Self {
        Self {
            simulator,
            store: Mutex::new(records),
            forced: Mutex::new(HashSet::new()),
            calls: Mutex::new(HashMap::new()),
            actor: "system".to_string(),
        }
    }

    /// Name recorded as author of created/updated records.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Snapshot of the backing store.
    pub fn records(&self) -> Vec<E> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Make every subsequent `op` call fail until cleared.
    pub fn force_failure(&self, op: Operation) {
        self.forced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(op);
    }

    pub fn clear_forced_failures(&self) {
        self.forced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of `op` calls received so far.
    pub fn calls(&self, op: Operation) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    /// Count the call and report whether it is forced to fail.
    fn begin(&self, op: Operation) -> bool {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(op)
            .or_insert(0) += 1;
        tracing::debug!(entity = E::NAME, op = %op, "simulated api call");
        self.forced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&op)
    }

    fn not_found<T>(id: &E::Id) -> ApiResponse<T> {
        ApiResponse::failure(format!("{} {} not found", E::NAME, id))
    }
}

#[async_trait]
impl<E: SimulatedEntity> EntityApi<E, E::Create, E::Update> for SimulatedService<E> {
    async fn get_all(&self) -> ApiResult<Vec<E>> {
        let forced = self.begin(Operation::GetAll);
        let snapshot = self.records();
        Ok(self.simulator.simulate(E::NAME, snapshot, forced).await)
    }

    async fn create(&self, entity: E::Create) -> ApiResult<E> {
        let forced = self.begin(Operation::Create);
        let record = E::create(entity, &self.actor, Utc::now());
        let response = self.simulator.simulate(E::NAME, record, forced).await;

        if let (true, Some(created)) = (response.success, response.data.as_ref()) {
            self.store
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(created.clone());
            tracing::info!(entity = E::NAME, id = %created.id(), "record created");
        }
        Ok(response)
    }

    async fn update(&self, entity: E::Update) -> ApiResult<E> {
        let forced = self.begin(Operation::Update);
        let response = self.simulator.simulate(E::NAME, entity, forced).await;
        let message = response.message.clone();
        let Some(request) = response.into_data() else {
            return Ok(ApiResponse::failure(message));
        };

        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let target = E::target(&request).clone();
        let Some(slot) = store.iter_mut().find(|record| *record.id() == target) else {
            return Ok(Self::not_found(&target));
        };

        let updated = slot.updated(request, &self.actor);
        *slot = updated.clone();
        tracing::info!(entity = E::NAME, id = %target, "record updated");
        Ok(ApiResponse::ok(updated, message))
    }

    async fn delete(&self, id: &E::Id) -> ApiResult<bool> {
        let forced = self.begin(Operation::Delete);
        let response = self.simulator.simulate(E::NAME, true, forced).await;
        if !response.success {
            return Ok(response);
        }

        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let before = store.len();
        store.retain(|record| record.id() != id);
        if store.len() == before {
            return Ok(Self::not_found(id));
        }

        tracing::info!(entity = E::NAME, id = %id, "record deleted");
        Ok(response)
    }
}
