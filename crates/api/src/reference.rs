//! Auxiliary reference data consumed by forms (e.g. scope names offered by
//! the profile form).

use std::sync::Arc;

use async_trait::async_trait;

use adminconsole_core::{CreateScopeRequest, Scope, UpdateScopeRequest};

use crate::error::ApiError;
use crate::service::EntityApi;

/// Async source of reference names.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn names(&self) -> Result<Vec<String>, ApiError>;
}

/// Scope names, read through any scope API.
pub struct ScopeNames {
    api: Arc<dyn EntityApi<Scope, CreateScopeRequest, UpdateScopeRequest>>,
}

impl ScopeNames {
    pub fn new(api: Arc<dyn EntityApi<Scope, CreateScopeRequest, UpdateScopeRequest>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReferenceSource for ScopeNames {
    async fn names(&self) -> Result<Vec<String>, ApiError> {
        let response = self.api.get_all().await?;
        let message = response.message.clone();
        response
            .into_data()
            .map(|scopes| scopes.into_iter().map(|scope| scope.name).collect())
            .ok_or_else(|| ApiError::unsuccessful(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::service::{Operation, SimulatedService};
    use crate::simulator::Simulator;

    #[tokio::test]
    async fn scope_names_follow_the_scope_service() {
        let service = Arc::new(SimulatedService::with_records(
            Arc::new(Simulator::deterministic()),
            fixtures::scopes(),
        ));
        let source = ScopeNames::new(service.clone());

        let names = source.names().await.unwrap();
        assert_eq!(names.first().map(String::as_str), Some("profiles.read"));
        assert_eq!(names.len(), fixtures::scopes().len());

        service.force_failure(Operation::GetAll);
        assert!(matches!(source.names().await, Err(ApiError::Unsuccessful(_))));
    }
}
