use chrono::{DateTime, Utc};

use adminconsole_core::{
    CreatePartnerRequest, CreateProfileRequest, CreateScopeRequest, Partner, PartnerId,
    PartnerStatus, Profile, ProfileId, Scope, ScopeId, UpdatePartnerRequest, UpdateProfileRequest,
    UpdateScopeRequest,
};

use crate::service::SimulatedEntity;

impl SimulatedEntity for Profile {
    type Create = CreateProfileRequest;
    type Update = UpdateProfileRequest;

    const NAME: &'static str = "profile";

    fn create(request: Self::Create, actor: &str, now: DateTime<Utc>) -> Self {
        Profile {
            id: ProfileId::generate(),
            code: request.code,
            description: request.description,
            scopes: request.scopes,
            created_at: now,
            last_modified_by: actor.to_string(),
        }
    }

    fn target(request: &Self::Update) -> &ProfileId {
        &request.id
    }

    fn updated(&self, request: Self::Update, actor: &str) -> Self {
        Profile {
            id: self.id.clone(),
            code: request.code,
            description: request.description,
            scopes: request.scopes,
            created_at: self.created_at,
            last_modified_by: actor.to_string(),
        }
    }
}

impl SimulatedEntity for Scope {
    type Create = CreateScopeRequest;
    type Update = UpdateScopeRequest;

    const NAME: &'static str = "scope";

    fn create(request: Self::Create, _actor: &str, _now: DateTime<Utc>) -> Self {
        Scope {
            id: ScopeId::generate(),
            name: request.name,
        }
    }

    fn target(request: &Self::Update) -> &ScopeId {
        &request.id
    }

    fn updated(&self, request: Self::Update, _actor: &str) -> Self {
        Scope {
            id: self.id.clone(),
            name: request.name,
        }
    }
}

impl SimulatedEntity for Partner {
    type Create = CreatePartnerRequest;
    type Update = UpdatePartnerRequest;

    const NAME: &'static str = "partner";

    /// Partners registered without an explicit status start inactive.
    fn create(request: Self::Create, _actor: &str, now: DateTime<Utc>) -> Self {
        Partner {
            id: PartnerId::generate(),
            status: request.status.unwrap_or(PartnerStatus::Inactive),
            hosting_type: request.hosting_type,
            alias: request.alias,
            queue_name: request.queue_name,
            application: request.application,
            description: request.description,
            created_at: now,
        }
    }

    fn target(request: &Self::Update) -> &PartnerId {
        &request.id
    }

    fn updated(&self, request: Self::Update, _actor: &str) -> Self {
        Partner {
            id: self.id.clone(),
            status: request.status,
            hosting_type: request.hosting_type,
            alias: request.alias,
            queue_name: request.queue_name,
            application: request.application,
            description: request.description,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fixtures;
    use crate::service::{EntityApi, Operation, SimulatedService};
    use crate::simulator::Simulator;

    fn simulator() -> Arc<Simulator> {
        Arc::new(Simulator::deterministic())
    }

    #[tokio::test]
    async fn get_all_returns_the_seeded_records() {
        let service = SimulatedService::with_records(simulator(), fixtures::scopes());
        let response = service.get_all().await.unwrap();
        assert!(response.success);
        assert_eq!(response.data.unwrap(), fixtures::scopes());
        assert_eq!(service.calls(Operation::GetAll), 1);
    }

    #[tokio::test]
    async fn create_assigns_id_and_stores_the_record() {
        let service: SimulatedService<Profile> =
            SimulatedService::new(simulator()).with_actor("alice");
        let response = service
            .create(CreateProfileRequest {
                code: "AUDITOR".into(),
                description: "Read-only".into(),
                scopes: vec!["profiles.read".into()],
            })
            .await
            .unwrap();

        let created = response.data.unwrap();
        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.last_modified_by, "alice");
        assert_eq!(service.records(), vec![created]);
    }

    #[tokio::test]
    async fn forced_create_failure_leaves_the_store_untouched() {
        let service: SimulatedService<Scope> = SimulatedService::new(simulator());
        service.force_failure(Operation::Create);

        let response = service
            .create(CreateScopeRequest { name: "x".into() })
            .await
            .unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(service.records().is_empty());

        service.clear_forced_failures();
        let response = service
            .create(CreateScopeRequest { name: "x".into() })
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(service.records().len(), 1);
    }

    #[tokio::test]
    async fn update_preserves_identity_and_creation_time() {
        let service = SimulatedService::with_records(simulator(), fixtures::partners());
        let original = fixtures::partners().remove(0);

        let response = service
            .update(UpdatePartnerRequest {
                id: original.id.clone(),
                status: PartnerStatus::Inactive,
                hosting_type: original.hosting_type.clone(),
                alias: "renamed".into(),
                queue_name: original.queue_name.clone(),
                application: original.application.clone(),
                description: original.description.clone(),
            })
            .await
            .unwrap();

        let updated = response.data.unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.alias, "renamed");
        assert_eq!(service.records()[0], updated);
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_ids_report_not_found() {
        let service = SimulatedService::with_records(simulator(), fixtures::scopes());

        let response = service
            .update(UpdateScopeRequest {
                id: ScopeId::new("missing"),
                name: "x".into(),
            })
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "scope missing not found");

        let response = service.delete(&ScopeId::new("missing")).await.unwrap();
        assert!(!response.success);
        assert_eq!(service.records().len(), fixtures::scopes().len());
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let service = SimulatedService::with_records(simulator(), fixtures::partners());
        let id = PartnerId::new("p1");

        let response = service.delete(&id).await.unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(true));
        assert!(service.records().iter().all(|p| p.id != id));
    }

    #[tokio::test]
    async fn partner_created_without_status_starts_inactive() {
        let service: SimulatedService<Partner> = SimulatedService::new(simulator());
        let response = service
            .create(CreatePartnerRequest {
                status: None,
                hosting_type: "CLOUD".into(),
                alias: "acme".into(),
                queue_name: "acme.in".into(),
                application: "billing".into(),
                description: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(response.data.unwrap().status, PartnerStatus::Inactive);
    }
}
