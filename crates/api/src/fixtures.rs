//! Seed data served by the simulated backend.

use chrono::{DateTime, Utc};

use adminconsole_core::{Partner, PartnerId, PartnerStatus, Profile, ProfileId, Scope, ScopeId};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

pub fn scopes() -> Vec<Scope> {
    [
        ("s1", "profiles.read"),
        ("s2", "profiles.write"),
        ("s3", "partners.read"),
        ("s4", "partners.write"),
        ("s5", "scopes.manage"),
    ]
    .into_iter()
    .map(|(id, name)| Scope {
        id: ScopeId::new(id),
        name: name.to_string(),
    })
    .collect()
}

pub fn profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: ProfileId::new("pr1"),
            code: "ADMIN".to_string(),
            description: "Full administration of the back-office".to_string(),
            scopes: scopes().into_iter().map(|s| s.name).collect(),
            created_at: at(1_704_067_200),
            last_modified_by: "system".to_string(),
        },
        Profile {
            id: ProfileId::new("pr2"),
            code: "USER".to_string(),
            description: "Standard operator".to_string(),
            scopes: vec!["profiles.read".to_string(), "partners.read".to_string()],
            created_at: at(1_706_745_600),
            last_modified_by: "j.martin".to_string(),
        },
        Profile {
            id: ProfileId::new("pr3"),
            code: "PARTNER_MANAGER".to_string(),
            description: "Manages integration partners".to_string(),
            scopes: vec!["partners.read".to_string(), "partners.write".to_string()],
            created_at: at(1_709_251_200),
            last_modified_by: "a.dupont".to_string(),
        },
    ]
}

pub fn partners() -> Vec<Partner> {
    vec![
        Partner {
            id: PartnerId::new("p1"),
            status: PartnerStatus::Active,
            hosting_type: "CLOUD".to_string(),
            alias: "acme".to_string(),
            queue_name: "ACME.ORDERS.IN".to_string(),
            application: "orders".to_string(),
            description: "Order intake from ACME".to_string(),
            created_at: at(1_704_067_200),
        },
        Partner {
            id: PartnerId::new("p2"),
            status: PartnerStatus::Inactive,
            hosting_type: "ON_PREMISE".to_string(),
            alias: "globex".to_string(),
            queue_name: "GLOBEX.INVOICES.OUT".to_string(),
            application: "billing".to_string(),
            description: "Invoice export (suspended)".to_string(),
            created_at: at(1_709_251_200),
        },
    ]
}
