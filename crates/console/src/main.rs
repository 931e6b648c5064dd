//! Headless console session against the simulated backend.
//!
//! Loads the three screens, creates a partner and a scope, searches, and
//! attempts to delete the protected profile. Toasts go to the log.

use std::sync::Arc;

use adminconsole_api::Simulator;
use adminconsole_auth::UserContextService;
use adminconsole_console::{
    ConsoleConfig, ConsoleServices, Notifier, ScriptedConfirmation, ScriptedFormDialog,
    TracingToastSink,
};
use adminconsole_console::forms::{PartnerForm, ProfileForm, ScopeForm};
use adminconsole_console::table::ActionKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    adminconsole_observability::init_pretty();

    let config = ConsoleConfig::from_env();
    tracing::info!(
        user = %config.user.principal,
        rank3 = config.user.has_rank3_scope,
        delay_ms = config.simulator.delay.as_millis() as u64,
        failure_rate = config.simulator.failure_rate,
        "starting headless console session"
    );

    let catalog = config.load_catalog()?;
    let notifier = Notifier::new(Arc::new(catalog), Arc::new(TracingToastSink));
    let user = Arc::new(UserContextService::new(config.user.clone()));
    let simulator = Arc::new(Simulator::new(&config.simulator));
    let services = ConsoleServices::simulated(simulator, notifier, user);

    let confirmation = Arc::new(ScriptedConfirmation::accepting());

    let profile_forms = Arc::new(ScriptedFormDialog::<ProfileForm>::new());
    let profiles = services.profiles_controller(profile_forms, confirmation.clone());

    let scope_forms = Arc::new(ScriptedFormDialog::<ScopeForm>::new());
    scope_forms.push_submit(|form| {
        form.set_name("invoices.read");
    });
    let scopes = services.scopes_controller(scope_forms, confirmation.clone());

    let partner_forms = Arc::new(ScriptedFormDialog::<PartnerForm>::new());
    partner_forms.push_submit(|form| {
        form.set_alias("initech")
            .set_queue_name("INITECH.ORDERS.IN")
            .set_application("orders")
            .set_hosting_type("CLOUD");
    });
    let partners = services.partners_controller(partner_forms, confirmation);

    tokio::join!(profiles.mount(), scopes.mount(), partners.mount());

    scopes.open_create().await;
    partners.open_create().await;

    profiles.search("admin");
    tracing::info!(matches = profiles.displayed().len(), "profiles matching \"admin\"");

    match profiles.displayed().first() {
        Some(admin) if profiles.invoke(ActionKind::Delete, &admin.id.to_string()).is_none() => {
            tracing::info!(code = %admin.code, "delete is not offered for the protected profile");
        }
        _ => {}
    }
    profiles.search("");

    for (feature, count) in [
        ("profiles", profiles.items().len()),
        ("scopes", scopes.items().len()),
        ("partners", partners.items().len()),
    ] {
        tracing::info!(feature, count, "records loaded");
    }

    profiles.teardown();
    scopes.teardown();
    partners.teardown();
    Ok(())
}
