//! Wiring of the simulated backend, the notifier and the three controllers.

use std::sync::Arc;

use adminconsole_api::{
    fixtures, PartnerService, ProfileService, ScopeNames, ScopeService, Simulator,
};
use adminconsole_auth::UserContextService;
use adminconsole_core::{Partner, Profile, Scope};

use crate::dialog::{ConfirmationDialog, FormDialog};
use crate::features::{PartnersController, ProfilesController, ScopesController};
use crate::forms::{PartnerForm, ProfileForm, ScopeForm};
use crate::notification::Notifier;

/// Shared collaborators of one console session.
#[derive(Debug)]
pub struct ConsoleServices {
    pub profiles: Arc<ProfileService>,
    pub scopes: Arc<ScopeService>,
    pub partners: Arc<PartnerService>,
    pub notifier: Notifier,
    pub user: Arc<UserContextService>,
}

impl ConsoleServices {
    /// Simulated services seeded with the fixture data; records are stamped
    /// with the current principal.
    pub fn simulated(simulator: Arc<Simulator>, notifier: Notifier, user: Arc<UserContextService>) -> Self {
        Self::with_records(
            simulator,
            notifier,
            user,
            fixtures::profiles(),
            fixtures::scopes(),
            fixtures::partners(),
        )
    }

    pub fn with_records(
        simulator: Arc<Simulator>,
        notifier: Notifier,
        user: Arc<UserContextService>,
        profiles: Vec<Profile>,
        scopes: Vec<Scope>,
        partners: Vec<Partner>,
    ) -> Self {
        let actor = user.current().principal;
        Self {
            profiles: Arc::new(
                ProfileService::with_records(simulator.clone(), profiles).with_actor(actor.clone()),
            ),
            scopes: Arc::new(
                ScopeService::with_records(simulator.clone(), scopes).with_actor(actor.clone()),
            ),
            partners: Arc::new(PartnerService::with_records(simulator, partners).with_actor(actor)),
            notifier,
            user,
        }
    }

    /// Profiles controller; scope names feed the profile form.
    pub fn profiles_controller(
        &self,
        forms: Arc<dyn FormDialog<ProfileForm>>,
        confirmation: Arc<dyn ConfirmationDialog>,
    ) -> ProfilesController {
        ProfilesController::new(
            self.profiles.clone(),
            self.notifier.clone(),
            forms,
            confirmation,
            self.user.subscribe(),
        )
        .with_reference(Arc::new(ScopeNames::new(self.scopes.clone())))
    }

    pub fn scopes_controller(
        &self,
        forms: Arc<dyn FormDialog<ScopeForm>>,
        confirmation: Arc<dyn ConfirmationDialog>,
    ) -> ScopesController {
        ScopesController::new(
            self.scopes.clone(),
            self.notifier.clone(),
            forms,
            confirmation,
            self.user.subscribe(),
        )
    }

    pub fn partners_controller(
        &self,
        forms: Arc<dyn FormDialog<PartnerForm>>,
        confirmation: Arc<dyn ConfirmationDialog>,
    ) -> PartnersController {
        PartnersController::new(
            self.partners.clone(),
            self.notifier.clone(),
            forms,
            confirmation,
            self.user.subscribe(),
        )
    }
}
