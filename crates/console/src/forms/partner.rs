use adminconsole_core::{
    CreatePartnerRequest, Partner, PartnerId, PartnerStatus, UpdatePartnerRequest,
};

use super::{EntityForm, FormMode, Submission};
use crate::validators::{
    max_length, required, FieldError, FormErrors, UniqueNameValidator, QUEUE_NAME_UNIQUE,
};

pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerFormContext {
    /// `(id, queue name)` of every partner currently loaded.
    pub existing_queue_names: Vec<(PartnerId, String)>,
    pub has_rank3_scope: bool,
}

impl PartnerFormContext {
    pub fn from_partners(partners: &[Partner], has_rank3_scope: bool) -> Self {
        Self {
            existing_queue_names: partners
                .iter()
                .map(|p| (p.id.clone(), p.queue_name.clone()))
                .collect(),
            has_rank3_scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerForm {
    mode: FormMode<PartnerId>,
    status: Option<PartnerStatus>,
    status_editable: bool,
    hosting_type: String,
    alias: String,
    queue_name: String,
    application: String,
    description: String,
    unique_queue: UniqueNameValidator,
}

impl PartnerForm {
    fn unique_queue(context: &PartnerFormContext, exclude: Option<&PartnerId>) -> UniqueNameValidator {
        UniqueNameValidator::new(
            context
                .existing_queue_names
                .iter()
                .map(|(id, name)| (id, name.as_str())),
            exclude,
            QUEUE_NAME_UNIQUE,
        )
    }

    pub fn mode(&self) -> &FormMode<PartnerId> {
        &self.mode
    }

    pub fn status(&self) -> Option<PartnerStatus> {
        self.status
    }

    /// New partners get a status picker only for rank-3 users; existing
    /// partners always have one.
    pub fn is_status_editable(&self) -> bool {
        self.status_editable
    }

    /// Ignored while the status is not editable.
    pub fn set_status(&mut self, status: Option<PartnerStatus>) -> &mut Self {
        if self.status_editable {
            self.status = status;
        }
        self
    }

    pub fn set_hosting_type(&mut self, hosting_type: impl Into<String>) -> &mut Self {
        self.hosting_type = hosting_type.into();
        self
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = alias.into();
        self
    }

    pub fn set_queue_name(&mut self, queue_name: impl Into<String>) -> &mut Self {
        self.queue_name = queue_name.into();
        self
    }

    pub fn set_application(&mut self, application: impl Into<String>) -> &mut Self {
        self.application = application.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }
}

impl EntityForm for PartnerForm {
    type Entity = Partner;
    type Context = PartnerFormContext;
    type Create = CreatePartnerRequest;
    type Update = UpdatePartnerRequest;

    fn for_create(context: &Self::Context) -> Self {
        Self {
            mode: FormMode::Create,
            status: None,
            status_editable: context.has_rank3_scope,
            hosting_type: String::new(),
            alias: String::new(),
            queue_name: String::new(),
            application: String::new(),
            description: String::new(),
            unique_queue: Self::unique_queue(context, None),
        }
    }

    fn for_edit(entity: &Partner, context: &Self::Context) -> Self {
        Self {
            mode: FormMode::Edit(entity.id.clone()),
            status: Some(entity.status),
            status_editable: true,
            hosting_type: entity.hosting_type.clone(),
            alias: entity.alias.clone(),
            queue_name: entity.queue_name.clone(),
            application: entity.application.clone(),
            description: entity.description.clone(),
            unique_queue: Self::unique_queue(context, Some(&entity.id)),
        }
    }

    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check("alias", required(&self.alias));
        errors.check("queueName", required(&self.queue_name));
        errors.check("queueName", self.unique_queue.validate(&self.queue_name));
        errors.check("application", required(&self.application));
        errors.check("hostingType", required(&self.hosting_type));
        errors.check("description", max_length(&self.description, DESCRIPTION_MAX_LEN));
        if self.mode.is_edit() && self.status.is_none() {
            errors.add("status", FieldError::Required);
        }
        errors
    }

    fn submit(&self) -> Result<Submission<Self::Create, Self::Update>, FormErrors> {
        let errors = self.validate();
        let status = match (&self.mode, self.status) {
            (FormMode::Edit(id), Some(status)) => Some((id, status)),
            _ => None,
        };
        errors.into_result(|| {
            let hosting_type = self.hosting_type.trim().to_string();
            let alias = self.alias.trim().to_string();
            let queue_name = self.queue_name.trim().to_string();
            let application = self.application.trim().to_string();
            let description = self.description.trim().to_string();
            match status {
                Some((id, status)) => Submission::Update(UpdatePartnerRequest {
                    id: id.clone(),
                    status,
                    hosting_type,
                    alias,
                    queue_name,
                    application,
                    description,
                }),
                None => Submission::Create(CreatePartnerRequest {
                    status: self.status,
                    hosting_type,
                    alias,
                    queue_name,
                    application,
                    description,
                }),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn acme() -> Partner {
        Partner {
            id: PartnerId::new("p1"),
            status: PartnerStatus::Active,
            hosting_type: "CLOUD".into(),
            alias: "acme".into(),
            queue_name: "ACME.ORDERS.IN".into(),
            application: "orders".into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    fn filled(form: &mut PartnerForm, queue: &str) {
        form.set_alias("initech")
            .set_queue_name(queue)
            .set_application("billing")
            .set_hosting_type("CLOUD");
    }

    #[test]
    fn required_fields_are_reported_by_wire_name() {
        let form = PartnerForm::for_create(&PartnerFormContext::default());
        let errors = form.validate();
        for field in ["alias", "queueName", "application", "hostingType"] {
            assert!(errors.has(field, "required"), "{field} should be required");
        }
        assert!(errors.field("status").is_empty());
    }

    #[test]
    fn queue_name_must_be_unique_ignoring_case() {
        let context = PartnerFormContext::from_partners(&[acme()], false);
        let mut form = PartnerForm::for_create(&context);
        filled(&mut form, "acme.orders.in");

        let errors = form.submit().unwrap_err();
        assert!(errors.has("queueName", QUEUE_NAME_UNIQUE));
    }

    #[test]
    fn status_is_locked_on_create_without_rank3() {
        let mut form = PartnerForm::for_create(&PartnerFormContext::default());
        assert!(!form.is_status_editable());
        form.set_status(Some(PartnerStatus::Active));
        filled(&mut form, "INITECH.IN");

        let Submission::Create(request) = form.submit().unwrap() else {
            panic!("create form produced an update");
        };
        assert_eq!(request.status, None);
        assert_eq!(request.queue_name, "INITECH.IN");
    }

    #[test]
    fn rank3_users_may_pick_the_initial_status() {
        let mut form = PartnerForm::for_create(&PartnerFormContext::from_partners(&[], true));
        form.set_status(Some(PartnerStatus::Inactive));
        filled(&mut form, "INITECH.IN");

        let Submission::Create(request) = form.submit().unwrap() else {
            panic!("create form produced an update");
        };
        assert_eq!(request.status, Some(PartnerStatus::Inactive));
    }

    #[test]
    fn editing_keeps_own_queue_and_requires_a_status() {
        let partner = acme();
        let context = PartnerFormContext::from_partners(&[partner.clone()], false);
        let mut form = PartnerForm::for_edit(&partner, &context);
        form.set_description("orders intake");

        match form.submit().unwrap() {
            Submission::Update(request) => {
                assert_eq!(request.id, partner.id);
                assert_eq!(request.queue_name, "ACME.ORDERS.IN");
                assert_eq!(request.description, "orders intake");
            }
            Submission::Create(_) => panic!("edit form produced a create"),
        }

        form.set_status(None);
        assert!(form.submit().unwrap_err().has("status", "required"));
    }
}
