use adminconsole_core::{CreateScopeRequest, Scope, ScopeId, UpdateScopeRequest};

use super::{EntityForm, FormMode, Submission};
use crate::validators::{required, FormErrors, UniqueNameValidator, SCOPE_NAME_UNIQUE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFormContext {
    /// `(id, name)` of every scope currently loaded.
    pub existing: Vec<(ScopeId, String)>,
}

impl ScopeFormContext {
    pub fn from_scopes(scopes: &[Scope]) -> Self {
        Self {
            existing: scopes.iter().map(|s| (s.id.clone(), s.name.clone())).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeForm {
    mode: FormMode<ScopeId>,
    name: String,
    unique: UniqueNameValidator,
}

impl ScopeForm {
    fn build(mode: FormMode<ScopeId>, name: String, context: &ScopeFormContext) -> Self {
        let exclude = match &mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        };
        let unique = UniqueNameValidator::new(
            context.existing.iter().map(|(id, name)| (id, name.as_str())),
            exclude,
            SCOPE_NAME_UNIQUE,
        );
        Self { mode, name, unique }
    }

    pub fn mode(&self) -> &FormMode<ScopeId> {
        &self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
}

impl EntityForm for ScopeForm {
    type Entity = Scope;
    type Context = ScopeFormContext;
    type Create = CreateScopeRequest;
    type Update = UpdateScopeRequest;

    fn for_create(context: &Self::Context) -> Self {
        Self::build(FormMode::Create, String::new(), context)
    }

    fn for_edit(entity: &Scope, context: &Self::Context) -> Self {
        Self::build(FormMode::Edit(entity.id.clone()), entity.name.clone(), context)
    }

    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check("name", required(&self.name));
        errors.check("name", self.unique.validate(&self.name));
        errors
    }

    fn submit(&self) -> Result<Submission<Self::Create, Self::Update>, FormErrors> {
        self.validate().into_result(|| {
            let name = self.name.trim().to_string();
            match &self.mode {
                FormMode::Create => Submission::Create(CreateScopeRequest { name }),
                FormMode::Edit(id) => Submission::Update(UpdateScopeRequest {
                    id: id.clone(),
                    name,
                }),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes() -> Vec<Scope> {
        vec![
            Scope { id: ScopeId::new("s1"), name: "read".into() },
            Scope { id: ScopeId::new("s2"), name: "write".into() },
        ]
    }

    #[test]
    fn a_name_differing_only_in_case_is_rejected() {
        let context = ScopeFormContext::from_scopes(&scopes());
        let mut form = ScopeForm::for_create(&context);
        form.set_name("READ");

        let errors = form.submit().unwrap_err();
        assert!(errors.has("name", SCOPE_NAME_UNIQUE));
    }

    #[test]
    fn blank_name_is_required_not_duplicate() {
        let form = ScopeForm::for_create(&ScopeFormContext::from_scopes(&scopes()));
        let errors = form.validate();
        assert!(errors.has("name", "required"));
        assert!(!errors.has("name", SCOPE_NAME_UNIQUE));
    }

    #[test]
    fn editing_keeps_own_name_available() {
        let scopes = scopes();
        let context = ScopeFormContext::from_scopes(&scopes);
        let mut form = ScopeForm::for_edit(&scopes[0], &context);
        form.set_name(" Read ");

        match form.submit().unwrap() {
            Submission::Update(request) => {
                assert_eq!(request.id, ScopeId::new("s1"));
                assert_eq!(request.name, "Read");
            }
            Submission::Create(_) => panic!("edit form produced a create"),
        }

        form.set_name("write");
        assert!(form.validate().has("name", SCOPE_NAME_UNIQUE));
    }

    #[test]
    fn new_name_creates() {
        let mut form = ScopeForm::for_create(&ScopeFormContext::from_scopes(&scopes()));
        form.set_name("scopes.manage");
        assert_eq!(
            form.submit().unwrap(),
            Submission::Create(CreateScopeRequest { name: "scopes.manage".into() })
        );
    }
}
