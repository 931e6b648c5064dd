use adminconsole_core::{CreateProfileRequest, Profile, ProfileId, UpdateProfileRequest};

use super::{EntityForm, FormMode, Submission};
use crate::validators::{max_length, required, FormErrors};

pub const CODE_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormContext {
    /// Scope names offered for selection.
    pub available_scopes: Vec<String>,
}

/// Create/edit form of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    mode: FormMode<ProfileId>,
    code: String,
    description: String,
    scopes: Vec<String>,
    available_scopes: Vec<String>,
}

impl ProfileForm {
    pub fn mode(&self) -> &FormMode<ProfileId> {
        &self.mode
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn available_scopes(&self) -> &[String] {
        &self.available_scopes
    }

    pub fn set_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.code = code.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn set_scopes<I, S>(&mut self, scopes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Select `scope` if unselected, unselect it otherwise.
    pub fn toggle_scope(&mut self, scope: &str) -> &mut Self {
        let before = self.scopes.len();
        self.scopes.retain(|s| !s.eq_ignore_ascii_case(scope));
        if self.scopes.len() == before {
            self.scopes.push(scope.to_string());
        }
        self
    }

    /// Selected scopes, trimmed, blanks dropped, first occurrence wins.
    fn normalized_scopes(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for scope in &self.scopes {
            let scope = scope.trim();
            let key = scope.to_lowercase();
            if scope.is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(scope.to_string());
        }
        out
    }
}

impl EntityForm for ProfileForm {
    type Entity = Profile;
    type Context = ProfileFormContext;
    type Create = CreateProfileRequest;
    type Update = UpdateProfileRequest;

    fn for_create(context: &Self::Context) -> Self {
        Self {
            mode: FormMode::Create,
            code: String::new(),
            description: String::new(),
            scopes: Vec::new(),
            available_scopes: context.available_scopes.clone(),
        }
    }

    fn for_edit(entity: &Profile, context: &Self::Context) -> Self {
        Self {
            mode: FormMode::Edit(entity.id.clone()),
            code: entity.code.clone(),
            description: entity.description.clone(),
            scopes: entity.scopes.clone(),
            available_scopes: context.available_scopes.clone(),
        }
    }

    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check("code", required(&self.code));
        errors.check("code", max_length(&self.code, CODE_MAX_LEN));
        errors.check("description", max_length(&self.description, DESCRIPTION_MAX_LEN));
        errors
    }

    fn submit(&self) -> Result<Submission<Self::Create, Self::Update>, FormErrors> {
        self.validate().into_result(|| {
            let code = self.code.trim().to_string();
            let description = self.description.trim().to_string();
            let scopes = self.normalized_scopes();
            match &self.mode {
                FormMode::Create => Submission::Create(CreateProfileRequest {
                    code,
                    description,
                    scopes,
                }),
                FormMode::Edit(id) => Submission::Update(UpdateProfileRequest {
                    id: id.clone(),
                    code,
                    description,
                    scopes,
                }),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn context() -> ProfileFormContext {
        ProfileFormContext {
            available_scopes: vec!["profiles.read".into(), "profiles.write".into()],
        }
    }

    #[test]
    fn code_is_required() {
        let form = ProfileForm::for_create(&context());
        let errors = form.submit().unwrap_err();
        assert!(errors.has("code", "required"));
    }

    #[test]
    fn overly_long_fields_block_submission() {
        let mut form = ProfileForm::for_create(&context());
        form.set_code("X".repeat(CODE_MAX_LEN + 1))
            .set_description("d".repeat(DESCRIPTION_MAX_LEN + 1));
        let errors = form.submit().unwrap_err();
        assert!(errors.has("code", "maxlength"));
        assert!(errors.has("description", "maxlength"));
    }

    #[test]
    fn create_payload_trims_and_dedups_scopes() {
        let mut form = ProfileForm::for_create(&context());
        form.set_code("  AUDITOR ")
            .set_scopes(["profiles.read", " PROFILES.READ", "", "profiles.write"]);

        let Submission::Create(request) = form.submit().unwrap() else {
            panic!("create form produced an update");
        };
        assert_eq!(request.code, "AUDITOR");
        assert_eq!(request.scopes, vec!["profiles.read", "profiles.write"]);
    }

    #[test]
    fn toggling_a_scope_twice_unselects_it() {
        let mut form = ProfileForm::for_create(&context());
        form.toggle_scope("profiles.read").toggle_scope("profiles.write");
        form.toggle_scope("PROFILES.READ");
        assert_eq!(form.scopes(), ["profiles.write"]);
    }

    #[test]
    fn edit_form_works_on_a_copy_and_targets_the_record() {
        let profile = Profile {
            id: ProfileId::new("pr2"),
            code: "USER".into(),
            description: "Operator".into(),
            scopes: vec!["profiles.read".into()],
            created_at: Utc::now(),
            last_modified_by: "system".into(),
        };
        let mut form = ProfileForm::for_edit(&profile, &context());
        form.set_code("OPERATOR");

        assert_eq!(profile.code, "USER");
        assert_eq!(form.available_scopes().len(), 2);
        match form.submit().unwrap() {
            Submission::Update(request) => {
                assert_eq!(request.id, profile.id);
                assert_eq!(request.code, "OPERATOR");
                assert_eq!(request.scopes, profile.scopes);
            }
            Submission::Create(_) => panic!("edit form produced a create"),
        }
    }
}
