use adminconsole_auth::UserContext;
use adminconsole_core::Profile;

use crate::controller::{Feature, FeatureMessages, ListController};
use crate::forms::{ProfileForm, ProfileFormContext};
use crate::i18n::MessageParams;
use crate::table::{CellValue, ColumnSpec, TableRow};

/// Profiles screen. The `ADMIN` profile cannot be deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Profiles;

pub type ProfilesController = ListController<Profiles>;

impl Feature for Profiles {
    type Entity = Profile;
    type Form = ProfileForm;

    const KEY: &'static str = "profiles";

    fn messages() -> FeatureMessages {
        FeatureMessages {
            created: "profile.created",
            updated: "profile.updated",
            deleted: "profile.deleted",
            delete_confirm: "profile.delete_confirm",
        }
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::text("code", "profile.code"),
            ColumnSpec::text("description", "profile.description"),
            ColumnSpec::array("scopes", "profile.scopes").unsortable(),
            ColumnSpec::date("createdAt", "profile.created_at"),
            ColumnSpec::text("lastModifiedBy", "profile.last_modified_by"),
        ]
    }

    fn deletable(profile: &Profile) -> bool {
        !profile.is_protected()
    }

    fn confirmation_params(profile: &Profile) -> MessageParams {
        MessageParams::new().with("code", profile.code.as_str())
    }

    fn form_context(_items: &[Profile], reference: &[String], _user: &UserContext) -> ProfileFormContext {
        ProfileFormContext {
            available_scopes: reference.to_vec(),
        }
    }
}

impl TableRow for Profile {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "code" => CellValue::Text(self.code.clone()),
            "description" => CellValue::Text(self.description.clone()),
            "scopes" => CellValue::List(self.scopes.clone()),
            "createdAt" => CellValue::Date(self.created_at),
            "lastModifiedBy" => CellValue::Text(self.last_modified_by.clone()),
            _ => CellValue::Empty,
        }
    }
}
