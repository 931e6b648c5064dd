use adminconsole_auth::UserContext;
use adminconsole_core::Scope;

use crate::controller::{Feature, FeatureMessages, ListController};
use crate::forms::{ScopeForm, ScopeFormContext};
use crate::i18n::MessageParams;
use crate::table::{CellValue, ColumnSpec, TableRow};

#[derive(Debug, Clone, Copy, Default)]
pub struct Scopes;

pub type ScopesController = ListController<Scopes>;

impl Feature for Scopes {
    type Entity = Scope;
    type Form = ScopeForm;

    const KEY: &'static str = "scopes";

    fn messages() -> FeatureMessages {
        FeatureMessages {
            created: "scopes.created",
            updated: "scopes.updated",
            deleted: "scopes.deleted",
            delete_confirm: "scopes.delete_confirm",
        }
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![ColumnSpec::text("name", "scopes.name")]
    }

    fn confirmation_params(scope: &Scope) -> MessageParams {
        MessageParams::new().with("name", scope.name.as_str())
    }

    /// Uniqueness is checked against the scopes on screen.
    fn form_context(items: &[Scope], _reference: &[String], _user: &UserContext) -> ScopeFormContext {
        ScopeFormContext::from_scopes(items)
    }
}

impl TableRow for Scope {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::Text(self.name.clone()),
            _ => CellValue::Empty,
        }
    }
}
