use adminconsole_auth::UserContext;
use adminconsole_core::{CreatePartnerRequest, Partner, PartnerStatus};

use crate::controller::{Feature, FeatureMessages, ListController};
use crate::forms::{PartnerForm, PartnerFormContext};
use crate::i18n::MessageParams;
use crate::table::{CellValue, ColumnSpec, TableRow};

#[derive(Debug, Clone, Copy, Default)]
pub struct Partners;

pub type PartnersController = ListController<Partners>;

impl Feature for Partners {
    type Entity = Partner;
    type Form = PartnerForm;

    const KEY: &'static str = "partners";

    fn messages() -> FeatureMessages {
        FeatureMessages {
            created: "partners.created",
            updated: "partners.updated",
            deleted: "partners.deleted",
            delete_confirm: "partners.delete_confirm",
        }
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::text("status", "partners.status"),
            ColumnSpec::text("hostingType", "partners.hosting_type"),
            ColumnSpec::text("alias", "partners.alias"),
            ColumnSpec::text("queueName", "partners.queue_name"),
            ColumnSpec::text("application", "partners.application"),
            ColumnSpec::text("description", "partners.description").unsortable(),
            ColumnSpec::date("createdAt", "profile.created_at"),
        ]
    }

    fn confirmation_params(partner: &Partner) -> MessageParams {
        MessageParams::new().with("alias", partner.alias.as_str())
    }

    fn form_context(items: &[Partner], _reference: &[String], user: &UserContext) -> PartnerFormContext {
        PartnerFormContext::from_partners(items, user.has_rank3_scope)
    }

    /// Rank-3 users create active partners unless they picked a status.
    fn prepare_create(request: &mut CreatePartnerRequest, user: &UserContext) {
        if user.has_rank3_scope && request.status.is_none() {
            request.status = Some(PartnerStatus::Active);
        }
    }
}

impl TableRow for Partner {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "status" => CellValue::Text(self.status.to_string()),
            "hostingType" => CellValue::Text(self.hosting_type.clone()),
            "alias" => CellValue::Text(self.alias.clone()),
            "queueName" => CellValue::Text(self.queue_name.clone()),
            "application" => CellValue::Text(self.application.clone()),
            "description" => CellValue::Text(self.description.clone()),
            "createdAt" => CellValue::Date(self.created_at),
            _ => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: Option<PartnerStatus>) -> CreatePartnerRequest {
        CreatePartnerRequest {
            status,
            hosting_type: "CLOUD".into(),
            alias: "initech".into(),
            queue_name: "INITECH.IN".into(),
            application: "billing".into(),
            description: String::new(),
        }
    }

    #[test]
    fn rank3_defaults_missing_status_to_active() {
        let rank3 = UserContext::new("ops", true);
        let mut missing = request(None);
        Partners::prepare_create(&mut missing, &rank3);
        assert_eq!(missing.status, Some(PartnerStatus::Active));

        let mut chosen = request(Some(PartnerStatus::Inactive));
        Partners::prepare_create(&mut chosen, &rank3);
        assert_eq!(chosen.status, Some(PartnerStatus::Inactive));

        let mut plain = request(None);
        Partners::prepare_create(&mut plain, &UserContext::new("clerk", false));
        assert_eq!(plain.status, None);
    }
}
