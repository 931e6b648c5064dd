//! Client-side search over the authoritative collection.

use adminconsole_core::{Partner, Profile, Scope};

/// Records that can be matched against a search term.
pub trait Searchable {
    /// String fields the search looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether any field contains `needle` (already lowercased).
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Order-preserving filter of `items` by `term`, case-insensitive.
///
/// An empty term yields a fresh copy of the whole collection.
pub fn apply_filter<E: Searchable + Clone>(items: &[E], term: &str) -> Vec<E> {
    if term.is_empty() {
        return items.to_vec();
    }

    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches(&needle))
        .cloned()
        .collect()
}

impl Searchable for Profile {
    /// Scope names are searched one by one.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.code.as_str(),
            self.description.as_str(),
            self.last_modified_by.as_str(),
        ];
        fields.extend(self.scopes.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Scope {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for Partner {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.alias.as_str(),
            self.queue_name.as_str(),
            self.application.as_str(),
            self.description.as_str(),
            self.hosting_type.as_str(),
            self.status.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminconsole_core::{PartnerId, PartnerStatus, ProfileId};
    use chrono::Utc;
    use proptest::prelude::*;

    fn profile(id: &str, code: &str, scopes: &[&str]) -> Profile {
        Profile {
            id: ProfileId::new(id),
            code: code.to_string(),
            description: String::new(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
            last_modified_by: "system".to_string(),
        }
    }

    fn partner(id: &str, alias: &str, status: PartnerStatus) -> Partner {
        Partner {
            id: PartnerId::new(id),
            status,
            hosting_type: "CLOUD".to_string(),
            alias: alias.to_string(),
            queue_name: format!("{alias}.in"),
            application: "orders".to_string(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn admin_search_keeps_only_the_admin_profile() {
        let profiles = vec![profile("1", "ADMIN", &[]), profile("2", "USER", &[])];
        let displayed = apply_filter(&profiles, "Admin");
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].code, "ADMIN");
    }

    #[test]
    fn profile_scopes_are_searched_element_wise() {
        let profiles = vec![
            profile("1", "OPS", &["partners.write"]),
            profile("2", "READER", &["profiles.read"]),
        ];
        let displayed = apply_filter(&profiles, "PARTNERS.W");
        assert_eq!(displayed.iter().map(|p| p.code.as_str()).collect::<Vec<_>>(), ["OPS"]);
    }

    #[test]
    fn partner_status_is_searchable() {
        let partners = vec![
            partner("p1", "acme", PartnerStatus::Active),
            partner("p2", "globex", PartnerStatus::Inactive),
        ];
        let displayed = apply_filter(&partners, "inactive");
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].alias, "globex");
    }

    #[test]
    fn empty_term_copies_the_whole_collection() {
        let profiles = vec![profile("1", "ADMIN", &[]), profile("2", "USER", &[])];
        let displayed = apply_filter(&profiles, "");
        assert_eq!(displayed, profiles);
        assert_ne!(displayed.as_ptr(), profiles.as_ptr());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the filter keeps exactly the matching scopes, in order.
        #[test]
        fn filter_keeps_exactly_the_matching_records(
            names in prop::collection::vec("[a-zA-Z.]{0,12}", 0..20),
            term in "[a-zA-Z.]{1,3}"
        ) {
            let scopes: Vec<Scope> = names
                .iter()
                .enumerate()
                .map(|(i, name)| Scope { id: adminconsole_core::ScopeId::new(i.to_string()), name: name.clone() })
                .collect();

            let displayed = apply_filter(&scopes, &term);
            let needle = term.to_lowercase();

            for scope in &displayed {
                prop_assert!(scope.name.to_lowercase().contains(&needle));
            }
            let expected: Vec<&Scope> = scopes
                .iter()
                .filter(|s| s.name.to_lowercase().contains(&needle))
                .collect();
            prop_assert_eq!(displayed.iter().collect::<Vec<_>>(), expected);
        }
    }
}
