//! Message catalog and key translation.
//!
//! Keys are opaque dotted strings (`common.error`, `profile.code`). A key the
//! catalog does not know is shown as-is.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use thiserror::Error;

/// Named values substituted into `{{name}}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParams(Vec<(String, String)>);

impl MessageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Resolves message keys into display text.
pub trait Translator: Send + Sync {
    /// Translated text, or the raw key when unresolved. Never fails.
    fn translate(&self, key: &str, params: &MessageParams) -> String;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog root must be a JSON object")]
    NotAnObject,
}

/// Flat key → text catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English texts for every key the console emits.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        for (key, text) in DEFAULT_MESSAGES {
            catalog.insert(*key, *text);
        }
        catalog
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of `other` win over existing ones.
    pub fn merged(mut self, other: Catalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Parse a catalog from JSON. Nested objects become dotted keys:
    /// `{"common": {"error": "x"}}` defines `common.error`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(root) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut catalog = Self::new();
        for (key, value) in root {
            catalog.flatten(key, value);
        }
        Ok(catalog)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message catalog at {:?}", path))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse message catalog at {:?}", path))
    }

    fn flatten(&mut self, prefix: String, value: Value) {
        match value {
            Value::Object(map) => {
                for (key, nested) in map {
                    self.flatten(format!("{prefix}.{key}"), nested);
                }
            }
            Value::String(text) => self.insert(prefix, text),
            Value::Null => {}
            other => self.insert(prefix, other.to_string()),
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &MessageParams) -> String {
        match self.get(key) {
            Some(text) => interpolate(text, params),
            None => key.to_string(),
        }
    }
}

/// Substitute `{{name}}` (spaces inside the braces allowed) with param values.
pub fn interpolate(text: &str, params: &MessageParams) -> String {
    let mut out = text.to_string();
    for (name, value) in params.iter() {
        out = out
            .replace(&format!("{{{{{name}}}}}"), value)
            .replace(&format!("{{{{ {name} }}}}"), value);
    }
    out
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("common.success", "Operation completed successfully"),
    ("common.error", "An error occurred"),
    ("common.edit", "Edit"),
    ("common.delete", "Delete"),
    ("common.cancel", "Cancel"),
    ("common.confirm_delete_title", "Confirm deletion"),
    ("common.load_error", "Unable to load data"),
    ("common.create_error", "Creation failed"),
    ("common.update_error", "Update failed"),
    ("common.delete_error", "Deletion failed"),
    ("profile.code", "Code"),
    ("profile.description", "Description"),
    ("profile.scopes", "Scopes"),
    ("profile.created_at", "Created at"),
    ("profile.last_modified_by", "Last modified by"),
    ("profile.created", "Profile created successfully"),
    ("profile.updated", "Profile updated successfully"),
    ("profile.deleted", "Profile deleted successfully"),
    ("profile.delete_confirm", "Delete profile \"{{code}}\"?"),
    ("scopes.name", "Name"),
    ("scopes.created", "Scope created successfully"),
    ("scopes.updated", "Scope updated successfully"),
    ("scopes.deleted", "Scope deleted successfully"),
    ("scopes.delete_confirm", "Delete scope \"{{name}}\"?"),
    ("partners.status", "Status"),
    ("partners.hosting_type", "Hosting type"),
    ("partners.alias", "Alias"),
    ("partners.queue_name", "Queue name"),
    ("partners.application", "Application"),
    ("partners.description", "Description"),
    ("partners.created", "Partner created successfully"),
    ("partners.updated", "Partner updated successfully"),
    ("partners.deleted", "Partner deleted successfully"),
    ("partners.delete_confirm", "Delete partner \"{{alias}}\"?"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_translate_to_themselves() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.translate("common.missing", &MessageParams::new()),
            "common.missing"
        );
    }

    #[test]
    fn params_are_interpolated_with_or_without_spaces() {
        let mut catalog = Catalog::new();
        catalog.insert("a", "Hello {{name}}, bye {{ name }}");
        let text = catalog.translate("a", &MessageParams::new().with("name", "Ada"));
        assert_eq!(text, "Hello Ada, bye Ada");
    }

    #[test]
    fn nested_json_flattens_into_dotted_keys() {
        let catalog = Catalog::from_json_str(
            r#"{"common": {"error": "Erreur", "retry": 3}, "title": "Console", "none": null}"#,
        )
        .unwrap();
        assert_eq!(catalog.get("common.error"), Some("Erreur"));
        assert_eq!(catalog.get("common.retry"), Some("3"));
        assert_eq!(catalog.get("title"), Some("Console"));
        assert_eq!(catalog.get("none"), None);
    }

    #[test]
    fn non_object_roots_are_rejected() {
        assert!(matches!(
            Catalog::from_json_str("[1, 2]"),
            Err(CatalogError::NotAnObject)
        ));
        assert!(matches!(
            Catalog::from_json_str("{"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn merged_catalog_prefers_the_override() {
        let mut custom = Catalog::new();
        custom.insert("common.error", "Erreur");
        let catalog = Catalog::english().merged(custom);
        assert_eq!(catalog.get("common.error"), Some("Erreur"));
        assert_eq!(catalog.get("common.success"), Some("Operation completed successfully"));
    }

    #[test]
    fn loading_a_missing_file_reports_the_path() {
        let err = Catalog::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("not/here.json"));
    }
}
