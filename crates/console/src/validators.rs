//! Field validation shared by the entity forms.

use std::collections::BTreeMap;

use thiserror::Error;

/// Error code of a duplicated partner queue name.
pub const QUEUE_NAME_UNIQUE: &str = "queueNameUnique";
/// Error code of a duplicated scope name.
pub const SCOPE_NAME_UNIQUE: &str = "scopeNameUnique";

/// A single field-level validation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("this field is required")]
    Required,

    #[error("at most {max} characters allowed")]
    TooLong { max: usize },

    #[error("value already in use")]
    NotUnique { code: &'static str },
}

impl FieldError {
    /// Stable code, as bound by the form template.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::TooLong { .. } => "maxlength",
            FieldError::NotUnique { code } => *code,
        }
    }
}

/// Validation outcome of a whole form, keyed by field name.
#[derive(Debug, Error, Clone, Default, PartialEq, Eq)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<FieldError>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.fields.entry(field).or_default().push(error);
    }

    /// Record the outcome of one rule.
    pub fn check(&mut self, field: &'static str, outcome: Result<(), FieldError>) {
        if let Err(error) = outcome {
            self.add(field, error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field: &str) -> &[FieldError] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `field` failed with the error `code`.
    pub fn has(&self, field: &str, code: &str) -> bool {
        self.field(field).iter().any(|e| e.code() == code)
    }

    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

pub fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

pub fn max_length(value: &str, max: usize) -> Result<(), FieldError> {
    if value.trim().chars().count() > max {
        Err(FieldError::TooLong { max })
    } else {
        Ok(())
    }
}

/// Case-insensitive uniqueness against a snapshot of existing names.
///
/// The snapshot is taken at construction; build a new validator whenever the
/// existing names change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueNameValidator {
    taken: Vec<String>,
    code: &'static str,
}

impl UniqueNameValidator {
    /// `existing` yields `(id, name)` pairs; the pair whose id equals
    /// `exclude` (the record being edited) is ignored.
    pub fn new<'a, Id, I>(existing: I, exclude: Option<&Id>, code: &'static str) -> Self
    where
        Id: PartialEq + 'a,
        I: IntoIterator<Item = (&'a Id, &'a str)>,
    {
        let taken = existing
            .into_iter()
            .filter(|(id, _)| exclude != Some(*id))
            .map(|(_, name)| name.trim().to_lowercase())
            .collect();
        Self { taken, code }
    }

    /// Empty candidates pass; `required` is a separate rule.
    pub fn validate(&self, candidate: &str) -> Result<(), FieldError> {
        let candidate = candidate.trim().to_lowercase();
        if candidate.is_empty() {
            return Ok(());
        }
        if self.taken.iter().any(|name| *name == candidate) {
            Err(FieldError::NotUnique { code: self.code })
        } else {
            Ok(())
        }
    }
}
