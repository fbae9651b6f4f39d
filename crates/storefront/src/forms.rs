//! Contact and newsletter form validation.
//!
//! Submitting a form checks every required field; blank values (after
//! trimming) are flagged for highlighting. Email fields must also hold a
//! well-formed address when filled in. A valid submit resets the form.

use std::collections::BTreeMap;

use powerhit_core::Email;

/// Kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
        }
    }

    #[must_use]
    pub fn optional(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
        }
    }
}

/// Why a field was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing,
    InvalidEmail(String),
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Valid,
    /// Fields to highlight, in declaration order.
    Invalid(Vec<(String, FieldError)>),
}

impl FormOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Names of the highlighted fields.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            Self::Valid => Vec::new(),
            Self::Invalid(errors) => errors.iter().map(|(name, _)| name.as_str()).collect(),
        }
    }
}

/// A form on the page: its fields, current values, and highlighted fields.
#[derive(Debug, Clone)]
pub struct FormState {
    name: String,
    fields: Vec<FieldSpec>,
    values: BTreeMap<String, String>,
    highlighted: Vec<String>,
}

impl FormState {
    #[must_use]
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            values: BTreeMap::new(),
            highlighted: Vec::new(),
        }
    }

    /// The storefront's contact form.
    #[must_use]
    pub fn contact() -> Self {
        Self::new(
            "contact",
            vec![
                FieldSpec::required("name", FieldKind::Text),
                FieldSpec::required("email", FieldKind::Email),
                FieldSpec::optional("subject", FieldKind::Text),
                FieldSpec::required("message", FieldKind::TextArea),
            ],
        )
    }

    /// The footer newsletter signup.
    #[must_use]
    pub fn newsletter() -> Self {
        Self::new(
            "newsletter",
            vec![FieldSpec::required("email", FieldKind::Email)],
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record user input for `field`.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Fields currently highlighted as invalid.
    #[must_use]
    pub fn highlighted(&self) -> &[String] {
        &self.highlighted
    }

    /// Check every field against the current values without side effects.
    #[must_use]
    pub fn validate(&self) -> FormOutcome {
        let errors: Vec<(String, FieldError)> = self
            .fields
            .iter()
            .filter_map(|field| {
                let value = self.value(&field.name).map_or("", str::trim);
                check_field(field, value).map(|err| (field.name.clone(), err))
            })
            .collect();

        if errors.is_empty() {
            FormOutcome::Valid
        } else {
            FormOutcome::Invalid(errors)
        }
    }

    /// Validate, update highlighting, and reset the values on success.
    pub fn submit(&mut self) -> FormOutcome {
        let outcome = self.validate();
        self.highlighted = outcome
            .invalid_fields()
            .into_iter()
            .map(str::to_string)
            .collect();

        if outcome.is_valid() {
            tracing::info!(form = %self.name, "Form submitted");
            self.values.clear();
        } else {
            tracing::debug!(form = %self.name, invalid = ?self.highlighted, "Form rejected");
        }
        outcome
    }
}

fn check_field(field: &FieldSpec, value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return field.required.then_some(FieldError::Missing);
    }
    match field.kind {
        FieldKind::Email => Email::parse(value)
            .err()
            .map(|e| FieldError::InvalidEmail(e.to_string())),
        FieldKind::Text | FieldKind::TextArea => None,
    }
}
