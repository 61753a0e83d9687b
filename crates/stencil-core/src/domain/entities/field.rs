//! Field schema: one configurable input a template exposes.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, ValidationError,
    value_objects::{ConfigValue, FieldKind},
};

/// One `(label, value)` choice of a select or multiselect field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Describes one configurable input of a template definition.
///
/// ## Invariants
///
/// Checked by [`FieldSchema::validate`] when a definition is registered:
/// - `name` is a directive identifier (`[A-Za-z_][A-Za-z0-9_]*`)
/// - select and multiselect kinds carry a non-empty `options` list;
///   every other kind carries none
/// - a present `default` has the field's type and, for option kinds,
///   names declared option values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
            description: String::new(),
            options: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    /// Select field whose option labels equal their values.
    pub fn select<I, S>(name: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, label, FieldKind::Select).options(values)
    }

    /// Multiselect field whose option labels equal their values.
    pub fn multiselect<I, S>(name: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, label, FieldKind::MultiSelect).options(values)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    fn options<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = values
            .into_iter()
            .map(|v| {
                let v = v.into();
                FieldOption::new(v.clone(), v)
            })
            .collect();
        self
    }

    /// Replace the option list with explicit `(label, value)` pairs.
    pub fn labelled_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn is_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    fn allowed_values(&self) -> String {
        self.options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the schema invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidField {
            field: self.name.clone(),
            reason,
        };

        if !is_identifier(&self.name) {
            return Err(invalid("name must be an identifier".into()));
        }

        if self.kind.has_options() && self.options.is_empty() {
            return Err(invalid(format!("{} field has no options", self.kind)));
        }

        if !self.kind.has_options() && !self.options.is_empty() {
            return Err(invalid(format!("{} field cannot declare options", self.kind)));
        }

        if let Some(default) = &self.default {
            self.check(default)
                .map_err(|e| invalid(format!("default is invalid: {e}")))?;
        }

        Ok(())
    }

    /// Check a supplied value against this field.
    pub fn check(&self, value: &ConfigValue) -> Result<(), ValidationError> {
        if !self.kind.accepts(value) {
            return Err(ValidationError::TypeMismatch {
                field: self.name.clone(),
                expected: self.kind,
                found: value.type_name(),
            });
        }

        let offending = match value {
            ConfigValue::Text(v) if self.kind == FieldKind::Select => {
                (!self.is_option(v)).then(|| v.clone())
            }
            ConfigValue::List(items) => items.iter().find(|v| !self.is_option(v)).cloned(),
            _ => None,
        };

        match offending {
            Some(value) => Err(ValidationError::NotAnOption {
                field: self.name.clone(),
                expected: self.kind,
                value,
                allowed: self.allowed_values(),
            }),
            None => Ok(()),
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
