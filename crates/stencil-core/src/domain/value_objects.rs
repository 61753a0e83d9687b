//! Value objects for the Stencil domain.
//!
//! These types are immutable once constructed and compared by value.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::DomainError;

// ============================================================================
// FieldKind
// ============================================================================

/// The type of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Select,
    #[serde(alias = "multi-select")]
    MultiSelect,
}

impl FieldKind {
    /// Canonical string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
        }
    }

    /// Whether this kind draws its values from a declared option list.
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }

    /// Whether `value` has the shape this kind expects.
    ///
    /// Option membership is checked separately by the config validator.
    pub fn accepts(self, value: &ConfigValue) -> bool {
        matches!(
            (self, value),
            (Self::Text | Self::Select, ConfigValue::Text(_))
                | (Self::Number, ConfigValue::Number(_))
                | (Self::Boolean, ConfigValue::Boolean(_))
                | (Self::MultiSelect, ConfigValue::List(_))
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "select" => Ok(Self::Select),
            "multiselect" | "multi-select" => Ok(Self::MultiSelect),
            _ => Err(DomainError::InvalidField {
                field: s.into(),
                reason: "unknown field kind".into(),
            }),
        }
    }
}

// ============================================================================
// ConfigValue
// ============================================================================

/// A typed configuration value.
///
/// Serialized untagged so JSON/TOML inputs map naturally:
/// `"x"` → Text, `3000` → Number, `true` → Boolean, `["a"]` → List.
/// Numbers keep their integer or float form (`3000` renders as `3000`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
}

impl ConfigValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: i64) -> Self {
        Self::Number(value.into())
    }

    /// Float number; non-finite values collapse to zero.
    pub fn float(value: f64) -> Self {
        Self::Number(serde_json::Number::from_f64(value).unwrap_or_else(|| 0.into()))
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }

    /// Truthiness used by `if` directives.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Textual form of a scalar. Lists have no scalar form.
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            Self::Boolean(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ConfigValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

number_from!(i32, i64, u16, u32, u64);

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Field name → value. Ordered so that serialized metadata is stable.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_parses_aliases() {
        assert_eq!("multi-select".parse::<FieldKind>().unwrap(), FieldKind::MultiSelect);
        assert_eq!("BOOL".parse::<FieldKind>().unwrap(), FieldKind::Boolean);
        assert!("date".parse::<FieldKind>().is_err());
    }

    #[test]
    fn select_accepts_text_only() {
        assert!(FieldKind::Select.accepts(&ConfigValue::text("18")));
        assert!(!FieldKind::Select.accepts(&ConfigValue::number(18)));
        assert!(FieldKind::MultiSelect.accepts(&ConfigValue::list(["a"])));
    }

    #[test]
    fn integers_keep_integer_form() {
        let value: ConfigValue = serde_json::from_str("3000").unwrap();
        assert_eq!(value, ConfigValue::number(3000));
        assert_eq!(value.as_scalar_text().as_deref(), Some("3000"));
    }

    #[test]
    fn untagged_json_maps_to_variants() {
        let map: ConfigMap =
            serde_json::from_str(r#"{"a": "x", "b": true, "c": ["p", "q"], "d": 1.5}"#).unwrap();
        assert_eq!(map["a"], ConfigValue::text("x"));
        assert_eq!(map["b"], ConfigValue::Boolean(true));
        assert_eq!(map["c"], ConfigValue::list(["p", "q"]));
        assert_eq!(map["d"].as_scalar_text().as_deref(), Some("1.5"));
    }

    #[test]
    fn truthiness() {
        assert!(!ConfigValue::text("").is_truthy());
        assert!(ConfigValue::text("x").is_truthy());
        assert!(!ConfigValue::number(0).is_truthy());
        assert!(ConfigValue::float(0.5).is_truthy());
        assert!(!ConfigValue::List(vec![]).is_truthy());
        assert!(!ConfigValue::Boolean(false).is_truthy());
    }

    #[test]
    fn lists_have_no_scalar_text() {
        assert_eq!(ConfigValue::list(["a"]).as_scalar_text(), None);
    }
}
