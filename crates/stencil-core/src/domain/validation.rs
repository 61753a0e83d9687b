//! Configuration validation against a definition's field schema.

use tracing::debug;

use super::{
    ValidationError,
    entities::TemplateDefinition,
    value_objects::ConfigMap,
};

/// Stateless validator for caller-supplied configuration.
pub struct DomainValidator;

impl DomainValidator {
    /// Validate `supplied` and return it with defaults filled in.
    ///
    /// Fields are checked in declaration order, so the error always names
    /// the first offending field:
    /// - a present value must have the field's type (and be a declared
    ///   option for select/multiselect)
    /// - an absent field takes its default; with no default, a required
    ///   field fails and an optional one stays absent
    ///
    /// Keys that match no field are carried through untouched.
    pub fn resolve_config(
        definition: &TemplateDefinition,
        supplied: &ConfigMap,
    ) -> Result<ConfigMap, ValidationError> {
        let mut resolved = supplied.clone();

        for field in &definition.fields {
            match supplied.get(&field.name) {
                Some(value) => field.check(value)?,
                None => match &field.default {
                    Some(default) => {
                        resolved.insert(field.name.clone(), default.clone());
                    }
                    None if field.required => {
                        return Err(ValidationError::MissingField {
                            field: field.name.clone(),
                            expected: field.kind,
                        });
                    }
                    None => {}
                },
            }
        }

        debug!(
            template = %definition.id,
            supplied = supplied.len(),
            resolved = resolved.len(),
            "configuration resolved"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{FieldSchema, FileTemplate},
        value_objects::{ConfigValue, FieldKind},
    };

    fn definition() -> TemplateDefinition {
        TemplateDefinition::builder("demo")
            .name("Demo")
            .category("misc")
            .file(FileTemplate::new("f", "./f", "text", ""))
            .field(FieldSchema::text("projectName", "Project").required())
            .field(FieldSchema::select("nodeVersion", "Node", ["16", "18", "20"]).default_value("18"))
            .field(FieldSchema::number("port", "Port").default_value(3000))
            .field(FieldSchema::multiselect("services", "Services", ["redis:6", "mongo:5"]))
            .build()
            .unwrap()
    }

    fn with(pairs: &[(&str, ConfigValue)]) -> ConfigMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn applies_defaults() {
        let resolved =
            DomainValidator::resolve_config(&definition(), &with(&[("projectName", "x".into())]))
                .unwrap();
        assert_eq!(resolved["nodeVersion"], ConfigValue::text("18"));
        assert_eq!(resolved["port"], ConfigValue::number(3000));
        assert!(!resolved.contains_key("services"));
    }

    #[test]
    fn supplied_values_win() {
        let resolved = DomainValidator::resolve_config(
            &definition(),
            &with(&[("projectName", "x".into()), ("nodeVersion", "20".into())]),
        )
        .unwrap();
        assert_eq!(resolved["nodeVersion"], ConfigValue::text("20"));
    }

    #[test]
    fn missing_required_field() {
        let err = DomainValidator::resolve_config(&definition(), &ConfigMap::new()).unwrap_err();
        assert_eq!(err.field(), "projectName");
        assert_eq!(err.expected_kind(), FieldKind::Text);
    }

    #[test]
    fn first_failing_field_in_declaration_order() {
        // port is wrong and projectName is missing; projectName comes first.
        let err = DomainValidator::resolve_config(&definition(), &with(&[("port", "80".into())]))
            .unwrap_err();
        assert_eq!(err.field(), "projectName");
    }

    #[test]
    fn wrong_type() {
        let err = DomainValidator::resolve_config(
            &definition(),
            &with(&[("projectName", "x".into()), ("port", "80".into())]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));
        assert_eq!(err.field(), "port");
        assert_eq!(err.expected_kind(), FieldKind::Number);
    }

    #[test]
    fn undeclared_option() {
        let err = DomainValidator::resolve_config(
            &definition(),
            &with(&[
                ("projectName", "x".into()),
                ("services", ConfigValue::list(["mysql:8"])),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NotAnOption { .. }));
        assert_eq!(err.expected_kind(), FieldKind::MultiSelect);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let resolved = DomainValidator::resolve_config(
            &definition(),
            &with(&[("projectName", "x".into()), ("extra", ConfigValue::Boolean(true))]),
        )
        .unwrap();
        assert_eq!(resolved["extra"], ConfigValue::Boolean(true));
    }
}
