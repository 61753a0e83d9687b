//! Turning `--example`, `--values` and `--set` into a [`ConfigMap`].
//!
//! `--set` values arrive as strings; each is read according to the kind the
//! target field declares. Keys the definition does not declare are kept as
//! text and left for the validator to ignore.

use std::fs;

use tracing::debug;

use stencil_core::domain::{ConfigMap, ConfigValue, FieldKind, TemplateDefinition};

use crate::{
    cli::ValueArgs,
    error::{CliError, CliResult, IntoCli},
};

/// Merge every value source for `definition`, lowest priority first.
pub fn resolve(args: &ValueArgs, definition: &TemplateDefinition) -> CliResult<ConfigMap> {
    let mut config = match &args.example {
        Some(name) => definition
            .example(name)
            .cloned()
            .ok_or_else(|| CliError::UnknownExample {
                template_id: definition.id.clone(),
                name: name.clone(),
                available: definition.examples.keys().cloned().collect(),
            })?,
        None => ConfigMap::new(),
    };

    if let Some(path) = &args.values {
        let raw = fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read values file '{}'", path.display()))?;
        let from_file: ConfigMap =
            serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput {
                message: format!("'{}' is not a JSON object of field values", path.display()),
                source: Some(Box::new(e)),
            })?;
        config.extend(from_file);
    }

    for assignment in &args.set {
        let (key, raw) = parse_assignment(assignment)?;
        let kind = definition.field(key).map(|f| f.kind);
        config.insert(key.to_owned(), coerce(key, raw, kind)?);
    }

    debug!(template = %definition.id, keys = config.len(), "Values resolved");
    Ok(config)
}

fn parse_assignment(assignment: &str) -> CliResult<(&str, &str)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CliError::InvalidInput {
            message: format!("expected KEY=VALUE, got '{assignment}'"),
            source: None,
        }),
    }
}

/// Read `raw` as a value of `kind`; undeclared fields stay text.
fn coerce(key: &str, raw: &str, kind: Option<FieldKind>) -> CliResult<ConfigValue> {
    let invalid = |expected: &str| CliError::InvalidInput {
        message: format!("'{key}' expects {expected}, got '{raw}'"),
        source: None,
    };

    match kind {
        Some(FieldKind::Number) => {
            let raw = raw.trim();
            raw.parse::<i64>()
                .map(ConfigValue::number)
                .or_else(|_| raw.parse::<f64>().map(ConfigValue::float))
                .map_err(|_| invalid("a number"))
        }
        Some(FieldKind::Boolean) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(ConfigValue::Boolean(true)),
            "false" => Ok(ConfigValue::Boolean(false)),
            _ => Err(invalid("true or false")),
        },
        Some(FieldKind::MultiSelect) => Ok(ConfigValue::list(
            raw.split(',').map(str::trim).filter(|item| !item.is_empty()),
        )),
        Some(FieldKind::Text | FieldKind::Select) | None => Ok(ConfigValue::text(raw)),
    }
}
