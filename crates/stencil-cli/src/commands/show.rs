//! `stencil show`: describe a template's fields and examples.

use stencil_core::domain::{FieldSchema, TemplateDefinition};

use crate::{
    cli::ShowArgs, commands::Services, config::AppConfig, error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ShowArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let definition = Services::load(&config)?.catalog.get(&args.template)?;

    if output.is_json() {
        output.json(&definition.summary())?;
        return Ok(());
    }

    output.header(&format!("{} ({} {})", definition.name, definition.id, definition.version))?;
    if !definition.description.is_empty() {
        output.data(&format!("  {}", definition.description))?;
    }
    output.data(&format!("  category: {}", definition.category))?;

    output.data("")?;
    output.data("Files:")?;
    for file in &definition.files {
        output.data(&format!("  {}", file.path))?;
    }

    output.data("")?;
    output.data("Fields:")?;
    for field in &definition.fields {
        output.data(&describe_field(field))?;
        if !field.description.is_empty() {
            output.data(&format!("      {}", output.dim(&field.description)))?;
        }
    }

    print_examples(&definition, &output)
}

fn describe_field(field: &FieldSchema) -> String {
    let mut line = format!("  {:<18} {}", field.name, field.kind);
    if field.required {
        line.push_str(", required");
    }
    if let Some(default) = &field.default {
        line.push_str(&format!(", default {default}"));
    }
    if !field.options.is_empty() {
        let values: Vec<_> = field.options.iter().map(|o| o.value.as_str()).collect();
        line.push_str(&format!(" [{}]", values.join("|")));
    }
    line
}

fn print_examples(definition: &TemplateDefinition, output: &OutputManager) -> CliResult<()> {
    if definition.examples.is_empty() {
        return Ok(());
    }
    output.data("")?;
    output.data("Examples:")?;
    for (name, values) in &definition.examples {
        let pairs: Vec<_> = values.iter().map(|(k, v)| format!("{k}={v}")).collect();
        output.data(&format!("  {name}: {}", pairs.join(" ")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::ConfigValue;

    #[test]
    fn field_line_lists_constraints() {
        let field = FieldSchema::select("nodeVersion", "Node", ["16", "18", "20"])
            .required()
            .default_value(ConfigValue::text("18"));
        let line = describe_field(&field);
        assert!(line.contains("select, required, default 18 [16|18|20]"), "{line}");
    }

    #[test]
    fn optional_text_field_is_bare() {
        let line = describe_field(&FieldSchema::text("namespace", "Namespace"));
        assert_eq!(line.trim_end(), "  namespace          text");
    }
}
