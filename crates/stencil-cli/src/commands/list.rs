//! Implementation of the `stencil list` command.

use crate::{
    cli::{ListArgs, ListFormat},
    commands::Services,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let services = Services::load(&config)?;
    let templates = services.catalog.list_templates(args.category.as_deref());

    match args.format {
        ListFormat::Table => {
            if templates.is_empty() {
                output.warning("No templates match")?;
                return Ok(());
            }
            output.header("Available Templates:")?;
            let width = templates.iter().map(|t| t.id.len()).max().unwrap_or(0);
            for template in &templates {
                output.data(&format!(
                    "  {:<width$}  {:<11} {}",
                    template.id,
                    template.category,
                    output.dim(&template.description),
                ))?;
            }
        }
        ListFormat::List => {
            for template in &templates {
                output.data(&template.id)?;
            }
        }
        ListFormat::Json => output.json(&templates)?,
    }

    Ok(())
}
