//! `stencil categories`: categories in display order with their templates.

use crate::{commands::Services, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let listings = Services::load(&config)?.catalog.list_categories();

    if output.is_json() {
        output.json(&listings)?;
        return Ok(());
    }

    for listing in &listings {
        let category = &listing.category;
        output.header(&format!("{} ({})", category.name, category.id))?;
        if !category.description.is_empty() {
            output.data(&format!("  {}", output.dim(&category.description)))?;
        }
        for template in &listing.templates {
            output.data(&format!("  - {:<22} {}", template.id, template.name))?;
        }
        output.print("")?;
    }

    Ok(())
}
