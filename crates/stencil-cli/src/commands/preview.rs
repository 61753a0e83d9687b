//! `stencil preview`: render a template and print the files.

use tracing::instrument;

use crate::{
    cli::RenderArgs,
    commands::Services,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    values,
};

#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let services = Services::load(&config)?;
    let definition = services.catalog.get(&args.template)?;
    let values = values::resolve(&args.values, &definition)?;

    let manifest = services
        .generator
        .preview(&definition.id, &values)
        .map_err(|e| CliError::from_core(e, &definition.id))?;

    if output.is_json() {
        output.json(&manifest)?;
        return Ok(());
    }

    for (i, file) in manifest.files.iter().enumerate() {
        if i > 0 {
            output.data("")?;
        }
        output.header(&format!("# {}", file.path))?;
        output.data(&file.content)?;
    }

    Ok(())
}
