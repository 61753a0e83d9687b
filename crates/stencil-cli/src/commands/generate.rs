//! `stencil generate`: render a template and write it under a directory.

use tracing::{info, instrument};

use stencil_adapters::LocalFilesystem;
use stencil_core::application::ExportService;

use crate::{
    cli::GenerateArgs,
    commands::Services,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    values,
};

/// Dispatch sequence:
/// 1. Resolve the definition and the caller's values
/// 2. Generate the manifest
/// 3. Export it under `--output`, refusing to overwrite unless `--force`
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let services = Services::load(&config)?;
    let definition = services.catalog.get(&args.template)?;
    let values = values::resolve(&args.values, &definition)?;

    let manifest = services
        .generator
        .generate(&definition.id, &values)
        .map_err(|e| CliError::from_core(e, &definition.id))?;

    let written = ExportService::new(Box::new(LocalFilesystem::new())).export(
        &manifest,
        &args.output,
        args.force,
    )?;

    info!(files = written.len(), dir = %args.output.display(), "Files written");

    if output.is_json() {
        output.json(&written)?;
        return Ok(());
    }

    output.success(&format!(
        "Generated {} file(s) from '{}'",
        written.len(),
        definition.id
    ))?;
    for path in &written {
        output.print(&format!("  {}", path.display()))?;
    }

    Ok(())
}
