//! `stencil download`: render a template into a tar.gz archive on disk.

use std::{fs, path::PathBuf};

use tracing::{info, instrument};

use crate::{
    cli::DownloadArgs,
    commands::Services,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    values,
};

#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: DownloadArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let services = Services::load(&config)?;
    let definition = services.catalog.get(&args.template)?;
    let values = values::resolve(&args.values, &definition)?;

    let artifact = services
        .generator
        .download(&definition.id, Some(&values))
        .map_err(|e| CliError::from_core(e, &definition.id))?;

    let dir = args
        .output
        .or(config.download.directory)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)
        .with_cli_context(|| format!("Failed to create '{}'", dir.display()))?;

    let path = dir.join(&artifact.filename);
    fs::write(&path, &artifact.bytes)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;

    info!(path = %path.display(), bytes = artifact.bytes.len(), "Archive saved");

    if output.is_json() {
        output.json(&serde_json::json!({
            "path": path,
            "bytes": artifact.bytes.len(),
            "content_type": artifact.content_type,
        }))?;
        return Ok(());
    }

    output.success(&format!("Saved {}", path.display()))?;
    Ok(())
}
