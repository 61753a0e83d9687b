//! Command handlers. Each one translates parsed arguments into service
//! calls and prints the result; no business logic lives here.

use std::sync::Arc;

use tracing::debug;

use stencil_adapters::{TarGzPackager, TemplateRegistry};
use stencil_core::application::{CatalogService, GenerationService};

use crate::{config::AppConfig, error::CliResult};

pub mod categories;
pub mod completions;
pub mod config;
pub mod download;
pub mod generate;
pub mod init;
pub mod list;
pub mod preview;
pub mod show;

/// Services wired to the registry described by the configuration.
pub struct Services {
    pub catalog: CatalogService,
    pub generator: GenerationService,
}

impl Services {
    /// Built-in catalogue plus `templates.local_path`, if configured.
    pub fn load(config: &AppConfig) -> CliResult<Self> {
        let registry = Arc::new(TemplateRegistry::load(
            config.templates.local_path.as_deref(),
        )?);
        debug!(templates = registry.len(), "Registry ready");

        Ok(Self {
            catalog: CatalogService::new(registry.clone()),
            generator: GenerationService::new(registry, Arc::new(TarGzPackager::new())),
        })
    }
}
