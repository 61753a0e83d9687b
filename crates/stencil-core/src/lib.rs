//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stencil, a
//! generator that turns typed template definitions into infrastructure
//! files (CI pipelines, Dockerfiles, Kubernetes manifests).
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Generation, Catalog, Export)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (TemplateCatalog, Packager, Filesystem)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (TemplateRegistry, TarGzPackager, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (FieldSchema, TemplateDefinition,      │
//! │   directive engine, validation)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use stencil_core::prelude::*;
//! # fn demo(catalog: Arc<dyn TemplateCatalog>, packager: Arc<dyn Packager>) -> StencilResult<()> {
//! let service = GenerationService::new(catalog, packager);
//!
//! let mut config = ConfigMap::new();
//! config.insert("projectName".into(), ConfigValue::text("shop"));
//!
//! let manifest = service.generate("dockerfile-nodejs", &config)?;
//! let archive = service.package(&manifest)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, ExportService, GenerationService,
        ports::{Filesystem, PackagedArtifact, Packager, TemplateCatalog},
    };
    pub use crate::domain::{
        Category, ConfigMap, ConfigValue, FieldKind, FieldSchema, FileTemplate, GeneratedFile,
        GenerationManifest, TemplateDefinition, TemplateSummary,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
