//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, CatalogService, ExportService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CatalogService, ExportService, GenerationService};

pub use ports::{Filesystem, PackagedArtifact, Packager, TemplateCatalog};

pub use error::ApplicationError;
