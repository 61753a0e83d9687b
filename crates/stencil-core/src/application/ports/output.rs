//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{Category, GenerationManifest, TemplateDefinition, TemplateSummary};
use crate::error::StencilResult;

/// Port for definition lookup.
///
/// Implemented by:
/// - `stencil_adapters::TemplateRegistry` (built-ins plus loaded files)
///
/// Implementations are read-only: every method takes `&self` and the
/// catalogue never changes once handed to a service.
pub trait TemplateCatalog: Send + Sync {
    /// Definition by id, or `ApplicationError::TemplateNotFound`.
    fn get(&self, id: &str) -> StencilResult<Arc<TemplateDefinition>>;

    /// Summaries in registration order, optionally restricted to one category.
    fn list(&self, category: Option<&str>) -> Vec<TemplateSummary>;

    /// Category records in registration order.
    fn categories(&self) -> Vec<Category>;
}

/// An archive ready to be handed to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

/// Port for archive serialization.
///
/// Implemented by:
/// - `stencil_adapters::packager::TarGzPackager`
#[cfg_attr(test, mockall::automock)]
pub trait Packager: Send + Sync {
    /// Serialize every generated file into one in-memory archive.
    fn package(&self, manifest: &GenerationManifest) -> StencilResult<PackagedArtifact>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> StencilResult<()>;
}
