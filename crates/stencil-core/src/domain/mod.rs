// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! Pure logic: field schemas, template definitions, the directive language
//! and configuration validation. All I/O (registries, archives, disks) is
//! reached through ports defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable entities**: definitions are `Clone + PartialEq`
pub mod directive;
pub mod entities;
pub mod error;
pub mod rendering;
pub mod value_objects;

mod validation;

pub use directive::{DirectiveTemplate, Filter, Position};
pub use entities::{
    Category, CategoryListing, FieldOption, FieldSchema, FileTemplate, GeneratedFile,
    GenerationManifest, ManifestMetadata, TemplateDefinition, TemplateDefinitionBuilder,
    TemplateSummary, common::RelativePath,
};
pub use error::{DomainError, ErrorCategory, ValidationError};
pub use value_objects::{ConfigMap, ConfigValue, FieldKind};

pub use validation::DomainValidator;
