pub mod category;
pub mod common;
pub mod definition;
pub mod field;
pub mod manifest;

pub use crate::domain::DomainError;
pub use category::{Category, CategoryListing};
pub use definition::{FileTemplate, TemplateDefinition, TemplateDefinitionBuilder, TemplateSummary};
pub use field::{FieldOption, FieldSchema};
pub use manifest::{GeneratedFile, GenerationManifest, ManifestMetadata};
