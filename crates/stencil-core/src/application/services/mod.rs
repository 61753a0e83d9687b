//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a template" or "list categories".

pub mod catalog_service;
pub mod export_service;
pub mod generation_service;

pub use catalog_service::CatalogService;
pub use export_service::ExportService;
pub use generation_service::GenerationService;
