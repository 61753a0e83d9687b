//! Template registry: mutable during startup, frozen afterwards.

mod registry;

pub use registry::{RegistryBuilder, TemplateRegistry};
