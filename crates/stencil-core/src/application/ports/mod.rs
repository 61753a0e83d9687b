//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateCatalog`: frozen id → definition lookup
//!   - `Packager`: manifest → archive bytes
//!   - `Filesystem`: file operations for exports
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, PackagedArtifact, Packager, TemplateCatalog};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackager};
