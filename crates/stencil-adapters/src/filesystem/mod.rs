//! [`Filesystem`](stencil_core::application::ports::Filesystem) adapters
//! used when exporting a manifest.
//!
//! `LocalFilesystem` writes to disk; `MemoryFilesystem` keeps files in a
//! shared map so export tests can inspect what was written.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
