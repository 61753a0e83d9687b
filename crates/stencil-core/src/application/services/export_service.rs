//! Export Service - writes a manifest's files to disk.
//!
//! Writes go through the `Filesystem` port. Every target path is checked
//! before the first write, and a failed write removes whatever this call
//! already wrote.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{GenerationManifest, RelativePath},
    error::StencilResult,
};

pub struct ExportService {
    filesystem: Box<dyn Filesystem>,
}

impl ExportService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Write every generated file under `root`.
    ///
    /// Returns the written paths in manifest order.
    #[instrument(skip(self, manifest), fields(generation = %manifest.id, root = %root.display()))]
    pub fn export(
        &self,
        manifest: &GenerationManifest,
        root: &Path,
        overwrite: bool,
    ) -> StencilResult<Vec<PathBuf>> {
        let targets = self.plan(manifest, root, overwrite)?;

        let mut written = Vec::with_capacity(targets.len());
        for (target, content) in &targets {
            if let Err(e) = self.write_one(target, content) {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&written);
                return Err(e);
            }
            written.push(target.clone());
        }

        info!(files = written.len(), "Export completed");
        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn plan<'m>(
        &self,
        manifest: &'m GenerationManifest,
        root: &Path,
        overwrite: bool,
    ) -> StencilResult<Vec<(PathBuf, &'m str)>> {
        manifest
            .files
            .iter()
            .map(|file| {
                let target = RelativePath::parse(&file.path)?.under(root);
                if !overwrite && self.filesystem.exists(&target) {
                    return Err(ApplicationError::FileExists { path: target }.into());
                }
                Ok((target, file.content.as_str()))
            })
            .collect()
    }

    fn write_one(&self, target: &Path, content: &str) -> StencilResult<()> {
        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(target, content)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, written: &[PathBuf]) {
        for path in written.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(error = %e, path = %path.display(), "Rollback failed");
            }
        }
    }
}
