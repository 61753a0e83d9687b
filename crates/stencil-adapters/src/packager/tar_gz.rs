//! gzip-compressed tar packager.

use std::{collections::HashSet, io};

use flate2::{Compression, write::GzEncoder};
use tar::{EntryType, Header};
use tracing::{debug, instrument};

use stencil_core::{
    application::{
        ApplicationError,
        ports::{PackagedArtifact, Packager},
    },
    domain::{GenerationManifest, RelativePath},
    error::StencilResult,
};

pub const CONTENT_TYPE: &str = "application/gzip";

/// Serializes a manifest into an in-memory `.tar.gz`.
///
/// Entry paths are the generated paths with `.` components dropped
/// (`./Dockerfile` becomes `Dockerfile`). Every entry is a regular file with
/// mode `0644` and the manifest's generation time as mtime, so packaging the
/// same manifest twice yields the same bytes.
///
/// Earlier releases of the downloader produced `.zip` files; archives are
/// now gzip tarballs.
#[derive(Debug, Clone, Copy)]
pub struct TarGzPackager {
    compression: Compression,
}

impl TarGzPackager {
    pub fn new() -> Self {
        Self {
            compression: Compression::default(),
        }
    }

    pub fn with_compression(level: u32) -> Self {
        Self {
            compression: Compression::new(level.min(9)),
        }
    }
}

impl Default for TarGzPackager {
    fn default() -> Self {
        Self::new()
    }
}

impl Packager for TarGzPackager {
    #[instrument(skip_all, fields(generation = %manifest.id, files = manifest.files.len()))]
    fn package(&self, manifest: &GenerationManifest) -> StencilResult<PackagedArtifact> {
        let mtime = u64::try_from(manifest.metadata.generated_at.timestamp()).unwrap_or(0);
        let mut seen = HashSet::with_capacity(manifest.files.len());
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), self.compression));

        for file in &manifest.files {
            let path = RelativePath::parse(&file.path).map_err(|e| packaging(e.to_string()))?;
            if !seen.insert(path.clone()) {
                return Err(packaging(format!("duplicate entry '{path}'")));
            }

            let body = file.content.as_bytes();
            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Regular);
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(mtime);

            builder
                .append_data(&mut header, path.as_path(), body)
                .map_err(|e| io_failure(&path, e))?;
            debug!(entry = %path, bytes = body.len(), "Archived file");
        }

        let bytes = builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .map_err(|e| packaging(format!("failed to finish archive: {e}")))?;

        Ok(PackagedArtifact {
            bytes,
            filename: format!("{}.tar.gz", manifest.archive_stem()),
            content_type: CONTENT_TYPE,
        })
    }
}

fn packaging(reason: String) -> stencil_core::error::StencilError {
    ApplicationError::Packaging { reason }.into()
}

fn io_failure(path: &RelativePath, e: io::Error) -> stencil_core::error::StencilError {
    packaging(format!("failed to append '{path}': {e}"))
}
