//! The output of one generation: rendered files plus provenance metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ConfigMap;

/// A file after rendering. Every string is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub name: String,
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub template_id: String,
    pub template_name: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    /// The caller's configuration as supplied, before defaults were applied.
    pub config: ConfigMap,
}

/// Result of `generate`/`preview`: files in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub id: String,
    pub files: Vec<GeneratedFile>,
    pub metadata: ManifestMetadata,
}

impl GenerationManifest {
    /// `<template_id>_<unix-seconds>`, the stem of archive file names.
    pub fn archive_stem(&self) -> String {
        format!(
            "{}_{}",
            self.metadata.template_id,
            self.metadata.generated_at.timestamp()
        )
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.content.len()).sum()
    }
}
