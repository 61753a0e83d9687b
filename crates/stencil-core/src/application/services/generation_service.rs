//! Generation Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Resolve the definition from the catalogue
//! 2. Validate the configuration and apply defaults
//! 3. Render every file (in parallel, order preserved)
//! 4. Optionally package the manifest into an archive

use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::{
    application::ports::{PackagedArtifact, Packager, TemplateCatalog},
    domain::{
        ConfigMap, DomainError, DomainValidator as validator, GeneratedFile, GenerationManifest,
        ManifestMetadata, TemplateDefinition, rendering,
    },
    error::{StencilError, StencilResult},
};

/// Main generation service.
///
/// Stateless apart from its injected ports; every call can run concurrently
/// with any other.
pub struct GenerationService {
    catalog: Arc<dyn TemplateCatalog>,
    packager: Arc<dyn Packager>,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use stencil_core::application::{GenerationService, ports::*};
    /// # fn demo(catalog: Arc<dyn TemplateCatalog>, packager: Arc<dyn Packager>) {
    /// let service = GenerationService::new(catalog, packager);
    /// # }
    /// ```
    pub fn new(catalog: Arc<dyn TemplateCatalog>, packager: Arc<dyn Packager>) -> Self {
        Self { catalog, packager }
    }

    /// Render a definition against `config`.
    ///
    /// Fails with `TemplateNotFound`, a `ValidationError` naming the first
    /// offending field, or a template defect. No partial manifests are
    /// returned.
    #[instrument(skip(self, config), fields(keys = config.len()))]
    pub fn generate(&self, template_id: &str, config: &ConfigMap) -> StencilResult<GenerationManifest> {
        let definition = self.catalog.get(template_id)?;
        let resolved = validator::resolve_config(&definition, config)?;

        let files = Self::render_all(&definition, &resolved)?;

        let manifest = GenerationManifest {
            id: Uuid::new_v4().to_string(),
            files,
            metadata: ManifestMetadata {
                template_id: definition.id.clone(),
                template_name: definition.name.clone(),
                version: definition.version.clone(),
                generated_at: Utc::now(),
                config: config.clone(),
            },
        };

        info!(
            generation = %manifest.id,
            files = manifest.file_count(),
            bytes = manifest.total_bytes(),
            "Generation completed"
        );
        Ok(manifest)
    }

    /// Same result as [`generate`](Self::generate); kept separate so callers
    /// can distinguish the intent in logs.
    #[instrument(skip(self, config), fields(keys = config.len()))]
    pub fn preview(&self, template_id: &str, config: &ConfigMap) -> StencilResult<GenerationManifest> {
        self.generate(template_id, config)
    }

    /// Serialize an existing manifest.
    #[instrument(skip_all, fields(generation = %manifest.id))]
    pub fn package(&self, manifest: &GenerationManifest) -> StencilResult<PackagedArtifact> {
        let artifact = self.packager.package(manifest)?;
        info!(
            filename = %artifact.filename,
            bytes = artifact.bytes.len(),
            "Manifest packaged"
        );
        Ok(artifact)
    }

    /// Generate with `config` (or an empty map) and package the result.
    #[instrument(skip(self, config))]
    pub fn download(
        &self,
        template_id: &str,
        config: Option<&ConfigMap>,
    ) -> StencilResult<PackagedArtifact> {
        let empty = ConfigMap::new();
        let manifest = self.generate(template_id, config.unwrap_or(&empty))?;
        self.package(&manifest)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render_all(
        definition: &TemplateDefinition,
        resolved: &ConfigMap,
    ) -> StencilResult<Vec<GeneratedFile>> {
        debug!(files = definition.files.len(), "Rendering files");

        definition
            .files
            .par_iter()
            .map(|file| rendering::render_file(&definition.id, file, resolved))
            .collect::<Result<Vec<_>, DomainError>>()
            .map_err(|e| {
                let e = StencilError::from(e);
                if e.is_template_defect() {
                    error!(template = %definition.id, error = %e, "Template defect");
                }
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{
            ApplicationError,
            ports::MockPackager,
            services::fixtures::FixedCatalog,
        },
        domain::{ConfigValue, FieldSchema, FileTemplate},
        error::ErrorCategory,
    };

    fn node_dockerfile() -> TemplateDefinition {
        TemplateDefinition::builder("node")
            .name("Node")
            .category("container")
            .file(FileTemplate::new(
                "Dockerfile",
                "./Dockerfile",
                "dockerfile",
                "FROM node:<%= nodeVersion %>-alpine\n\
                 <% if packageManager == \"yarn\" %>\n\
                 RUN yarn install\n\
                 <% else %>\n\
                 RUN npm ci\n\
                 <% endif %>\n",
            ))
            .file(FileTemplate::new(
                ".dockerignore",
                "./.dockerignore",
                "text",
                "node_modules\n",
            ))
            .field(FieldSchema::text("projectName", "Project").required())
            .field(FieldSchema::select("nodeVersion", "Node", ["16", "18", "20"]).default_value("18"))
            .field(FieldSchema::select("packageManager", "PM", ["npm", "yarn"]).default_value("npm"))
            .build()
            .unwrap()
    }

    fn broken() -> TemplateDefinition {
        TemplateDefinition::builder("broken")
            .name("Broken")
            .category("misc")
            .file(FileTemplate::new("ok", "./ok", "text", "fine"))
            .file(FileTemplate::new("bad", "./bad", "text", "<% for x in %>"))
            .build()
            .unwrap()
    }

    fn service(packager: MockPackager) -> GenerationService {
        GenerationService::new(
            Arc::new(FixedCatalog::new([node_dockerfile(), broken()])),
            Arc::new(packager),
        )
    }

    fn config(pairs: &[(&str, &str)]) -> ConfigMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), ConfigValue::text(*v)))
            .collect()
    }

    #[test]
    fn generates_files_in_declaration_order() {
        let manifest = service(MockPackager::new())
            .generate("node", &config(&[("projectName", "app")]))
            .unwrap();

        let paths: Vec<_> = manifest.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["./Dockerfile", "./.dockerignore"]);
        assert_eq!(manifest.files[0].content, "FROM node:18-alpine\nRUN npm ci");
        assert_eq!(manifest.metadata.template_id, "node");
        assert_eq!(manifest.metadata.template_name, "Node");
    }

    #[test]
    fn metadata_keeps_caller_config_without_defaults() {
        let supplied = config(&[("projectName", "app")]);
        let manifest = service(MockPackager::new()).generate("node", &supplied).unwrap();
        assert_eq!(manifest.metadata.config, supplied);
    }

    #[test]
    fn conditional_follows_package_manager() {
        let manifest = service(MockPackager::new())
            .generate("node", &config(&[("projectName", "app"), ("packageManager", "yarn")]))
            .unwrap();
        assert!(manifest.files[0].content.contains("RUN yarn install"));
        assert!(!manifest.files[0].content.contains("npm ci"));
    }

    #[test]
    fn every_generation_gets_a_fresh_id() {
        let svc = service(MockPackager::new());
        let cfg = config(&[("projectName", "app")]);
        let a = svc.generate("node", &cfg).unwrap();
        let b = svc.preview("node", &cfg).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.files, b.files);
    }

    #[test]
    fn unknown_template() {
        let err = service(MockPackager::new())
            .generate("missing", &ConfigMap::new())
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::TemplateNotFound { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn missing_required_field_is_named() {
        let err = service(MockPackager::new())
            .generate("node", &ConfigMap::new())
            .unwrap_err();
        assert_eq!(err.as_validation().map(|e| e.field()), Some("projectName"));
    }

    #[test]
    fn template_defect_aborts_whole_call() {
        let err = service(MockPackager::new())
            .generate("broken", &ConfigMap::new())
            .unwrap_err();
        assert!(err.is_template_defect());
        assert!(err.to_string().contains("broken/bad#content"));
    }

    #[test]
    fn download_generates_then_packages() {
        let mut packager = MockPackager::new();
        packager
            .expect_package()
            .withf(|m| m.metadata.template_id == "node" && m.files.len() == 2)
            .times(1)
            .returning(|m| {
                Ok(PackagedArtifact {
                    bytes: vec![1, 2, 3],
                    filename: format!("{}.tar.gz", m.archive_stem()),
                    content_type: "application/gzip",
                })
            });

        let cfg = config(&[("projectName", "app")]);
        let artifact = service(packager).download("node", Some(&cfg)).unwrap();
        assert!(artifact.filename.starts_with("node_"));
        assert_eq!(artifact.bytes, [1, 2, 3]);
    }

    #[test]
    fn download_without_config_validates_instead_of_packaging() {
        let mut packager = MockPackager::new();
        packager.expect_package().never();

        let err = service(packager).download("node", None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
