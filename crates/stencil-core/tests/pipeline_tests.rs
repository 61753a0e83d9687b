//! The generation pipeline driven only through the public API.

use std::sync::Arc;

use stencil_core::{
    application::ApplicationError,
    error::ErrorCategory,
    prelude::*,
};

struct OneTemplate(Arc<TemplateDefinition>);

impl TemplateCatalog for OneTemplate {
    fn get(&self, id: &str) -> StencilResult<Arc<TemplateDefinition>> {
        if id == self.0.id {
            Ok(Arc::clone(&self.0))
        } else {
            Err(ApplicationError::TemplateNotFound {
                template_id: id.into(),
            }
            .into())
        }
    }

    fn list(&self, category: Option<&str>) -> Vec<TemplateSummary> {
        [self.0.summary()]
            .into_iter()
            .filter(|s| category.is_none_or(|c| c == s.category))
            .collect()
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::new("ci", "CI", 1)]
    }
}

/// Lists the paths instead of archiving.
struct PathList;

impl Packager for PathList {
    fn package(&self, manifest: &GenerationManifest) -> StencilResult<PackagedArtifact> {
        let listing: Vec<_> = manifest.files.iter().map(|f| f.path.as_str()).collect();
        Ok(PackagedArtifact {
            bytes: listing.join("\n").into_bytes(),
            filename: format!("{}.txt", manifest.archive_stem()),
            content_type: "text/plain",
        })
    }
}

fn workflow() -> TemplateDefinition {
    TemplateDefinition::builder("workflow")
        .name("Workflow")
        .category("ci")
        .file(FileTemplate::new(
            "<%= name | kebab %>.yml",
            "./.ci/<%= name | kebab %>.yml",
            "yaml",
            "name: <%= name %>\n\
             steps:\n\
             <% for step in steps %>\n\
             \x20 - run: make <%= step %>\n\
             <% endfor %>\n\
             <% if not cache %>\n\
             cache: off\n\
             <% endif %>",
        ))
        .field(FieldSchema::text("name", "Name").required())
        .field(
            FieldSchema::multiselect("steps", "Steps", ["lint", "test", "build"])
                .default_value(ConfigValue::list(["test"])),
        )
        .field(FieldSchema::boolean("cache", "Cache").default_value(true))
        .build()
        .unwrap()
}

fn service() -> GenerationService {
    GenerationService::new(Arc::new(OneTemplate(Arc::new(workflow()))), Arc::new(PathList))
}

#[test]
fn renders_paths_names_and_bodies() {
    let mut config = ConfigMap::new();
    config.insert("name".into(), ConfigValue::text("Nightly Build"));
    config.insert("steps".into(), ConfigValue::list(["lint", "build"]));
    config.insert("cache".into(), ConfigValue::from(false));

    let manifest = service().generate("workflow", &config).unwrap();
    let file = &manifest.files[0];

    assert_eq!(file.name, "nightly-build.yml");
    assert_eq!(file.path, "./.ci/nightly-build.yml");
    assert_eq!(
        file.content,
        "name: Nightly Build\nsteps:\n  - run: make lint\n  - run: make build\ncache: off"
    );
    assert_eq!(manifest.metadata.version, "1.0.0");
}

#[test]
fn defaults_fill_the_gaps() {
    let mut config = ConfigMap::new();
    config.insert("name".into(), ConfigValue::text("ci"));

    let manifest = service().preview("workflow", &config).unwrap();
    assert_eq!(
        manifest.files[0].content,
        "name: ci\nsteps:\n  - run: make test"
    );
}

#[test]
fn catalog_listing_filters_by_category() {
    let catalog = CatalogService::new(Arc::new(OneTemplate(Arc::new(workflow()))));
    assert_eq!(catalog.list_templates(None).len(), 1);
    assert!(catalog.list_templates(Some("security")).is_empty());

    let listings = catalog.list_categories();
    assert_eq!(listings[0].templates[0].id, "workflow");
}

#[test]
fn download_packages_what_generate_produced() {
    let mut config = ConfigMap::new();
    config.insert("name".into(), ConfigValue::text("ci"));

    let artifact = service().download("workflow", Some(&config)).unwrap();
    assert_eq!(artifact.bytes, b"./.ci/ci.yml");
    assert!(artifact.filename.starts_with("workflow_"));
}

#[test]
fn option_values_are_enforced() {
    let mut config = ConfigMap::new();
    config.insert("name".into(), ConfigValue::text("ci"));
    config.insert("steps".into(), ConfigValue::list(["deploy"]));

    let err = service().generate("workflow", &config).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.as_validation().map(|e| e.field()), Some("steps"));
}
