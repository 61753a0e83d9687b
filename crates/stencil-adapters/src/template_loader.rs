//! Filesystem-based template loader.
//!
//! Discovers `*.toml` definition files in a directory tree and parses each
//! one into a [`TemplateDefinition`].
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── terraform-module.toml
//! └── team/
//!     └── docker-compose.toml
//! ```
//!
//! # Definition file format
//!
//! One definition per file, in the serialized shape of
//! [`TemplateDefinition`]. File bodies use the directive language.
//!
//! ```toml
//! id = "docker-compose"
//! name = "Docker Compose"
//! category = "container"
//! version = "1.0.0"              # optional, defaults to 1.0.0
//!
//! [[files]]
//! name = "docker-compose.yml"
//! path = "./docker-compose.yml"
//! type = "yaml"
//! content = """
//! services:
//!   app:
//!     image: <%= image %>
//! """
//!
//! [[fields]]
//! name = "image"
//! label = "Image"
//! type = "text"
//! required = true
//!
//! [examples.basic]
//! image = "nginx:1.27"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stencil_core::{
    domain::{DomainError, TemplateDefinition},
    error::{StencilError, StencilResult},
};

/// Loads [`TemplateDefinition`]s from a directory tree of TOML files.
///
/// Files that cannot be read or parsed emit a `WARN` log and are skipped;
/// they do not prevent other definitions from loading.
///
/// # Example
///
/// ```no_run
/// use stencil_adapters::template_loader::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let definitions = loader.load_all()?;
/// println!("Loaded {} templates", definitions.len());
/// # Ok::<(), stencil_core::error::StencilError>(())
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist yet; [`load_all`](Self::load_all)
    /// returns an error if it is missing when called.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid definition found under the templates directory,
    /// sorted by file path.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the directory does not exist or
    /// cannot be walked.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> StencilResult<Vec<TemplateDefinition>> {
        if !self.templates_dir.is_dir() {
            return Err(StencilError::Configuration {
                message: format!(
                    "templates directory not found: {}",
                    self.templates_dir.display()
                ),
            });
        }

        let mut definitions = Vec::new();

        for entry in WalkDir::new(&self.templates_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| StencilError::Configuration {
                message: format!(
                    "failed to read templates directory '{}': {e}",
                    self.templates_dir.display()
                ),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }

            match Self::load_file(path) {
                Ok(definition) => {
                    debug!(
                        id      = %definition.id,
                        version = %definition.version,
                        "loaded template"
                    );
                    definitions.push(definition);
                }
                Err(e) => {
                    // One bad file must not block all others.
                    warn!(
                        file  = %path.display(),
                        error = %e,
                        "skipping template file due to load error"
                    );
                }
            }
        }

        debug!(count = definitions.len(), "finished loading templates");
        Ok(definitions)
    }

    /// Parse and validate a single definition file.
    pub fn load_file(path: &Path) -> Result<TemplateDefinition, DomainError> {
        let invalid = |reason: String| DomainError::InvalidDefinition {
            template_id: path.display().to_string(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| invalid(format!("failed to read: {e}")))?;
        let definition: TemplateDefinition =
            toml::from_str(&raw).map_err(|e| invalid(format!("failed to parse: {e}")))?;

        definition.validate()?;
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::{ConfigValue, FieldKind};
    use tempfile::TempDir;

    const COMPOSE: &str = r#"
id = "docker-compose"
name = "Docker Compose"
category = "container"

[[files]]
name = "docker-compose.yml"
path = "./docker-compose.yml"
type = "yaml"
content = """
services:
  app:
    image: <%= image %>
    ports:
      - "<%= port %>:<%= port %>"
"""

[[fields]]
name = "image"
label = "Image"
type = "text"
required = true

[[fields]]
name = "port"
label = "Port"
type = "number"
default = 8080

[examples.basic]
image = "nginx:1.27"
port = 80
"#;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_nested_definitions() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "team/compose.toml", COMPOSE);
        write(tmp.path(), "README.md", "not a template");

        let defs = FilesystemTemplateLoader::new(tmp.path()).load_all().unwrap();
        assert_eq!(defs.len(), 1);

        let def = &defs[0];
        assert_eq!(def.id, "docker-compose");
        assert_eq!(def.version, "1.0.0");
        assert_eq!(def.fields[1].kind, FieldKind::Number);
        assert_eq!(def.fields[1].default, Some(ConfigValue::number(8080)));
        assert_eq!(def.example("basic").unwrap()["port"], ConfigValue::number(80));
    }

    #[test]
    fn malformed_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a-good.toml", COMPOSE);
        write(tmp.path(), "b-broken.toml", "id = ");
        write(
            tmp.path(),
            "c-invalid.toml",
            "id = \"x\"\nname = \"X\"\ncategory = \"c\"\nfiles = []\n",
        );

        let defs = FilesystemTemplateLoader::new(tmp.path()).load_all().unwrap();
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let err = FilesystemTemplateLoader::new(tmp.path().join("nope"))
            .load_all()
            .unwrap_err();
        assert!(matches!(err, StencilError::Configuration { .. }));
    }
}
