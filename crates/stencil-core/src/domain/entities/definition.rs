//! Template definitions: the unit the registry stores and the pipeline renders.
//!
//! ## Design Philosophy
//!
//! - Definitions are immutable once registered; the registry hands out `Arc`s
//! - `name`, `path` and `content` of a [`FileTemplate`] are all directive
//!   templates, rendered with the same configuration map
//! - Examples are documentation only; they are never applied implicitly

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::field::FieldSchema;
use crate::domain::{DomainError, value_objects::ConfigMap};

/// One file a definition produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTemplate {
    pub name: String,
    pub path: String,
    pub content: String,
    /// Free-form display tag (`yaml`, `dockerfile`, `groovy`, ...).
    #[serde(rename = "type", default)]
    pub file_type: String,
}

impl FileTemplate {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        file_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
            file_type: file_type.into(),
        }
    }
}

/// A named, versioned, categorized bundle of file templates plus the field
/// schema that drives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub files: Vec<FileTemplate>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default)]
    pub examples: BTreeMap<String, ConfigMap>,
}

fn default_version() -> String {
    "1.0.0".into()
}

impl TemplateDefinition {
    /// Start building a definition.
    pub fn builder(id: impl Into<String>) -> TemplateDefinitionBuilder {
        TemplateDefinitionBuilder {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            version: default_version(),
            files: Vec::new(),
            fields: Vec::new(),
            examples: BTreeMap::new(),
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a documented example configuration.
    pub fn example(&self, name: &str) -> Option<&ConfigMap> {
        self.examples.get(name)
    }

    /// Validate definition invariants.
    ///
    /// Called by the builder and again by the registry, since definitions
    /// deserialized from files bypass the builder.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidDefinition {
            template_id: self.id.clone(),
            reason,
        };

        if self.id.is_empty()
            || !self
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(invalid(
                "id must be non-empty and use only letters, digits, '-', '_' or '.'".into(),
            ));
        }

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".into()));
        }

        if self.files.is_empty() {
            return Err(invalid("definition has no files".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
            field.validate().map_err(|e| invalid(e.to_string()))?;
        }

        Ok(())
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary::from(self)
    }
}

/// Builder for [`TemplateDefinition`].
#[derive(Debug, Clone)]
pub struct TemplateDefinitionBuilder {
    id: String,
    name: String,
    description: String,
    category: String,
    version: String,
    files: Vec<FileTemplate>,
    fields: Vec<FieldSchema>,
    examples: BTreeMap<String, ConfigMap>,
}

impl TemplateDefinitionBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn file(mut self, file: FileTemplate) -> Self {
        self.files.push(file);
        self
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn example(mut self, name: impl Into<String>, config: ConfigMap) -> Self {
        self.examples.insert(name.into(), config);
        self
    }

    /// Build and validate.
    pub fn build(self) -> Result<TemplateDefinition, DomainError> {
        let definition = TemplateDefinition {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            version: self.version,
            files: self.files,
            fields: self.fields,
            examples: self.examples,
        };
        definition.validate()?;
        Ok(definition)
    }
}

/// Listing view of a definition: everything except file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub version: String,
    pub fields: Vec<FieldSchema>,
    pub examples: BTreeMap<String, ConfigMap>,
}

impl From<&TemplateDefinition> for TemplateSummary {
    fn from(d: &TemplateDefinition) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            description: d.description.clone(),
            category: d.category.clone(),
            version: d.version.clone(),
            fields: d.fields.clone(),
            examples: d.examples.clone(),
        }
    }
}
