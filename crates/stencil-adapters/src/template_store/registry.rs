//! Id → definition registry with stable registration order.
//!
//! Construction is split in two phases:
//!
//! 1. [`RegistryBuilder`] is owned by the startup code and mutated with
//!    `&mut self`. Every definition is validated on the way in.
//! 2. [`RegistryBuilder::build`] freezes the contents into a
//!    [`TemplateRegistry`], a cheap-to-clone `Arc` handle with no interior
//!    mutability. Readers on any thread share it without locking.

use std::{collections::HashMap, path::Path, sync::Arc};

use stencil_core::{
    application::{ApplicationError, ports::TemplateCatalog},
    domain::{Category, TemplateDefinition, TemplateSummary},
    error::StencilResult,
};
use tracing::{debug, info, instrument, warn};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

// ── Builder ───────────────────────────────────────────────────────────────────

/// Startup-time registry under construction.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: Vec<Arc<TemplateDefinition>>,
    index: HashMap<String, usize>,
    categories: Vec<Category>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-loaded with the built-in catalogue and its categories.
    pub fn with_builtin() -> StencilResult<Self> {
        let mut builder = Self::new();
        for category in builtin_templates::categories() {
            builder.register_category(category);
        }
        builder.register_all(builtin_templates::all_definitions()?)?;
        Ok(builder)
    }

    /// Insert or overwrite by id.
    ///
    /// The definition is validated first; an invalid one leaves the builder
    /// untouched. An overwrite keeps the original registration slot, so
    /// listing order does not change.
    pub fn register(&mut self, definition: TemplateDefinition) -> StencilResult<&mut Self> {
        definition.validate()?;

        let id = definition.id.clone();
        let definition = Arc::new(definition);

        match self.index.get(&id) {
            Some(&slot) => {
                warn!(template = %id, "Overwriting registered template");
                self.definitions[slot] = definition;
            }
            None => {
                debug!(template = %id, "Registered template");
                self.index.insert(id, self.definitions.len());
                self.definitions.push(definition);
            }
        }

        Ok(self)
    }

    pub fn register_all(
        &mut self,
        definitions: impl IntoIterator<Item = TemplateDefinition>,
    ) -> StencilResult<&mut Self> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(self)
    }

    /// Load every definition under `dir` and register it after what is
    /// already present. Returns how many were loaded.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_dir(&mut self, dir: &Path) -> StencilResult<usize> {
        let definitions = FilesystemTemplateLoader::new(dir).load_all()?;
        let count = definitions.len();
        self.register_all(definitions)?;
        info!(count, "Loaded local templates");
        Ok(count)
    }

    /// Insert or replace a category record by id.
    pub fn register_category(&mut self, category: Category) -> &mut Self {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Freeze into a shareable read-only registry.
    pub fn build(self) -> TemplateRegistry {
        TemplateRegistry {
            inner: Arc::new(self),
        }
    }
}

// ── Frozen registry ───────────────────────────────────────────────────────────

/// Read-only template registry.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    inner: Arc<RegistryBuilder>,
}

impl TemplateRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in catalogue, frozen.
    pub fn with_builtin() -> StencilResult<Self> {
        Ok(RegistryBuilder::with_builtin()?.build())
    }

    /// Built-ins plus every definition found under `local_dir`, if given.
    pub fn load(local_dir: Option<&Path>) -> StencilResult<Self> {
        let mut builder = RegistryBuilder::with_builtin()?;
        if let Some(dir) = local_dir {
            builder.load_dir(dir)?;
        }
        Ok(builder.build())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.inner.definitions.iter().map(|d| d.id.as_str())
    }
}

impl TemplateCatalog for TemplateRegistry {
    fn get(&self, id: &str) -> StencilResult<Arc<TemplateDefinition>> {
        self.inner
            .index
            .get(id)
            .map(|&slot| Arc::clone(&self.inner.definitions[slot]))
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    template_id: id.to_owned(),
                }
                .into()
            })
    }

    fn list(&self, category: Option<&str>) -> Vec<TemplateSummary> {
        self.inner
            .definitions
            .iter()
            .filter(|d| category.is_none_or(|c| d.category == c))
            .map(|d| d.summary())
            .collect()
    }

    fn categories(&self) -> Vec<Category> {
        self.inner.categories.clone()
    }
}
