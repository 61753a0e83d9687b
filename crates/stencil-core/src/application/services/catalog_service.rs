//! Catalog Service - read-only queries over the template catalogue.
//!
//! Separated from GenerationService for single responsibility.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    application::ports::TemplateCatalog,
    domain::{CategoryListing, TemplateDefinition, TemplateSummary},
    error::StencilResult,
};

/// Service for listing and inspecting templates.
pub struct CatalogService {
    catalog: Arc<dyn TemplateCatalog>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(catalog: Arc<dyn TemplateCatalog>) -> Self {
        Self { catalog }
    }

    /// Summaries in registration order, optionally filtered by category.
    pub fn list_templates(&self, category: Option<&str>) -> Vec<TemplateSummary> {
        self.catalog.list(category)
    }

    /// Category records sorted by `order`, each with its templates embedded.
    ///
    /// Definitions whose category has no record are not listed here.
    #[instrument(skip(self))]
    pub fn list_categories(&self) -> Vec<CategoryListing> {
        let mut categories = self.catalog.categories();
        categories.sort_by_key(|c| c.order);

        categories
            .into_iter()
            .map(|category| {
                let templates = self.catalog.list(Some(&category.id));
                CategoryListing {
                    category,
                    templates,
                }
            })
            .collect()
    }

    /// Full definition, including file templates.
    pub fn get(&self, id: &str) -> StencilResult<Arc<TemplateDefinition>> {
        self.catalog.get(id)
    }
}
