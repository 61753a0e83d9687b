use serde::{Deserialize, Serialize};

use super::definition::TemplateSummary;

/// Display grouping for templates.
///
/// Categories are matched against [`TemplateDefinition::category`] by id, but
/// nothing enforces that every definition's category has a record.
///
/// [`TemplateDefinition::category`]: super::definition::TemplateDefinition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: u32,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            order,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// A category with the summaries of the templates filed under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListing {
    #[serde(flatten)]
    pub category: Category,
    pub templates: Vec<TemplateSummary>,
}
