//! Turns one [`FileTemplate`] into a [`GeneratedFile`].

use super::{
    DomainError,
    directive,
    entities::{FileTemplate, GeneratedFile},
    value_objects::ConfigMap,
};

/// Render a file's name, path and content against a defaulted config.
///
/// Errors are labelled `<template_id>/<file name>#<part>` so a defect can
/// be traced to the exact string that failed.
pub fn render_file(
    template_id: &str,
    file: &FileTemplate,
    config: &ConfigMap,
) -> Result<GeneratedFile, DomainError> {
    let label = |part: &str| format!("{template_id}/{}#{part}", file.name);

    Ok(GeneratedFile {
        name: directive::render(&label("name"), &file.name, config)?,
        path: directive::render(&label("path"), &file.path, config)?,
        content: directive::render(&label("content"), &file.content, config)?,
        file_type: file.file_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ConfigValue;

    #[test]
    fn name_and_path_are_templates() {
        let file = FileTemplate::new(
            "<%= workflowName | kebab %>.yml",
            "./.github/workflows/<%= workflowName | kebab %>.yml",
            "yaml",
            "name: <%= workflowName %>\n",
        );
        let mut config = ConfigMap::new();
        config.insert("workflowName".into(), ConfigValue::text("CI Pipeline"));

        let out = render_file("github-actions", &file, &config).unwrap();
        assert_eq!(out.name, "ci-pipeline.yml");
        assert_eq!(out.path, "./.github/workflows/ci-pipeline.yml");
        assert_eq!(out.content, "name: CI Pipeline");
        assert_eq!(out.file_type, "yaml");
    }

    #[test]
    fn error_label_names_file_and_part() {
        let file = FileTemplate::new("Dockerfile", "./Dockerfile", "dockerfile", "<% if %>");
        let err = render_file("dockerfile-nodejs", &file, &ConfigMap::new()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::TemplateSyntax { ref template, .. } if template == "dockerfile-nodejs/Dockerfile#content"
        ));
    }
}
