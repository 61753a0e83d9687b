//! The directive language: a small interpreter over a typed AST.
//!
//! ```text
//! <%= name | kebab %>                       output, optionally filtered
//! <% if packageManager == "yarn" %>         == != has, `not` prefix, truthiness
//! <% elif ... %> <% else %> <% endif %>
//! <% for stage in stages %> <% endfor %>    iterate a list field
//! <%# comment %>                            dropped
//! <%% / %%>                                 literal "<%" / "%>"
//! ```
//!
//! Rendering is two-phase: [`DirectiveTemplate::parse`] reports every
//! structural problem as [`DomainError::TemplateSyntax`] with a line and
//! column; [`DirectiveTemplate::render`] only fails on runtime type
//! mismatches, as [`DomainError::TemplateEval`].
//!
//! The rendered output is trimmed of leading and trailing whitespace.
//! Unknown variables render as the empty string.

mod ast;
mod eval;
mod filters;
mod lexer;
mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, value_objects::ConfigMap};

pub use filters::Filter;

/// 1-based line and column (in characters) inside a template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Locate a byte offset.
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveTemplate {
    name: String,
    nodes: Vec<ast::Node>,
}

impl DirectiveTemplate {
    /// Parse `source`. `name` labels errors.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, DomainError> {
        let name = name.into();
        let tokens = lexer::tokenize(&name, source)?;
        let nodes = parser::Parser::new(&name, source, tokens).parse()?;
        Ok(Self { name, nodes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render against a (defaulted) configuration map.
    pub fn render(&self, config: &ConfigMap) -> Result<String, DomainError> {
        let mut out = String::new();
        eval::Scope::new(config)
            .render(&self.nodes, &mut out)
            .map_err(|reason| DomainError::TemplateEval {
                template: self.name.clone(),
                reason,
            })?;
        Ok(out.trim().to_owned())
    }
}

/// Parse and render in one step.
pub fn render(name: &str, source: &str, config: &ConfigMap) -> Result<String, DomainError> {
    DirectiveTemplate::parse(name, source)?.render(config)
}
