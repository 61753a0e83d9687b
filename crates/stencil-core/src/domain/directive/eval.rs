//! Walks a parsed template against a configuration map.

use super::ast::{Condition, Expr, Literal, Node, Test};
use crate::domain::value_objects::{ConfigMap, ConfigValue};

/// Variable scope: loop bindings shadow configuration fields.
pub(super) struct Scope<'a> {
    config: &'a ConfigMap,
    locals: Vec<(String, ConfigValue)>,
}

impl<'a> Scope<'a> {
    pub fn new(config: &'a ConfigMap) -> Self {
        Self {
            config,
            locals: Vec::new(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&ConfigValue> {
        self.locals
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .or_else(|| self.config.get(name))
    }

    /// Render `nodes` into `out`. Errors are plain reasons; the caller
    /// attaches the template name.
    pub fn render(&mut self, nodes: &[Node], out: &mut String) -> Result<(), String> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Output(expr) => out.push_str(&self.output(expr)?),
                Node::If {
                    branches,
                    otherwise,
                } => {
                    let mut taken = None;
                    for branch in branches {
                        if self.test(&branch.condition)? {
                            taken = Some(&branch.body);
                            break;
                        }
                    }
                    self.render(taken.unwrap_or(otherwise), out)?;
                }
                Node::For {
                    binding,
                    source,
                    line,
                    body,
                } => {
                    let items = match self.lookup(source) {
                        None => Vec::new(),
                        Some(ConfigValue::List(items)) => items.clone(),
                        Some(other) => {
                            return Err(format!(
                                "line {line}: cannot iterate over '{source}' ({})",
                                other.type_name()
                            ));
                        }
                    };

                    for item in items {
                        self.locals.push((binding.clone(), ConfigValue::Text(item)));
                        let result = self.render(body, out);
                        self.locals.pop();
                        result?;
                    }
                }
            }
        }
        Ok(())
    }

    fn output(&self, expr: &Expr) -> Result<String, String> {
        let Some(mut value) = self.lookup(&expr.variable).cloned() else {
            return Ok(String::new());
        };

        for filter in &expr.filters {
            value = filter
                .apply(value)
                .map_err(|reason| format!("line {}: {reason}", expr.line))?;
        }

        value.as_scalar_text().ok_or_else(|| {
            format!(
                "line {}: '{}' is a list and cannot be printed (use '| join')",
                expr.line, expr.variable
            )
        })
    }

    fn test(&self, condition: &Condition) -> Result<bool, String> {
        let value = self.lookup(&condition.subject);
        let subject = &condition.subject;
        let line = condition.line;

        let outcome = match (&condition.test, value) {
            (Test::Truthy, value) => value.is_some_and(ConfigValue::is_truthy),
            (Test::Equals(_), None) => false,
            (Test::NotEquals(_), None) => true,
            (Test::Equals(lit), Some(value)) => equals(value, lit)
                .ok_or_else(|| mismatch(line, subject, value, lit))?,
            (Test::NotEquals(lit), Some(value)) => !equals(value, lit)
                .ok_or_else(|| mismatch(line, subject, value, lit))?,
            (Test::Has(_), None) => false,
            (Test::Has(lit), Some(ConfigValue::List(items))) => {
                let needle = lit.as_text();
                items.iter().any(|item| *item == needle)
            }
            (Test::Has(_), Some(other)) => {
                return Err(format!(
                    "line {line}: 'has' needs a list, but '{subject}' is {}",
                    other.type_name()
                ));
            }
        };

        Ok(outcome != condition.negated)
    }
}

/// `None` when the operands have different types.
fn equals(value: &ConfigValue, literal: &Literal) -> Option<bool> {
    match (value, literal) {
        (ConfigValue::Text(a), Literal::Text(b)) => Some(a == b),
        (ConfigValue::Boolean(a), Literal::Boolean(b)) => Some(a == b),
        (ConfigValue::Number(a), Literal::Number(b)) => Some(match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        }),
        _ => None,
    }
}

fn mismatch(line: usize, subject: &str, value: &ConfigValue, literal: &Literal) -> String {
    format!(
        "line {line}: cannot compare '{subject}' ({}) with a {} literal",
        value.type_name(),
        literal.type_name()
    )
}
