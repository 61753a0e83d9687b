//! Typed syntax tree produced by the parser and walked by the evaluator.

use serde_json::Number;

use super::filters::Filter;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Text(String),
    Output(Expr),
    If {
        branches: Vec<Branch>,
        otherwise: Vec<Node>,
    },
    For {
        binding: String,
        source: String,
        line: usize,
        body: Vec<Node>,
    },
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Branch {
    pub condition: Condition,
    pub body: Vec<Node>,
}

/// `IDENT ( "|" FILTER )*`
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Expr {
    pub variable: String,
    pub filters: Vec<Filter>,
    pub line: usize,
}

/// `"not"? IDENT ( ("==" | "!=") LITERAL | "has" LITERAL )?`
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Condition {
    pub negated: bool,
    pub subject: String,
    pub test: Test,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Test {
    Truthy,
    Equals(Literal),
    NotEquals(Literal),
    Has(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Literal {
    Text(String),
    Number(Number),
    Boolean(bool),
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Form used for `has` membership against list items.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}
