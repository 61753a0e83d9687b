//! Token stream → [`Node`] tree.
//!
//! Block structure is checked here, so every syntax error (unknown keyword,
//! stray `endif`, unclosed `for`, unknown filter) surfaces before any output
//! is produced.

use serde_json::Number;

use super::{
    Position,
    ast::{Branch, Condition, Expr, Literal, Node, Test},
    filters::Filter,
    lexer::{Token, TokenKind},
};
use crate::domain::{DomainError, entities::field::is_identifier};

/// A word inside a tag body.
#[derive(Debug, Clone, PartialEq)]
enum Word {
    Ident(String),
    Str(String),
    Num(Number),
    Eq,
    Ne,
    Pipe,
}

impl Word {
    fn describe(&self) -> String {
        match self {
            Self::Ident(s) => format!("'{s}'"),
            Self::Str(s) => format!("\"{s}\""),
            Self::Num(n) => n.to_string(),
            Self::Eq => "'=='".into(),
            Self::Ne => "'!='".into(),
            Self::Pipe => "'|'".into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Lexeme {
    word: Word,
    offset: usize,
}

/// A parsed `<% ... %>` statement.
#[derive(Debug, Clone)]
enum Statement {
    If(Condition),
    Elif(Condition),
    Else,
    EndIf,
    For { binding: String, source: String },
    EndFor,
}

impl Statement {
    fn keyword(&self) -> &'static str {
        match self {
            Self::If(_) => "if",
            Self::Elif(_) => "elif",
            Self::Else => "else",
            Self::EndIf => "endif",
            Self::For { .. } => "for",
            Self::EndFor => "endfor",
        }
    }
}

const KEYWORDS: [&str; 11] = [
    "if", "elif", "else", "endif", "for", "in", "endfor", "not", "has", "true", "false",
];

pub(super) struct Parser<'a> {
    template: &'a str,
    source: &'a str,
    tokens: Vec<Token>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(template: &'a str, source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            template,
            source,
            tokens,
            cursor: 0,
        }
    }

    pub fn parse(mut self) -> Result<Vec<Node>, DomainError> {
        let (nodes, terminator) = self.parse_block()?;
        match terminator {
            None => Ok(nodes),
            Some((stmt, open)) => Err(self.error(open, format!("unexpected '{}'", stmt.keyword()))),
        }
    }

    /// Parse nodes until EOF or a block-closing statement, which is returned
    /// to the caller together with its offset.
    fn parse_block(&mut self) -> Result<(Vec<Node>, Option<(Statement, usize)>), DomainError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.get(self.cursor).cloned() {
            self.cursor += 1;
            match token.kind {
                TokenKind::Text(text) => nodes.push(Node::Text(text)),
                TokenKind::Output(body) => {
                    nodes.push(Node::Output(self.parse_expr(&body, token.body)?));
                }
                TokenKind::Statement(body) => match self.parse_statement(&body, token.body)? {
                    Statement::If(condition) => nodes.push(self.parse_if(condition, token.open)?),
                    Statement::For { binding, source } => {
                        nodes.push(self.parse_for(binding, source, token.open)?);
                    }
                    closing => return Ok((nodes, Some((closing, token.open)))),
                },
            }
        }

        Ok((nodes, None))
    }

    fn parse_if(&mut self, first: Condition, open: usize) -> Result<Node, DomainError> {
        let mut branches = Vec::new();
        let mut condition = first;

        loop {
            let (body, terminator) = self.parse_block()?;
            branches.push(Branch { condition, body });

            match terminator {
                Some((Statement::Elif(next), _)) => condition = next,
                Some((Statement::Else, _)) => {
                    let (otherwise, terminator) = self.parse_block()?;
                    return match terminator {
                        Some((Statement::EndIf, _)) => Ok(Node::If { branches, otherwise }),
                        Some((stmt, at)) => Err(self.error(
                            at,
                            format!("unexpected '{}' after 'else'", stmt.keyword()),
                        )),
                        None => Err(self.error(open, "unclosed 'if', expected 'endif'")),
                    };
                }
                Some((Statement::EndIf, _)) => {
                    return Ok(Node::If {
                        branches,
                        otherwise: Vec::new(),
                    });
                }
                Some((stmt, at)) => {
                    return Err(self.error(
                        at,
                        format!("unexpected '{}' inside 'if'", stmt.keyword()),
                    ));
                }
                None => return Err(self.error(open, "unclosed 'if', expected 'endif'")),
            }
        }
    }

    fn parse_for(
        &mut self,
        binding: String,
        source: String,
        open: usize,
    ) -> Result<Node, DomainError> {
        let (body, terminator) = self.parse_block()?;
        match terminator {
            Some((Statement::EndFor, _)) => Ok(Node::For {
                binding,
                source,
                line: Position::locate(self.source, open).line,
                body,
            }),
            Some((stmt, at)) => Err(self.error(
                at,
                format!("unexpected '{}' inside 'for'", stmt.keyword()),
            )),
            None => Err(self.error(open, "unclosed 'for', expected 'endfor'")),
        }
    }

    fn parse_statement(&self, body: &str, base: usize) -> Result<Statement, DomainError> {
        let words = self.scan(body, base)?;
        let Some(first) = words.first() else {
            return Err(self.error(base, "empty directive"));
        };

        let Word::Ident(keyword) = &first.word else {
            return Err(self.error(
                first.offset,
                format!("expected a keyword, found {}", first.word.describe()),
            ));
        };

        let rest = &words[1..];
        match keyword.as_str() {
            "if" => Ok(Statement::If(self.parse_condition(rest, first.offset)?)),
            "elif" => Ok(Statement::Elif(self.parse_condition(rest, first.offset)?)),
            "else" => self.bare(rest, Statement::Else),
            "endif" => self.bare(rest, Statement::EndIf),
            "endfor" => self.bare(rest, Statement::EndFor),
            "for" => match rest {
                [
                    Lexeme { word: Word::Ident(binding), offset: b },
                    Lexeme { word: Word::Ident(kw), .. },
                    Lexeme { word: Word::Ident(source), offset: s },
                ] if kw == "in" => {
                    self.identifier(binding, *b)?;
                    self.identifier(source, *s)?;
                    Ok(Statement::For {
                        binding: binding.clone(),
                        source: source.clone(),
                    })
                }
                _ => Err(self.error(first.offset, "expected 'for <name> in <field>'")),
            },
            other => Err(self.error(first.offset, format!("unknown directive '{other}'"))),
        }
    }

    fn bare(&self, rest: &[Lexeme], stmt: Statement) -> Result<Statement, DomainError> {
        match rest.first() {
            None => Ok(stmt),
            Some(extra) => Err(self.error(
                extra.offset,
                format!(
                    "unexpected {} after '{}'",
                    extra.word.describe(),
                    stmt.keyword()
                ),
            )),
        }
    }

    fn parse_condition(&self, words: &[Lexeme], at: usize) -> Result<Condition, DomainError> {
        let line = Position::locate(self.source, at).line;
        let (negated, words) = match words.first() {
            Some(Lexeme {
                word: Word::Ident(w),
                ..
            }) if w == "not" => (true, &words[1..]),
            _ => (false, words),
        };

        let Some(first) = words.first() else {
            return Err(self.error(at, "expected a condition"));
        };
        let Word::Ident(subject) = &first.word else {
            return Err(self.error(
                first.offset,
                format!("expected a field name, found {}", first.word.describe()),
            ));
        };
        self.identifier(subject, first.offset)?;

        let test = match &words[1..] {
            [] => Test::Truthy,
            [op, lit] => {
                let literal = self.literal(lit)?;
                match &op.word {
                    Word::Eq => Test::Equals(literal),
                    Word::Ne => Test::NotEquals(literal),
                    Word::Ident(w) if w == "has" => Test::Has(literal),
                    other => {
                        return Err(self.error(
                            op.offset,
                            format!("expected '==', '!=' or 'has', found {}", other.describe()),
                        ));
                    }
                }
            }
            [op, ..] => {
                return Err(self.error(op.offset, "malformed condition"));
            }
        };

        Ok(Condition {
            negated,
            subject: subject.clone(),
            test,
            line,
        })
    }

    fn literal(&self, lexeme: &Lexeme) -> Result<Literal, DomainError> {
        match &lexeme.word {
            Word::Str(s) => Ok(Literal::Text(s.clone())),
            Word::Num(n) => Ok(Literal::Number(n.clone())),
            Word::Ident(w) if w == "true" => Ok(Literal::Boolean(true)),
            Word::Ident(w) if w == "false" => Ok(Literal::Boolean(false)),
            other => Err(self.error(
                lexeme.offset,
                format!("expected a literal, found {}", other.describe()),
            )),
        }
    }

    fn parse_expr(&self, body: &str, base: usize) -> Result<Expr, DomainError> {
        let words = self.scan(body, base)?;
        let line = Position::locate(self.source, base).line;

        let Some(first) = words.first() else {
            return Err(self.error(base, "empty output tag"));
        };
        let Word::Ident(variable) = &first.word else {
            return Err(self.error(
                first.offset,
                format!("expected a field name, found {}", first.word.describe()),
            ));
        };
        self.identifier(variable, first.offset)?;

        let mut filters = Vec::new();
        let mut rest = &words[1..];
        while let Some(pipe) = rest.first() {
            if pipe.word != Word::Pipe {
                return Err(self.error(
                    pipe.offset,
                    format!("expected '|', found {}", pipe.word.describe()),
                ));
            }
            match rest.get(1) {
                Some(Lexeme {
                    word: Word::Ident(name),
                    offset,
                }) => {
                    let filter = name
                        .parse::<Filter>()
                        .map_err(|msg| self.error(*offset, msg))?;
                    filters.push(filter);
                }
                _ => return Err(self.error(pipe.offset, "expected a filter name after '|'")),
            }
            rest = &rest[2..];
        }

        Ok(Expr {
            variable: variable.clone(),
            filters,
            line,
        })
    }

    fn identifier(&self, name: &str, at: usize) -> Result<(), DomainError> {
        if KEYWORDS.contains(&name) {
            return Err(self.error(at, format!("'{name}' is a reserved word")));
        }
        if !is_identifier(name) {
            return Err(self.error(at, format!("'{name}' is not a valid name")));
        }
        Ok(())
    }

    /// Split a tag body into words.
    fn scan(&self, body: &str, base: usize) -> Result<Vec<Lexeme>, DomainError> {
        let mut words = Vec::new();
        let mut chars = body.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            let offset = base + i;
            match c {
                c if c.is_whitespace() => {}
                '|' => words.push(Lexeme {
                    word: Word::Pipe,
                    offset,
                }),
                '=' | '!' => {
                    if chars.next_if(|&(_, n)| n == '=').is_none() {
                        return Err(self.error(offset, format!("expected '{c}='")));
                    }
                    let word = if c == '=' { Word::Eq } else { Word::Ne };
                    words.push(Lexeme { word, offset });
                }
                '"' | '\'' => {
                    let mut value = String::new();
                    let mut closed = false;
                    while let Some((_, n)) = chars.next() {
                        if n == c {
                            closed = true;
                            break;
                        }
                        value.push(n);
                    }
                    if !closed {
                        return Err(self.error(offset, "unterminated string literal"));
                    }
                    words.push(Lexeme {
                        word: Word::Str(value),
                        offset,
                    });
                }
                c if c.is_ascii_digit() || c == '-' => {
                    let mut raw = String::from(c);
                    while let Some((_, n)) =
                        chars.next_if(|&(_, n)| n.is_ascii_digit() || n == '.')
                    {
                        raw.push(n);
                    }
                    let number = parse_number(&raw)
                        .ok_or_else(|| self.error(offset, format!("invalid number '{raw}'")))?;
                    words.push(Lexeme {
                        word: Word::Num(number),
                        offset,
                    });
                }
                c if c.is_alphanumeric() || c == '_' => {
                    let mut ident = String::from(c);
                    while let Some((_, n)) =
                        chars.next_if(|&(_, n)| n.is_alphanumeric() || n == '_')
                    {
                        ident.push(n);
                    }
                    words.push(Lexeme {
                        word: Word::Ident(ident),
                        offset,
                    });
                }
                other => {
                    return Err(self.error(offset, format!("unexpected character '{other}'")));
                }
            }
        }

        Ok(words)
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> DomainError {
        DomainError::TemplateSyntax {
            template: self.template.to_owned(),
            position: Position::locate(self.source, offset),
            message: message.into(),
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(i.into());
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}
