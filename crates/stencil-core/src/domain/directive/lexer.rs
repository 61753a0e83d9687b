//! Splits template source into text runs and tags.
//!
//! Tag forms:
//!
//! | Source        | Token                        |
//! |---------------|------------------------------|
//! | `<%= ... %>`  | [`TokenKind::Output`]        |
//! | `<% ... %>`   | [`TokenKind::Statement`]     |
//! | `<%# ... %>`  | dropped                      |
//! | `<%%`, `%%>`  | literal `<%`, `%>` in text   |
//!
//! A statement or comment tag that is the only thing on its line takes the
//! whole line with it (indentation and line break included), so block
//! directives can sit on their own lines without leaving blank lines behind.

use super::Position;
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    Text(String),
    Output(String),
    Statement(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the opening `<%` (or of the text run).
    pub open: usize,
    /// Byte offset of the first byte of the tag body.
    pub body: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Output,
    Statement,
    Comment,
}

const OPEN: &str = "<%";
const CLOSE: &str = "%>";

pub(super) fn tokenize(template: &str, source: &str) -> Result<Vec<Token>, DomainError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while cursor < source.len() {
        let rest = &source[cursor..];

        if rest.starts_with("<%%") {
            text.push_str(OPEN);
            cursor += 3;
            continue;
        }
        if rest.starts_with("%%>") {
            text.push_str(CLOSE);
            cursor += 3;
            continue;
        }

        if rest.starts_with(OPEN) {
            let open = cursor;
            let (kind, body) = match rest.as_bytes().get(2) {
                Some(b'=') => (TagKind::Output, open + 3),
                Some(b'#') => (TagKind::Comment, open + 3),
                _ => (TagKind::Statement, open + 2),
            };

            let close = source[body..]
                .find(CLOSE)
                .map(|i| body + i)
                .ok_or_else(|| DomainError::TemplateSyntax {
                    template: template.to_owned(),
                    position: Position::locate(source, open),
                    message: "unclosed tag, expected '%>'".into(),
                })?;

            let mut end = close + CLOSE.len();
            if kind != TagKind::Output {
                if let Some((line_start, resume)) = standalone(source, open, end) {
                    let indent = open - line_start;
                    text.truncate(text.len().saturating_sub(indent));
                    end = resume;
                }
            }

            let inner = source[body..close].to_owned();
            let tag = match kind {
                TagKind::Output => Some(TokenKind::Output(inner)),
                TagKind::Statement => Some(TokenKind::Statement(inner)),
                TagKind::Comment => None,
            };

            if let Some(tag) = tag {
                if !text.is_empty() {
                    tokens.push(Token {
                        kind: TokenKind::Text(std::mem::take(&mut text)),
                        open: text_start,
                        body: text_start,
                    });
                }
                tokens.push(Token {
                    kind: tag,
                    open,
                    body,
                });
            }

            cursor = end;
            continue;
        }

        if text.is_empty() {
            text_start = cursor;
        }
        if let Some(ch) = rest.chars().next() {
            text.push(ch);
            cursor += ch.len_utf8();
        }
    }

    if !text.is_empty() {
        tokens.push(Token {
            kind: TokenKind::Text(text),
            open: text_start,
            body: text_start,
        });
    }

    Ok(tokens)
}

/// If the tag spanning `open..end` is alone on its line, return the byte
/// offset where that line starts and where the next line begins.
fn standalone(source: &str, open: usize, end: usize) -> Option<(usize, usize)> {
    let line_start = source[..open].rfind('\n').map_or(0, |i| i + 1);
    if !source[line_start..open]
        .chars()
        .all(|c| c == ' ' || c == '\t')
    {
        return None;
    }

    let rest = &source[end..];
    let line_end = rest.find('\n');
    let trailing = &rest[..line_end.unwrap_or(rest.len())];
    if !trailing.chars().all(|c| matches!(c, ' ' | '\t' | '\r')) {
        return None;
    }

    let resume = line_end.map_or(source.len(), |i| end + i + 1);
    Some((line_start, resume))
}
