//! Output filters (`<%= name | kebab %>`).

use std::{fmt, str::FromStr};

use crate::domain::value_objects::ConfigValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Lower,
    Upper,
    Trim,
    Snake,
    Kebab,
    Pascal,
    /// Sequence → `", "`-separated text. Scalars pass through unchanged.
    Join,
}

impl Filter {
    pub const ALL: [Filter; 7] = [
        Self::Lower,
        Self::Upper,
        Self::Trim,
        Self::Snake,
        Self::Kebab,
        Self::Pascal,
        Self::Join,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Trim => "trim",
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::Pascal => "pascal",
            Self::Join => "join",
        }
    }

    /// Apply to a value. Text filters reject lists; the error is the reason
    /// string the evaluator wraps.
    pub fn apply(self, value: ConfigValue) -> Result<ConfigValue, String> {
        if self == Self::Join {
            return Ok(match value {
                ConfigValue::List(items) => ConfigValue::Text(items.join(", ")),
                scalar => scalar,
            });
        }

        let text = value.as_scalar_text().ok_or_else(|| {
            format!(
                "filter '{}' expects text, got a list (use '| join' first)",
                self.as_str()
            )
        })?;

        let out = match self {
            Self::Lower => text.to_lowercase(),
            Self::Upper => text.to_uppercase(),
            Self::Trim => text.trim().to_owned(),
            Self::Snake => to_snake_case(&text),
            Self::Kebab => to_kebab_case(&text),
            Self::Pascal => to_pascal_case(&text),
            Self::Join => text,
        };
        Ok(ConfigValue::Text(out))
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown filter '{s}'"))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Case conversion
// ============================================================================

/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "HTTPRequest" | "http_request" |
fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Same as [`to_snake_case`] but joined with `-`; the shape Kubernetes and
/// file names want.
fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words.
///
/// ## Word Boundary Detection
///
/// 1. Any character that is not alphanumeric separates words
///    (`_`, `-`, whitespace, `/`, `.`)
/// 2. camelCase transition: `aB` splits between `a` and `B`
/// 3. Acronym boundary: `HTTPRequest` splits between `P` and `R`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(filter: Filter, input: &str) -> String {
        match filter.apply(ConfigValue::text(input)).unwrap() {
            ConfigValue::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn case_filters() {
        assert_eq!(text(Filter::Snake, "myAwesomeApp"), "my_awesome_app");
        assert_eq!(text(Filter::Kebab, "XMLHttpRequest"), "xml-http-request");
        assert_eq!(text(Filter::Pascal, "my-app"), "MyApp");
        assert_eq!(text(Filter::Kebab, "CI/CD Pipeline"), "ci-cd-pipeline");
        assert_eq!(text(Filter::Lower, "CI Pipeline"), "ci pipeline");
        assert_eq!(text(Filter::Upper, "api"), "API");
        assert_eq!(text(Filter::Trim, "  x  "), "x");
    }

    #[test]
    fn join_flattens_lists() {
        let joined = Filter::Join.apply(ConfigValue::list(["a", "b"])).unwrap();
        assert_eq!(joined, ConfigValue::text("a, b"));
        assert_eq!(
            Filter::Join.apply(ConfigValue::number(3)).unwrap(),
            ConfigValue::number(3)
        );
    }

    #[test]
    fn text_filter_on_list_fails() {
        let err = Filter::Upper.apply(ConfigValue::list(["a"])).unwrap_err();
        assert!(err.contains("join"));
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(text(Filter::Lower, "TRUE"), "true");
        assert_eq!(
            Filter::Upper.apply(ConfigValue::Boolean(true)).unwrap(),
            ConfigValue::text("TRUE")
        );
    }

    #[test]
    fn parses_names() {
        assert_eq!("kebab".parse::<Filter>().unwrap(), Filter::Kebab);
        assert!("title".parse::<Filter>().is_err());
    }
}
