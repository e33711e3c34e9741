//! String templates with `{column}` placeholders
//!
//! A template is validated once when it is parsed: braces must be balanced,
//! placeholders must not nest, and a placeholder must name a column. A
//! backslash escapes a literal `{`, `}` or `\`.

use std::fmt;

use crate::error::{R2rmlError, R2rmlResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Column(String),
}

/// A parsed template such as `http://ex.org/emp/{EMPNO}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse and validate a template string
    pub fn parse(template: impl Into<String>) -> R2rmlResult<Self> {
        let source = template.into();
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut column: Option<String> = None;
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| {
                        R2rmlError::InvalidTemplate(format!("'{source}' ends with a dangling escape"))
                    })?;
                    match column.as_mut() {
                        Some(name) => name.push(escaped),
                        None => text.push(escaped),
                    }
                }
                '{' => {
                    if column.is_some() {
                        return Err(R2rmlError::InvalidTemplate(format!(
                            "'{source}' has a nested '{{'"
                        )));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    column = Some(String::new());
                }
                '}' => match column.take() {
                    Some(name) if name.is_empty() => {
                        return Err(R2rmlError::InvalidTemplate(format!(
                            "'{source}' has an empty placeholder"
                        )));
                    }
                    Some(name) => segments.push(Segment::Column(name)),
                    None => {
                        return Err(R2rmlError::InvalidTemplate(format!(
                            "'{source}' has an unmatched '}}'"
                        )));
                    }
                },
                _ => match column.as_mut() {
                    Some(name) => name.push(c),
                    None => text.push(c),
                },
            }
        }

        if column.is_some() {
            return Err(R2rmlError::InvalidTemplate(format!(
                "'{source}' has an unclosed '{{'"
            )));
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { source, segments })
    }

    /// The template text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Column names referenced by placeholders, in order of appearance
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Column(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Substitute every placeholder
    ///
    /// `lookup` returns the value for a column, `Ok(None)` meaning NULL. Any
    /// NULL placeholder makes the whole expansion `None`. `escape` is applied
    /// to substituted values only, never to the literal text.
    pub fn expand<'v, F, E>(&self, mut lookup: F, escape: E) -> R2rmlResult<Option<String>>
    where
        F: FnMut(&str) -> R2rmlResult<Option<&'v str>>,
        E: Fn(&str) -> String,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Column(name) => match lookup(name)? {
                    Some(value) => out.push_str(&escape(value)),
                    None => return Ok(None),
                },
            }
        }
        Ok(Some(out))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn expand_with(template: &Template, values: &HashMap<&str, Option<&'static str>>) -> Option<String> {
        template
            .expand(
                |col| Ok(values.get(col).copied().flatten()),
                |v| v.to_string(),
            )
            .unwrap()
    }

    #[test]
    fn test_parse_columns() {
        let t = Template::parse("http://ex.org/{dept}/emp/{id}").unwrap();
        assert_eq!(t.columns().collect::<Vec<_>>(), vec!["dept", "id"]);
        assert_eq!(t.as_str(), "http://ex.org/{dept}/emp/{id}");
    }

    #[test]
    fn test_expand_adjacent_placeholders() {
        let t = Template::parse("{a},{b}").unwrap();
        let values = HashMap::from([("a", Some("1")), ("b", Some("2"))]);
        assert_eq!(expand_with(&t, &values).as_deref(), Some("1,2"));
    }

    #[test]
    fn test_expand_null_yields_none() {
        let t = Template::parse("x/{a}").unwrap();
        let values = HashMap::from([("a", None)]);
        assert_eq!(expand_with(&t, &values), None);
    }

    #[test]
    fn test_escape_applies_to_values_only() {
        let t = Template::parse("a b/{v}").unwrap();
        let out = t
            .expand(|_| Ok(Some("c d")), |v| v.replace(' ', "%20"))
            .unwrap();
        assert_eq!(out.as_deref(), Some("a b/c%20d"));
    }

    #[test]
    fn test_backslash_escapes_braces() {
        let t = Template::parse(r"\{literal\}/{id}").unwrap();
        assert_eq!(t.columns().collect::<Vec<_>>(), vec!["id"]);
        let out = t.expand(|_| Ok(Some("7")), |v| v.to_string()).unwrap();
        assert_eq!(out.as_deref(), Some("{literal}/7"));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["{}", "{a", "a}", "{a{b}}", "x\\"] {
            assert!(
                matches!(Template::parse(bad), Err(R2rmlError::InvalidTemplate(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_no_placeholders() {
        let t = Template::parse("http://ex.org/constant").unwrap();
        assert_eq!(t.columns().count(), 0);
        let out = t.expand(|_| Ok(None), |v| v.to_string()).unwrap();
        assert_eq!(out.as_deref(), Some("http://ex.org/constant"));
    }
}
